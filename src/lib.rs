/*!
 * # texsub - Template Keyword Substitution
 *
 * A Rust library for one-shot keyword substitution in text templates.
 *
 * ## Features
 *
 * - Load a two-column keyword glossary from an xlsx workbook
 * - Flatten a nested JSON document into dot-joined lookup paths,
 *   with zero-index collapsing for array-valued subtrees
 * - Replace `{{keyword}}` markers with `[(${path})] ` references
 * - Per-marker diagnostics with line numbers for unresolved keywords
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `glossary`: Glossary workbook loading and keyword resolution
 * - `key_registry`: JSON flattening and lookup path registry
 * - `template`: Marker scanning and substitution
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod glossary;
pub mod key_registry;
pub mod template;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, GlossaryError};
pub use glossary::Glossary;
pub use key_registry::KeyRegistry;
pub use template::{SubstitutionReport, Substitutor};
