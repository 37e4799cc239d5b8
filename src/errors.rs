/*!
 * Error types for the texsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while loading the translation glossary
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// Error when the workbook cannot be opened or parsed
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    /// Error when the named sheet does not exist in the workbook
    #[error("Sheet not found in workbook: {0}")]
    SheetNotFound(String),

    /// Error when the two keyword columns have different lengths
    #[error("Column length mismatch: source column has {source_len} cells, canonical column has {canonical_len}")]
    ColumnLengthMismatch {
        /// Number of cells in the source keyword column
        source_len: usize,
        /// Number of cells in the canonical keyword column
        canonical_len: usize,
    },

    /// Error when a column identifier is not a valid column letter
    #[error("Invalid column letter: {0}")]
    InvalidColumn(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from glossary loading
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Error from parsing the structured data file
    #[error("JSON error: {0}")]
    Json(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
