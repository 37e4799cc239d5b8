use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::glossary;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Path to the template document containing `{{...}}` markers
    #[serde(default = "default_template")]
    pub template: String,

    /// Path to the structured JSON data file
    #[serde(default = "default_data")]
    pub data: String,

    /// Path to the glossary workbook (xlsx)
    #[serde(default = "default_glossary")]
    pub glossary: String,

    /// Path the rewritten document is written to
    #[serde(default = "default_output")]
    pub output: String,

    /// Glossary config
    #[serde(default)]
    pub glossary_layout: GlossaryLayout,

    /// Whether to pause for confirmation prompts before and after processing
    #[serde(default = "default_true")]
    pub interactive: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Location of the keyword columns inside the glossary workbook
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlossaryLayout {
    /// Name of the worksheet holding the keyword table
    #[serde(default = "default_sheet")]
    pub sheet: String,

    /// Column letter of the source-language keywords
    #[serde(default = "default_source_column")]
    pub source_column: String,

    /// Column letter of the canonical keywords
    #[serde(default = "default_canonical_column")]
    pub canonical_column: String,
}

impl Default for GlossaryLayout {
    fn default() -> Self {
        Self {
            sheet: default_sheet(),
            source_column: default_source_column(),
            canonical_column: default_canonical_column(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_template() -> String {
    "input.tex".to_string()
}

fn default_data() -> String {
    "input.json".to_string()
}

fn default_glossary() -> String {
    "input.xlsx".to_string()
}

fn default_output() -> String {
    "output.tex".to_string()
}

fn default_sheet() -> String {
    // Sheet name used by the original workbook ("variable nouns")
    "变量名词".to_string()
}

fn default_source_column() -> String {
    "O".to_string()
}

fn default_canonical_column() -> String {
    "N".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("template", &self.template),
            ("data", &self.data),
            ("glossary", &self.glossary),
            ("output", &self.output),
        ] {
            if path.is_empty() {
                return Err(anyhow!("Configuration field '{}' must not be empty", name));
            }
        }

        if self.glossary_layout.sheet.is_empty() {
            return Err(anyhow!("Glossary sheet name must not be empty"));
        }

        // Both column letters must parse, and must differ
        let source = glossary::column_index(&self.glossary_layout.source_column)?;
        let canonical = glossary::column_index(&self.glossary_layout.canonical_column)?;
        if source == canonical {
            return Err(anyhow!(
                "Source and canonical columns must differ (both are '{}')",
                self.glossary_layout.source_column
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            template: default_template(),
            data: default_data(),
            glossary: default_glossary(),
            output: default_output(),
            glossary_layout: GlossaryLayout::default(),
            interactive: true,
            log_level: LogLevel::default(),
        }
    }
}
