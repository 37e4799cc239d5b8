use anyhow::{Context, Result, anyhow};
use log::{info, warn};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::glossary::Glossary;
use crate::key_registry::KeyRegistry;
use crate::template::{SubstitutionReport, Substitutor};

// @module: Application controller for template substitution

/// Main application controller driving the three pipeline stages:
/// glossary loading, key flattening, marker substitution.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Run the full pipeline: load glossary, flatten data, substitute, write output.
    ///
    /// Unresolved markers are diagnostics, not failures; only structural
    /// problems (missing files, ragged glossary columns, bad JSON) abort.
    pub fn run(&self) -> Result<SubstitutionReport> {
        let start_time = std::time::Instant::now();

        for path in [
            &self.config.template,
            &self.config.data,
            &self.config.glossary,
        ] {
            if !FileManager::file_exists(path) {
                return Err(anyhow!("Input file does not exist: {}", path));
            }
        }

        // Stage 1: glossary
        let layout = &self.config.glossary_layout;
        let glossary = Glossary::from_workbook(
            &self.config.glossary,
            &layout.sheet,
            &layout.source_column,
            &layout.canonical_column,
        )
        .with_context(|| format!("Failed to load glossary from {}", self.config.glossary))?;
        info!(
            "Processing glossary [{}]: OK ({} entries)",
            self.config.glossary,
            glossary.len()
        );

        // Stage 2: key registry
        let data_text = FileManager::read_to_string(&self.config.data)?;
        let registry = KeyRegistry::from_json(&data_text)
            .with_context(|| format!("Failed to parse data file {}", self.config.data))?;
        info!(
            "Processing data file [{}]: OK ({} lookup paths)",
            self.config.data,
            registry.len()
        );

        // Stage 3: substitution
        let template = FileManager::read_to_string(&self.config.template)?;
        let substitutor = Substitutor::new(&glossary, &registry);
        let (output, report) = substitutor.apply(&template);
        info!(
            "Replacing markers inside the template [{}]: OK",
            self.config.template
        );

        FileManager::write_to_file(&self.config.output, &output)?;
        info!("Output written to [{}]", self.config.output);

        if report.is_clean() {
            info!(
                "Done: {} markers replaced in {:.2}s",
                report.replaced,
                start_time.elapsed().as_secs_f32()
            );
        } else {
            warn!(
                "Done with gaps: {} replaced, {} unresolved ({} glossary, {} data)",
                report.replaced,
                report.unresolved(),
                report.glossary_gaps,
                report.registry_gaps
            );
        }

        Ok(report)
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.template.is_empty() && !self.config.output.is_empty()
    }
}
