/*!
 * Marker substitution over the template document.
 *
 * Markers are double-brace tokens like `{{城市}}`. Each marker keyword
 * is resolved through the glossary to a canonical keyword, the
 * canonical keyword is matched against the key registry, and on
 * success every literal occurrence of the marker text in the whole
 * document is replaced with a `[(${path})] ` reference. Unresolved
 * markers are logged with their line number and left in place.
 */

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::glossary::Glossary;
use crate::key_registry::KeyRegistry;

/// Regex for matching marker tokens (non-greedy, empty content allowed)
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{.*?\}\}").expect("Invalid marker regex")
});

/// Outcome counters for one substitution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Marker occurrences resolved and replaced
    pub replaced: usize,
    /// Marker occurrences with no usable glossary entry (E002)
    pub glossary_gaps: usize,
    /// Marker occurrences whose canonical keyword matched no registry path (E001)
    pub registry_gaps: usize,
}

impl SubstitutionReport {
    /// Whether every scanned marker was resolved
    pub fn is_clean(&self) -> bool {
        self.glossary_gaps == 0 && self.registry_gaps == 0
    }

    /// Total number of unresolved marker occurrences
    pub fn unresolved(&self) -> usize {
        self.glossary_gaps + self.registry_gaps
    }
}

/// Substitution engine binding a glossary to a key registry
pub struct Substitutor<'a> {
    glossary: &'a Glossary,
    registry: &'a KeyRegistry,
}

impl<'a> Substitutor<'a> {
    pub fn new(glossary: &'a Glossary, registry: &'a KeyRegistry) -> Self {
        Self { glossary, registry }
    }

    /// Run one substitution pass over the whole document.
    ///
    /// Markers are scanned line by line so diagnostics carry 1-based
    /// line numbers, but each successful replacement is applied
    /// globally: every literal occurrence of the marker text anywhere
    /// in the document is rewritten in the same step.
    pub fn apply(&self, content: &str) -> (String, SubstitutionReport) {
        let mut output = content.to_string();
        let mut report = SubstitutionReport::default();

        for (line_index, line) in content.lines().enumerate() {
            let line_number = line_index + 1;

            for marker in MARKER_REGEX.find_iter(line) {
                let marker_text = marker.as_str();
                // Brace delimiters are ASCII, so byte slicing is safe
                let keyword = &marker_text[2..marker_text.len() - 2];

                let Some(canonical) = self.glossary.resolve(keyword) else {
                    warn!(
                        "E002 Line({}): the canonical keyword of [{}] is not in the glossary, but the marker is in the template",
                        line_number, keyword
                    );
                    report.glossary_gaps += 1;
                    continue;
                };

                match self.registry.find(canonical) {
                    Some(path) => {
                        info!("OK   Line({}): [{}] --> [{}]", line_number, keyword, path);
                        let replacement = format!("[(${{{}}})] ", path);
                        output = output.replace(marker_text, &replacement);
                        report.replaced += 1;
                    }
                    None => {
                        warn!(
                            "E001 Line({}): the canonical keyword [{}] of [{}] is not in the data file, but the marker is in the template",
                            line_number, canonical, keyword
                        );
                        report.registry_gaps += 1;
                    }
                }
            }
        }

        (output, report)
    }
}
