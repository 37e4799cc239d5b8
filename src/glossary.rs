/*!
 * Translation glossary loading.
 *
 * The glossary is a two-column keyword table inside an xlsx workbook:
 * one column of source-language keywords, one column of canonical
 * keywords. It is loaded once into a read-only mapping; rows with a
 * missing canonical keyword are logged and excluded.
 */

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use log::{debug, warn};

use crate::errors::GlossaryError;

/// Marker content treated as unresolvable regardless of glossary state
pub const SENTINEL_KEYWORD: &str = "None";

/// Read-only mapping from source-language keyword to canonical keyword
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: HashMap<String, String>,
}

impl Glossary {
    /// Load the glossary from a named sheet of an xlsx workbook.
    ///
    /// Both columns are read over the sheet's used range and trimmed of
    /// trailing empty cells; a length mismatch after trimming is fatal.
    pub fn from_workbook<P: AsRef<Path>>(
        path: P,
        sheet: &str,
        source_column: &str,
        canonical_column: &str,
    ) -> Result<Self, GlossaryError> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e: calamine::XlsxError| GlossaryError::WorkbookOpen(e.to_string()))?;

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|_| GlossaryError::SheetNotFound(sheet.to_string()))?;

        let source_cells = extract_column(&range, column_index(source_column)?);
        let canonical_cells = extract_column(&range, column_index(canonical_column)?);

        debug!(
            "Glossary columns: source={} cells, canonical={} cells",
            source_cells.len(),
            canonical_cells.len()
        );

        if source_cells.len() != canonical_cells.len() {
            return Err(GlossaryError::ColumnLengthMismatch {
                source_len: source_cells.len(),
                canonical_len: canonical_cells.len(),
            });
        }

        Ok(Self::from_pairs(
            source_cells.into_iter().zip(canonical_cells),
        ))
    }

    /// Build the glossary from parallel (source, canonical) cell values.
    ///
    /// Duplicate source keywords are last-write-wins. Rows with an empty
    /// canonical value are logged with their 1-based row number and
    /// excluded; rows that are empty on both sides are skipped silently.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, Option<String>)>,
    {
        let mut entries = HashMap::new();

        for (index, (source, canonical)) in pairs.into_iter().enumerate() {
            match (source, canonical) {
                (Some(source), Some(canonical)) => {
                    entries.insert(source, canonical);
                }
                (Some(source), None) => {
                    warn!(
                        "Row {}: invalid canonical keyword for [{}], entry skipped",
                        index + 1,
                        source
                    );
                }
                (None, Some(canonical)) => {
                    warn!(
                        "Row {}: canonical keyword [{}] has no source keyword, entry skipped",
                        index + 1,
                        canonical
                    );
                }
                (None, None) => {}
            }
        }

        Self { entries }
    }

    /// Resolve a source-language keyword to its canonical keyword.
    ///
    /// The literal sentinel keyword is never resolved, even if the
    /// glossary happens to contain it as a key.
    pub fn resolve(&self, keyword: &str) -> Option<&str> {
        if keyword == SENTINEL_KEYWORD {
            return None;
        }
        self.entries.get(keyword).map(String::as_str)
    }

    /// Number of usable entries in the glossary
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary has no usable entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert a spreadsheet column letter ("A", "O", "AA", ...) to a 0-based index
pub fn column_index(letters: &str) -> Result<usize, GlossaryError> {
    if letters.is_empty() {
        return Err(GlossaryError::InvalidColumn(letters.to_string()));
    }

    let mut index: usize = 0;
    for c in letters.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return Err(GlossaryError::InvalidColumn(letters.to_string()));
        }
        index = index * 26 + (c as usize - 'A' as usize + 1);
    }

    Ok(index - 1)
}

/// Extract one column of the used range as cell text, trimmed of trailing empties
fn extract_column(range: &Range<Data>, column: usize) -> Vec<Option<String>> {
    let start_column = range.start().map(|(_, c)| c as usize).unwrap_or(0);

    let mut cells: Vec<Option<String>> = range
        .rows()
        .map(|row| {
            column
                .checked_sub(start_column)
                .and_then(|offset| row.get(offset))
                .and_then(cell_text)
        })
        .collect();

    while matches!(cells.last(), Some(None)) {
        cells.pop();
    }

    cells
}

/// Textual value of a cell, with empty strings treated as absent
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
