/*!
 * Hierarchical key flattening.
 *
 * A nested JSON document is flattened into dot-joined paths from the
 * root to each leaf value, in document order. The registry derived
 * from those paths is the lookup target set for marker substitution:
 * paths ending in a numeric array index are not usable directly, but
 * a path ending in index 0 is re-registered under its parent path so
 * the first element of an array-valued subtree stays addressable.
 */

use serde_json::Value;

/// Separator joining nested keys into a flattened path
pub const PATH_SEPARATOR: char = '.';

/// Ordered set of flattened lookup paths derived from a JSON document
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    paths: Vec<String>,
}

impl KeyRegistry {
    /// Build the registry from a parsed JSON value.
    ///
    /// Registry order is: every path whose final segment is not purely
    /// numeric, in flatten order, followed by the zero-collapsed form
    /// of every path whose final segment is exactly "0".
    pub fn from_value(value: &Value) -> Self {
        let flattened = flatten_value(value);

        let mut paths: Vec<String> = flattened
            .iter()
            .filter(|path| !is_numeric_segment(last_segment(path)))
            .cloned()
            .collect();

        for path in &flattened {
            if last_segment(path) == "0" {
                // A bare root index has no parent path to collapse to
                if let Some(parent) = path.strip_suffix(".0") {
                    paths.push(parent.to_string());
                }
            }
        }

        Self { paths }
    }

    /// Parse a JSON document and build the registry from it
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Find the first registry path containing the canonical keyword as a substring
    pub fn find(&self, canonical: &str) -> Option<&str> {
        self.paths
            .iter()
            .find(|path| path.contains(canonical))
            .map(String::as_str)
    }

    /// Iterate the registry paths in lookup order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of lookup paths in the registry
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the registry holds no lookup paths
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Flatten a JSON value into one dot-joined path per leaf, in document order.
///
/// Empty objects and arrays count as leaves of their own path.
pub fn flatten_value(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    flatten_into("", value, &mut paths);
    paths
}

fn flatten_into(prefix: &str, value: &Value, paths: &mut Vec<String>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(&join(prefix, key), child, paths);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&join(prefix, &index.to_string()), child, paths);
            }
        }
        _ => paths.push(prefix.to_string()),
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{segment}")
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit(PATH_SEPARATOR).next().unwrap_or(path)
}

fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}
