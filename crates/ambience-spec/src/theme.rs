//! Theme entries and the ordered theme table.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::defaults;
use crate::error::ThemeError;
use crate::validation::is_valid_theme_name;

/// A named ambient-sound placeholder slot with a target duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeEntry {
    /// Theme identifier, also used as the output file stem.
    pub name: String,
    /// Target duration in whole seconds.
    pub duration_secs: u32,
}

impl ThemeEntry {
    /// Creates a validated theme entry.
    pub fn new(name: impl Into<String>, duration_secs: u32) -> Result<Self, ThemeError> {
        let name = name.into();
        if !is_valid_theme_name(&name) {
            return Err(ThemeError::InvalidName { name });
        }
        if duration_secs == 0 {
            return Err(ThemeError::ZeroDuration { name });
        }
        Ok(Self {
            name,
            duration_secs,
        })
    }

    /// Returns the output file name, e.g. `operator.ogg`.
    pub fn output_file_name(&self) -> String {
        format!("{}.{}", self.name, defaults::OUTPUT_EXTENSION)
    }

    /// Returns the output path inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.output_file_name())
    }
}

/// Ordered, immutable mapping from theme name to duration.
///
/// Iteration follows insertion order. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThemeTable {
    entries: Vec<ThemeEntry>,
}

impl ThemeTable {
    /// Builds a table from validated entries, rejecting duplicate names.
    pub fn new(entries: Vec<ThemeEntry>) -> Result<Self, ThemeError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(ThemeError::Duplicate {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Builds a table from `(name, duration_secs)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, secs)| ThemeEntry::new(name, secs))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// The five-entry reference configuration.
    pub fn reference() -> Self {
        Self::from_pairs(defaults::REFERENCE_THEMES.iter().copied())
            .expect("reference theme table is valid")
    }

    /// Returns a new table containing only `names`, in this table's order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, ThemeError> {
        for name in names {
            let name = name.as_ref();
            if self.get(name).is_none() {
                return Err(ThemeError::UnknownTheme {
                    name: name.to_string(),
                    known: self.names().collect::<Vec<_>>().join(", "),
                });
            }
        }

        let entries = self
            .entries
            .iter()
            .filter(|entry| names.iter().any(|n| n.as_ref() == entry.name))
            .cloned()
            .collect();
        Ok(Self { entries })
    }

    /// Looks up a theme by name.
    pub fn get(&self, name: &str) -> Option<&ThemeEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Iterates over entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, ThemeEntry> {
        self.entries.iter()
    }

    /// Iterates over theme names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no themes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all theme durations in seconds.
    pub fn total_duration_secs(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.duration_secs))
            .sum()
    }
}

impl<'a> IntoIterator for &'a ThemeTable {
    type Item = &'a ThemeEntry;
    type IntoIter = std::slice::Iter<'a, ThemeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
