//! Generation report types.

use std::path::{Path, PathBuf};

use ambience_spec::{BackendError, ThemeEntry};
use serde::Serialize;

use crate::failure::ThemeFailure;

/// Result of one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ThemeStatus {
    /// Output file written.
    Generated {
        /// Output path.
        path: PathBuf,
        /// Output size in bytes.
        bytes: u64,
    },
    /// Encoder unavailable or unsuccessful.
    Skipped {
        /// Human-readable reason.
        reason: String,
        /// Stable error code.
        code: String,
    },
    /// Any other failure.
    Failed {
        /// Human-readable reason.
        reason: String,
        /// Stable error code.
        code: String,
    },
}

impl From<&ThemeFailure> for ThemeStatus {
    fn from(failure: &ThemeFailure) -> Self {
        let reason = failure.to_string();
        let code = failure.code().to_string();
        if failure.is_skip() {
            ThemeStatus::Skipped { reason, code }
        } else {
            ThemeStatus::Failed { reason, code }
        }
    }
}

/// Outcome of one theme, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOutcome {
    /// Theme name.
    pub theme: String,
    /// Configured duration in seconds.
    pub duration_secs: u32,
    /// What happened.
    #[serde(flatten)]
    pub status: ThemeStatus,
    /// Time spent on this theme in milliseconds.
    pub elapsed_ms: u64,
}

impl ThemeOutcome {
    /// Builds an outcome for `entry`.
    pub fn new(entry: &ThemeEntry, status: ThemeStatus, elapsed_ms: u64) -> Self {
        Self {
            theme: entry.name.clone(),
            duration_secs: entry.duration_secs,
            status,
            elapsed_ms,
        }
    }

    /// Returns true if the output file was written.
    pub fn is_generated(&self) -> bool {
        matches!(self.status, ThemeStatus::Generated { .. })
    }

    /// Returns true if the theme was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, ThemeStatus::Skipped { .. })
    }

    /// Returns true if the theme failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ThemeStatus::Failed { .. })
    }

    /// Output path, if generated.
    pub fn output_path(&self) -> Option<&Path> {
        match &self.status {
            ThemeStatus::Generated { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Sample rate of the silence buffers.
    pub sample_rate: u32,
    /// Per-theme outcomes, in table order.
    pub themes: Vec<ThemeOutcome>,
    /// Total runtime in milliseconds.
    pub elapsed_ms: u64,
}

impl GenerationReport {
    /// Number of generated themes.
    pub fn generated(&self) -> usize {
        self.themes.iter().filter(|t| t.is_generated()).count()
    }

    /// Number of skipped themes.
    pub fn skipped(&self) -> usize {
        self.themes.iter().filter(|t| t.is_skipped()).count()
    }

    /// Number of failed themes.
    pub fn failed(&self) -> usize {
        self.themes.iter().filter(|t| t.is_failed()).count()
    }

    /// Returns true if every theme was generated.
    pub fn all_generated(&self) -> bool {
        self.generated() == self.themes.len()
    }

    /// Looks up the outcome for a theme.
    pub fn outcome(&self, theme: &str) -> Option<&ThemeOutcome> {
        self.themes.iter().find(|t| t.theme == theme)
    }
}
