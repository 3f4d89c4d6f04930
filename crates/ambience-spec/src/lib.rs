//! Ambience theme library
//!
//! This crate provides the types shared by every ambience crate: the theme
//! table that drives placeholder generation, the fixed reference
//! configuration, and the [`BackendError`] trait used for error reporting.
//!
//! # Example
//!
//! ```
//! use ambience_spec::{ThemeTable, defaults};
//!
//! let table = ThemeTable::reference();
//! assert_eq!(table.len(), 5);
//!
//! let operator = table.get("operator").unwrap();
//! assert_eq!(operator.duration_secs, 8);
//! assert_eq!(
//!     operator.output_file_name(),
//!     format!("operator.{}", defaults::OUTPUT_EXTENSION)
//! );
//! ```
//!
//! # Modules
//!
//! - [`defaults`]: Fixed sample rate, encoder settings, and paths
//! - [`error`]: Theme errors and the [`BackendError`] trait
//! - [`theme`]: Theme entries and the ordered theme table
//! - [`validation`]: Theme identifier validation

pub mod defaults;
pub mod error;
pub mod theme;
pub mod validation;

pub use error::{BackendError, ThemeError};
pub use theme::{ThemeEntry, ThemeTable};
pub use validation::is_valid_theme_name;
