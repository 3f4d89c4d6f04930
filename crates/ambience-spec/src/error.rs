//! Error types for theme tables and the shared backend error trait.

use thiserror::Error;

/// Errors raised while building or querying a theme table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Theme name is not a valid identifier.
    #[error("invalid theme name '{name}': must match ^[a-z][a-z0-9_-]{{0,63}}$")]
    InvalidName { name: String },

    /// Theme duration is zero.
    #[error("theme '{name}' has a zero duration; durations must be positive")]
    ZeroDuration { name: String },

    /// The same theme name appears more than once.
    #[error("duplicate theme '{name}'")]
    Duplicate { name: String },

    /// A requested theme is not in the table.
    #[error("unknown theme '{name}'; expected one of: {known}")]
    UnknownTheme { name: String, known: String },
}

/// Common trait for backend errors.
///
/// Each backend error type implements this trait so that per-theme failures
/// can be reported with a stable code regardless of which backend raised
/// them.
///
/// # Example
///
/// ```ignore
/// use ambience_spec::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "AUDIO_001" or "ENCODER_002". Codes are
    /// stable and can be matched programmatically.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
