//! Per-theme failure taxonomy.
//!
//! Every error raised while generating one theme is classified here. Skips
//! cover encoder problems; failures cover everything else.

use ambience_backend_audio::AudioError;
use ambience_backend_encoder::EncoderError;
use ambience_spec::BackendError;
use thiserror::Error;

/// Why a single theme did not produce an output file.
#[derive(Debug, Error)]
pub enum ThemeFailure {
    /// The encoder could not be found or started.
    #[error("encoder unavailable: {0}")]
    EncoderUnavailable(#[source] EncoderError),

    /// The encoder ran but did not succeed.
    #[error("encoding failed: {0}")]
    EncodingFailed(#[source] EncoderError),

    /// Buffer, scratch file, or output file handling failed.
    #[error("generation failed: {message}")]
    GenerationFailed { code: &'static str, message: String },
}

impl ThemeFailure {
    /// Creates a generation failure from an I/O error with context.
    pub fn io(context: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::GenerationFailed {
            code: "THEME_001",
            message: format!("{context}: {source}"),
        }
    }

    /// Returns true if this failure is reported as a skip.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ThemeFailure::EncoderUnavailable(_) | ThemeFailure::EncodingFailed(_)
        )
    }
}

impl From<EncoderError> for ThemeFailure {
    fn from(err: EncoderError) -> Self {
        match err {
            err if err.is_unavailable() => ThemeFailure::EncoderUnavailable(err),
            err @ (EncoderError::ProcessFailed { .. } | EncoderError::Timeout { .. }) => {
                ThemeFailure::EncodingFailed(err)
            }
            err => ThemeFailure::GenerationFailed {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

impl From<AudioError> for ThemeFailure {
    fn from(err: AudioError) -> Self {
        ThemeFailure::GenerationFailed {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl BackendError for ThemeFailure {
    fn code(&self) -> &'static str {
        match self {
            ThemeFailure::EncoderUnavailable(err) | ThemeFailure::EncodingFailed(err) => err.code(),
            ThemeFailure::GenerationFailed { code, .. } => *code,
        }
    }

    fn category(&self) -> &'static str {
        match self {
            ThemeFailure::EncoderUnavailable(_) | ThemeFailure::EncodingFailed(_) => "encoder",
            ThemeFailure::GenerationFailed { .. } => "generation",
        }
    }
}
