//! Error types for the encoder backend.

use ambience_spec::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for encoder operations.
pub type EncoderResult<T> = Result<T, EncoderError>;

/// Errors that can occur while running the external encoder.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Encoder executable not found.
    #[error("encoder executable not found: {program}. Install ffmpeg and ensure it is in PATH, or set FFMPEG_PATH")]
    EncoderNotFound { program: PathBuf },

    /// Encoder exists but could not be started.
    #[error("failed to start encoder {program}: {source}")]
    NotInvocable {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoder did not exit within the configured timeout.
    #[error("encoder timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Encoder exited with a non-zero status.
    #[error("encoder exited with {}", describe_exit(.exit_code))]
    ProcessFailed { exit_code: Option<i32> },

    /// Failed while waiting on the encoder process.
    #[error("failed to wait for encoder: {0}")]
    Wait(#[source] std::io::Error),
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl EncoderError {
    /// Returns true if the encoder could not be found or started.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            EncoderError::EncoderNotFound { .. } | EncoderError::NotInvocable { .. }
        )
    }
}

impl BackendError for EncoderError {
    fn code(&self) -> &'static str {
        match self {
            EncoderError::EncoderNotFound { .. } => "ENCODER_001",
            EncoderError::NotInvocable { .. } => "ENCODER_002",
            EncoderError::Timeout { .. } => "ENCODER_003",
            EncoderError::ProcessFailed { .. } => "ENCODER_004",
            EncoderError::Wait(_) => "ENCODER_005",
        }
    }

    fn category(&self) -> &'static str {
        "encoder"
    }
}
