//! Error types for the audio backend.

use ambience_spec::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while building or writing silence.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Sample count does not fit in memory or in a WAV data chunk.
    #[error("buffer of {duration_secs}s at {sample_rate} Hz exceeds the WAV size limit")]
    BufferTooLarge {
        /// Requested sample rate.
        sample_rate: u32,
        /// Requested duration.
        duration_secs: u32,
    },

    /// Scratch file could not be created.
    #[error("failed to create scratch file in {path}: {source}")]
    CreateScratch {
        /// Scratch directory.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// WAV encoding error.
    #[error("WAV write error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSampleRate { .. } => "AUDIO_001",
            AudioError::BufferTooLarge { .. } => "AUDIO_002",
            AudioError::CreateScratch { .. } => "AUDIO_003",
            AudioError::Wav(_) => "AUDIO_004",
            AudioError::Io(_) => "AUDIO_005",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
