//! Ambience Encoder Backend
//!
//! Transcodes scratch WAV containers into compressed placeholders by running
//! `ffmpeg` as a subprocess.
//!
//! # Example
//!
//! ```no_run
//! use ambience_backend_encoder::{Encoder, EncoderConfig};
//! use std::path::Path;
//!
//! let encoder = Encoder::with_config(EncoderConfig::default().timeout_secs(60));
//! encoder.transcode(Path::new("operator.wav"), Path::new("operator.ogg"))?;
//! # Ok::<(), ambience_backend_encoder::EncoderError>(())
//! ```
//!
//! # Encoder Requirements
//!
//! `ffmpeg` built with `libvorbis`. The encoder is looked up in:
//!
//! 1. [`EncoderConfig::program`]
//! 2. `FFMPEG_PATH` environment variable
//! 3. System PATH
//! 4. Common installation locations (platform-specific)

pub mod encoder;
pub mod error;

pub use encoder::{EncodeStatus, Encoder, EncoderConfig, DEFAULT_PROGRAM, PROGRAM_ENV};
pub use error::{EncoderError, EncoderResult};
