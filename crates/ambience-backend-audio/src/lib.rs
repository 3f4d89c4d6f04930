//! Ambience Audio Backend
//!
//! Synthesizes silent sample buffers and persists them as uncompressed WAV
//! containers in a scratch directory, ready to be handed to the encoder.
//!
//! # Example
//!
//! ```no_run
//! use ambience_backend_audio::{ScratchWav, SilenceBuffer};
//! use std::path::Path;
//!
//! let buffer = SilenceBuffer::new(44_100, 8)?;
//! let scratch = ScratchWav::write(Path::new("/tmp"), "operator", &buffer)?;
//! println!("scratch container at {}", scratch.path().display());
//! // The scratch file is removed when `scratch` is dropped.
//! # Ok::<(), ambience_backend_audio::AudioError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`silence`] - Zero-filled sample buffers
//! - [`wav`] - WAV format parameters and scoped scratch containers
//! - [`error`] - Error types

pub mod error;
pub mod silence;
pub mod wav;

pub use error::{AudioError, AudioResult};
pub use silence::SilenceBuffer;
pub use wav::{ScratchWav, WavFormat};
