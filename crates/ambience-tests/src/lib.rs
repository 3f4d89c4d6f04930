//! Ambience End-to-End Test Infrastructure
//!
//! Integration tests for placeholder generation:
//!
//! - Generation: theme table -> output files, using a scripted fake encoder
//! - Output: real `ffmpeg` output decoded back and checked for silence
//! - CLI: the `ambience` binary end to end
//!
//! ## Running Tests
//!
//! ```bash
//! # Fake-encoder and CLI tests (no ffmpeg required)
//! cargo test -p ambience-tests
//!
//! # Real encoder tests run automatically when ffmpeg is installed
//! FFMPEG_PATH=/usr/local/bin/ffmpeg cargo test -p ambience-tests --test ffmpeg_output
//! ```

pub mod harness;

pub use harness::{
    decode_to_wav, ffmpeg_supports_default_codec, is_ffmpeg_available, output_files,
    scratch_files, staging_files, CliResult, TestHarness,
};
