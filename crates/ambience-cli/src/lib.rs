//! Ambience CLI library.
//!
//! This crate provides the silence generator that drives placeholder
//! generation, its report types, and the command implementations used by the
//! `ambience` binary.

pub mod commands;
pub mod failure;
pub mod generator;
pub mod report;

pub use failure::ThemeFailure;
pub use generator::{
    generate, generate_theme, generate_with, generate_with_progress, GeneratorConfig,
};
pub use report::{GenerationReport, ThemeOutcome, ThemeStatus};
