//! Generate command implementation
//!
//! Runs the silence generator over the theme table and reports per-theme
//! outcomes. The exit code is success once every theme has been attempted,
//! whatever the individual outcomes.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use ambience_backend_encoder::EncoderConfig;
use ambience_spec::ThemeTable;

use super::reporting::{print_outcome, print_summary};
use super::resolve_out_dir;
use crate::generator::{generate, generate_with_progress, GeneratorConfig};

/// Run the generate command
///
/// # Arguments
/// * `out_dir` - Output directory (default: `AMBIENCE_OUT_DIR` or `assets/audio/ambient`)
/// * `encoder` - Encoder executable override
/// * `themes` - Restrict generation to these themes (empty = all)
/// * `timeout_secs` - Kill the encoder after this many seconds
/// * `json` - Print the report as JSON instead of coloured text
pub fn run(
    out_dir: Option<&str>,
    encoder: Option<&str>,
    themes: &[String],
    timeout_secs: Option<u64>,
    json: bool,
) -> Result<ExitCode> {
    let reference = ThemeTable::reference();
    let table = if themes.is_empty() {
        reference
    } else {
        reference
            .select(themes)
            .context("invalid --theme selection")?
    };

    let mut encoder_config = EncoderConfig::default();
    if let Some(program) = encoder {
        encoder_config = encoder_config.program(program);
    }
    if let Some(secs) = timeout_secs {
        encoder_config = encoder_config.timeout_secs(secs);
    }

    let config = GeneratorConfig::new(resolve_out_dir(out_dir)).encoder(encoder_config);

    if json {
        let report = generate(&table, &config);
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "======================================".cyan());
    println!("{}", "  Ambient Placeholder Generator".cyan());
    println!("{}", "======================================".cyan());
    println!();
    println!(
        "{} {}",
        "Output directory:".blue().bold(),
        config.output_dir.display()
    );
    println!("{} {}", "Themes:".blue().bold(), table.len());
    println!("{} {} Hz", "Sample rate:".blue().bold(), config.sample_rate);
    println!();

    let report = generate_with_progress(&table, &config, print_outcome);
    print_summary(&report);

    Ok(ExitCode::SUCCESS)
}
