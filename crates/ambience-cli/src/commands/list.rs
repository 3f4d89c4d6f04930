//! List command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use ambience_spec::ThemeTable;

use super::resolve_out_dir;

/// Print the theme table and the output path of each theme.
pub fn run(out_dir: Option<&str>, json: bool) -> Result<ExitCode> {
    let table = ThemeTable::reference();

    if json {
        let json = serde_json::to_string_pretty(&table).context("Failed to serialize themes")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    let out_dir = resolve_out_dir(out_dir);
    println!("{}", "Themes:".bold());
    for entry in &table {
        println!(
            "  {:<10} {:>3}s  {}",
            entry.name,
            entry.duration_secs,
            entry.output_path(&out_dir).display().to_string().dimmed()
        );
    }
    println!();
    println!(
        "{} {} themes, {}s of silence",
        "Total:".blue().bold(),
        table.len(),
        table.total_duration_secs()
    );

    Ok(ExitCode::SUCCESS)
}
