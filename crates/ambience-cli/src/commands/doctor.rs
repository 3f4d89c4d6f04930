//! Doctor command implementation
//!
//! Checks the encoder and the directories the generator writes to.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use ambience_backend_encoder::{Encoder, EncoderConfig};

use super::resolve_out_dir;

/// Run the doctor command
///
/// Checks:
/// - Encoder installation and version
/// - Output directory permissions
/// - Scratch directory permissions
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(out_dir: Option<&str>, encoder: Option<&str>) -> Result<ExitCode> {
    println!("{}", "Ambience Doctor".cyan().bold());
    println!("{}", "===============".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} ambience-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Dependencies:".bold());
    let config = match encoder {
        Some(program) => EncoderConfig::with_program(program),
        None => EncoderConfig::default(),
    };
    let encoder = Encoder::with_config(config);
    let program = encoder
        .resolve_program()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "ffmpeg".to_string());
    match encoder.probe() {
        Ok(version) => {
            println!("  {} ffmpeg {} ({})", "ok".green(), version, program);
        }
        Err(e) if e.is_unavailable() => {
            println!("  {} ffmpeg not found", "!!".yellow());
            println!(
                "     {}",
                "Without ffmpeg every theme is skipped.".dimmed()
            );
            println!(
                "     {}",
                "Install from https://ffmpeg.org/download.html or set FFMPEG_PATH".dimmed()
            );
            all_ok = false;
        }
        Err(e) => {
            println!("  {} ffmpeg check failed: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Permissions:".bold());
    let out_dir = resolve_out_dir(out_dir);
    all_ok &= report_writable("Output directory", &out_dir);
    all_ok &= report_writable("Scratch directory", &std::env::temp_dir());
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

fn report_writable(label: &str, dir: &Path) -> bool {
    match check_writable(dir) {
        Ok(()) => {
            println!("  {} {} is writable ({})", "ok".green(), label, dir.display());
            true
        }
        Err(e) => {
            println!(
                "  {} Cannot write to {} ({}): {}",
                "!!".red(),
                label.to_lowercase(),
                dir.display(),
                e
            );
            false
        }
    }
}

/// Checks that `dir` (or its nearest existing ancestor) accepts new files.
fn check_writable(dir: &Path) -> std::io::Result<()> {
    let existing = dir
        .ancestors()
        .find(|p| p.is_dir())
        .unwrap_or_else(|| Path::new("."));
    tempfile::Builder::new()
        .prefix(".ambience_write_test")
        .tempfile_in(existing)
        .map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_writable_uses_existing_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_writable(&dir.path().join("not/yet/created")).is_ok());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
