use colored::Colorize;

use crate::report::{GenerationReport, ThemeOutcome, ThemeStatus};

/// Print the status line for one theme.
pub(crate) fn print_outcome(outcome: &ThemeOutcome) {
    let label = format!("{} ({}s)", outcome.theme, outcome.duration_secs);
    match &outcome.status {
        ThemeStatus::Generated { path, bytes } => {
            println!(
                "  {} {} -> {} {}",
                "GENERATED".green(),
                label,
                path.display(),
                format!("({bytes} bytes)").dimmed()
            );
        }
        ThemeStatus::Skipped { reason, .. } => {
            println!("  {} {} - {}", "SKIPPED".yellow(), label, reason);
        }
        ThemeStatus::Failed { reason, .. } => {
            println!("  {} {} - {}", "FAILED".red(), label, reason);
        }
    }
}

/// Print the closing summary.
pub(crate) fn print_summary(report: &GenerationReport) {
    println!();
    println!("{}", "======================================".cyan());
    println!("{}", "  Generation Summary".cyan());
    println!("{}", "======================================".cyan());
    println!();
    println!("{} {}", "Generated:".green().bold(), report.generated());
    println!("{} {}", "Skipped:".yellow().bold(), report.skipped());
    println!("{} {}", "Failed:".red().bold(), report.failed());
    println!(
        "{} {:.2}s",
        "Total runtime:".blue().bold(),
        report.elapsed_ms as f64 / 1000.0
    );
    println!();

    if report.skipped() > 0 && report.themes.iter().any(is_unavailable_skip) {
        println!(
            "{} Install ffmpeg with libvorbis, or point FFMPEG_PATH / --encoder at it.",
            "HINT".yellow().bold()
        );
    }
    println!(
        "{} These files are silent placeholders. Replace them with real ambient recordings.",
        "NOTE".blue().bold()
    );
}

fn is_unavailable_skip(outcome: &ThemeOutcome) -> bool {
    matches!(
        &outcome.status,
        ThemeStatus::Skipped { code, .. } if code == "ENCODER_001" || code == "ENCODER_002"
    )
}
