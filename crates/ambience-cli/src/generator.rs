//! Silence generator.
//!
//! Turns each theme of a [`ThemeTable`] into a silent compressed placeholder:
//! zero-filled buffer, scratch WAV container, encoder subprocess, output file.
//! Themes are processed one at a time and a failing theme never stops the
//! remaining ones.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ambience_backend_audio::{ScratchWav, SilenceBuffer};
use ambience_backend_encoder::{Encoder, EncoderConfig};
use ambience_spec::{defaults, ThemeEntry, ThemeTable};

use crate::failure::ThemeFailure;
use crate::report::{GenerationReport, ThemeOutcome, ThemeStatus};

/// Requested mode for output files, before the process umask applies.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o666;

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory receiving `<theme>.ogg` files. Created if missing.
    pub output_dir: PathBuf,
    /// Sample rate of the silence buffers.
    pub sample_rate: u32,
    /// Directory for scratch WAV containers.
    pub scratch_dir: PathBuf,
    /// Encoder settings.
    pub encoder: EncoderConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            sample_rate: defaults::SAMPLE_RATE,
            scratch_dir: std::env::temp_dir(),
            encoder: EncoderConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a config writing to `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the sample rate.
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the scratch directory.
    pub fn scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    /// Sets the encoder configuration.
    pub fn encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }
}

/// Generates placeholders for every theme in `table`.
///
/// Each theme is attempted exactly once, in table order. Per-theme errors are
/// recorded in the report and never abort the run.
pub fn generate(table: &ThemeTable, config: &GeneratorConfig) -> GenerationReport {
    generate_with_progress(table, config, |_| {})
}

/// Like [`generate`], calling `on_outcome` as soon as each theme finishes.
pub fn generate_with_progress<F>(
    table: &ThemeTable,
    config: &GeneratorConfig,
    mut on_outcome: F,
) -> GenerationReport
where
    F: FnMut(&ThemeOutcome),
{
    let start = Instant::now();
    let encoder = Encoder::with_config(config.encoder.clone());

    let themes = table
        .iter()
        .map(|entry| {
            let _span = tracing::info_span!("theme", name = %entry.name).entered();
            let theme_start = Instant::now();

            let status = match generate_theme(entry, config, &encoder) {
                Ok(status) => status,
                Err(failure) => {
                    tracing::warn!(error = %failure, skip = failure.is_skip(), "theme not generated");
                    ThemeStatus::from(&failure)
                }
            };

            let outcome = ThemeOutcome::new(entry, status, elapsed_ms(theme_start));
            on_outcome(&outcome);
            outcome
        })
        .collect();

    GenerationReport {
        output_dir: config.output_dir.clone(),
        sample_rate: config.sample_rate,
        themes,
        elapsed_ms: elapsed_ms(start),
    }
}

/// Generates placeholders with default scratch and encoder settings.
pub fn generate_with(
    table: &ThemeTable,
    output_dir: impl Into<PathBuf>,
    sample_rate: u32,
) -> GenerationReport {
    generate(table, &GeneratorConfig::new(output_dir).sample_rate(sample_rate))
}

/// Generates the placeholder for a single theme.
///
/// The encoder writes to a staging file in the output directory which only
/// replaces the destination once encoding succeeded, so a failure leaves any
/// existing output untouched. Scratch and staging files are removed on every
/// return path when their owners drop.
pub fn generate_theme(
    entry: &ThemeEntry,
    config: &GeneratorConfig,
    encoder: &Encoder,
) -> Result<ThemeStatus, ThemeFailure> {
    ensure_output_dir(&config.output_dir)?;

    let buffer = SilenceBuffer::new(config.sample_rate, entry.duration_secs)?;
    let scratch = ScratchWav::write(&config.scratch_dir, &entry.name, &buffer)?;
    drop(buffer);

    let prefix = format!(".{}_", entry.name);
    let suffix = format!(".{}", defaults::OUTPUT_EXTENSION);
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(&suffix);
    // Persisted outputs keep the staging mode; match a freshly created file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(OUTPUT_MODE));
    }
    let staging = builder.tempfile_in(&config.output_dir).map_err(|e| {
        ThemeFailure::io(
            format!("failed to create staging file in {}", config.output_dir.display()),
            e,
        )
    })?;

    encoder.transcode(scratch.path(), staging.path())?;

    let destination = entry.output_path(&config.output_dir);
    let file = staging.persist(&destination).map_err(|e| {
        ThemeFailure::io(
            format!("failed to move output into {}", destination.display()),
            e.error,
        )
    })?;
    let bytes = file
        .metadata()
        .map_err(|e| ThemeFailure::io(format!("failed to stat {}", destination.display()), e))?
        .len();

    if let Err(e) = scratch.close() {
        tracing::warn!(error = %e, "failed to remove scratch container");
    }

    tracing::debug!(path = %destination.display(), bytes, "placeholder written");
    Ok(ThemeStatus::Generated {
        path: destination,
        bytes,
    })
}

fn ensure_output_dir(output_dir: &Path) -> Result<(), ThemeFailure> {
    fs::create_dir_all(output_dir).map_err(|e| {
        ThemeFailure::io(
            format!("failed to create output directory {}", output_dir.display()),
            e,
        )
    })
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn missing_encoder(dir: &Path) -> EncoderConfig {
        EncoderConfig::with_program(dir.join("no-ffmpeg-here"))
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("assets/audio/ambient"));
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.encoder, EncoderConfig::default());
    }

    #[test]
    fn test_missing_encoder_skips_every_theme() {
        let work = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let out = work.path().join("nested/ambient");

        let config = GeneratorConfig::new(&out)
            .sample_rate(8_000)
            .scratch_dir(scratch.path())
            .encoder(missing_encoder(work.path()));
        let report = generate(&ThemeTable::reference(), &config);

        assert_eq!(report.themes.len(), 5);
        assert_eq!(report.skipped(), 5);
        assert_eq!(report.generated(), 0);
        for outcome in &report.themes {
            match &outcome.status {
                ThemeStatus::Skipped { code, .. } => assert_eq!(code, "ENCODER_001"),
                other => panic!("expected skip, got {other:?}"),
            }
        }

        // Output directory is created, but stays empty.
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_buffer_failure_is_recorded_and_run_continues() {
        let work = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let table = ThemeTable::from_pairs([("operator", 8), ("tape", 16)]).unwrap();

        let config = GeneratorConfig::new(work.path())
            .sample_rate(0)
            .scratch_dir(scratch.path())
            .encoder(missing_encoder(work.path()));
        let report = generate(&table, &config);

        assert_eq!(report.failed(), 2);
        let names: Vec<_> = report.themes.iter().map(|t| t.theme.as_str()).collect();
        assert_eq!(names, vec!["operator", "tape"]);
        assert!(matches!(
            &report.themes[0].status,
            ThemeStatus::Failed { code, .. } if code == "AUDIO_001"
        ));
    }

    #[test]
    fn test_missing_scratch_dir_fails_before_encoding() {
        let work = tempfile::tempdir().unwrap();
        let table = ThemeTable::from_pairs([("guide", 1)]).unwrap();

        let config = GeneratorConfig::new(work.path().join("out"))
            .sample_rate(8_000)
            .scratch_dir(work.path().join("missing-scratch"))
            .encoder(missing_encoder(work.path()));
        let report = generate(&table, &config);

        assert_eq!(report.failed(), 1);
        assert!(matches!(
            &report.themes[0].status,
            ThemeStatus::Failed { code, .. } if code == "AUDIO_003"
        ));
    }

    #[test]
    fn test_unwritable_output_dir_is_a_failure() {
        let work = tempfile::tempdir().unwrap();
        let blocker = work.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let table = ThemeTable::from_pairs([("map", 1)]).unwrap();

        let config = GeneratorConfig::new(blocker.join("ambient"))
            .sample_rate(8_000)
            .scratch_dir(work.path())
            .encoder(missing_encoder(work.path()));
        let report = generate(&table, &config);

        assert_eq!(report.failed(), 1);
        assert!(matches!(
            &report.themes[0].status,
            ThemeStatus::Failed { code, reason } if code == "THEME_001" && reason.contains("output directory")
        ));
    }

    #[test]
    fn test_progress_sees_every_theme_in_order() {
        let work = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(work.path().join("out"))
            .sample_rate(8_000)
            .scratch_dir(work.path())
            .encoder(missing_encoder(work.path()));

        let mut seen = Vec::new();
        let report = generate_with_progress(&ThemeTable::reference(), &config, |outcome| {
            seen.push(outcome.theme.clone())
        });

        assert_eq!(seen, vec!["operator", "guide", "map", "timeline", "tape"]);
        assert_eq!(report.themes.len(), seen.len());
    }

    #[test]
    fn test_generate_with_uses_defaults() {
        let table = ThemeTable::from_pairs([("tape", 16)]).unwrap();
        let work = tempfile::tempdir().unwrap();

        // Whether or not ffmpeg is installed, the run completes and reports
        // exactly one outcome.
        let report = generate_with(&table, work.path(), 8_000);
        assert_eq!(report.themes.len(), 1);
        assert_eq!(report.sample_rate, 8_000);
        assert_eq!(report.output_dir, work.path());
    }
}
