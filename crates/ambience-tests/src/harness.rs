//! Test harness utilities for running generation and validating outputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;
use tempfile::TempDir;

use ambience_backend_encoder::{Encoder, EncoderConfig};
use ambience_cli::GeneratorConfig;
use ambience_spec::defaults;

/// Result of running the ambience CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }
}

/// Isolated output and scratch directories for one test.
pub struct TestHarness {
    /// Working directory holding outputs and helper scripts.
    pub work_dir: TempDir,
    /// Scratch directory handed to the generator.
    pub scratch_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
            scratch_dir: TempDir::new().expect("Failed to create scratch dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Output directory used by [`TestHarness::config`].
    pub fn out_dir(&self) -> PathBuf {
        self.path().join("assets").join("ambient")
    }

    /// Generator config writing into this harness with the given encoder.
    pub fn config(&self, encoder: EncoderConfig) -> GeneratorConfig {
        GeneratorConfig::new(self.out_dir())
            .scratch_dir(self.scratch_dir.path())
            .encoder(encoder)
    }

    /// Encoder config pointing at a program that does not exist.
    pub fn missing_encoder(&self) -> EncoderConfig {
        EncoderConfig::with_program(self.path().join("bin").join("no-such-ffmpeg"))
    }

    /// Writes a shell script standing in for ffmpeg.
    ///
    /// The script copies its input WAV to the output path, except for themes
    /// listed in `failing_themes`, for which it exits with `exit_code`.
    #[cfg(unix)]
    pub fn fake_encoder(&self, failing_themes: &[&str], exit_code: i32) -> EncoderConfig {
        use std::os::unix::fs::PermissionsExt;

        let mut script = String::from(
            "#!/bin/sh\n\
             # -y -i <input> -c:a <codec> -q:a <quality> <output>\n\
             input=\"$3\"\n\
             for output; do :; done\n",
        );
        for theme in failing_themes {
            script.push_str(&format!(
                "case \"$input\" in *ambience_{theme}_*) exit {exit_code} ;; esac\n"
            ));
        }
        script.push_str("cp \"$input\" \"$output\"\n");

        let bin = self.path().join("bin");
        fs::create_dir_all(&bin).expect("Failed to create bin dir");
        let program = bin.join(format!("fake-ffmpeg-{}", failing_themes.join("-")));
        fs::write(&program, script).expect("Failed to write fake encoder");
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake encoder executable");

        EncoderConfig::with_program(program)
    }

    /// Scratch files left behind in the scratch directory.
    pub fn leftover_scratch(&self) -> Vec<PathBuf> {
        scratch_files(self.scratch_dir.path())
    }

    /// Run the ambience CLI with the given arguments.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        let manifest_path = ambience_manifest_path();

        let output = Command::new("cargo")
            .args(["run", "--quiet", "--manifest-path"])
            .arg(&manifest_path)
            .args(["-p", "ambience-cli", "--bin", "ambience", "--"])
            .args(args)
            .current_dir(self.path())
            .env("NO_COLOR", "1")
            .output();

        match output {
            Ok(out) => CliResult::from_output(out),
            Err(e) => CliResult {
                success: false,
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to run CLI: {}", e),
            },
        }
    }
}

fn ambience_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a working ffmpeg is available.
pub fn is_ffmpeg_available() -> bool {
    Encoder::new().probe().is_ok()
}

/// Check if ffmpeg is available and was built with the default codec.
pub fn ffmpeg_supports_default_codec() -> bool {
    let Ok(program) = Encoder::new().resolve_program() else {
        return false;
    };
    Command::new(program)
        .args(["-hide_banner", "-encoders"])
        .stderr(Stdio::null())
        .output()
        .map(|o| {
            o.status.success()
                && String::from_utf8_lossy(&o.stdout).contains(defaults::ENCODER_CODEC)
        })
        .unwrap_or(false)
}

/// Decodes `input` to 16-bit PCM WAV using ffmpeg.
pub fn decode_to_wav(input: &Path, output: &Path) -> Result<(), String> {
    let program = Encoder::new()
        .resolve_program()
        .map_err(|e| e.to_string())?;
    let status = Command::new(program)
        .args(["-y", "-i"])
        .arg(input)
        .args(["-c:a", "pcm_s16le"])
        .arg(output)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| e.to_string())?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("ffmpeg decode exited with {status}"))
    }
}

/// Final `<theme>.ogg` files in `dir`, sorted.
pub fn output_files(dir: &Path) -> Vec<PathBuf> {
    list_files(dir, |name| !name.starts_with('.') && name.ends_with(".ogg"))
}

/// Scratch WAV containers in `dir` for any theme.
pub fn scratch_files(dir: &Path) -> Vec<PathBuf> {
    list_files(dir, |name| name.starts_with("ambience_") && name.ends_with(".wav"))
}

/// Staging files the encoder wrote to and that were never persisted.
pub fn staging_files(dir: &Path) -> Vec<PathBuf> {
    list_files(dir, |name| name.starts_with('.'))
}

fn list_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.file_name().and_then(|n| n.to_str()).is_some_and(&keep))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creation() {
        let harness = TestHarness::new();
        assert!(harness.path().exists());
        assert!(harness.leftover_scratch().is_empty());
        assert!(output_files(&harness.out_dir()).is_empty());
    }

    #[test]
    fn test_scratch_files_ignore_unrelated_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("ambience_tape_abc.wav"), "x").unwrap();

        assert_eq!(
            scratch_files(dir.path()),
            vec![dir.path().join("ambience_tape_abc.wav")]
        );
    }

    #[test]
    fn test_ffmpeg_check() {
        // Just make sure it doesn't panic
        let _ = is_ffmpeg_available();
    }
}
