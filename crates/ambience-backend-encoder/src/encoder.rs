//! Encoder subprocess management.
//!
//! Runs `ffmpeg` synchronously with its console output discarded. Only the
//! exit status and whether the program could be started are consulted.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use ambience_spec::defaults;

use crate::error::{EncoderError, EncoderResult};

/// Executable name searched for in PATH.
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Environment variable overriding the encoder executable.
pub const PROGRAM_ENV: &str = "FFMPEG_PATH";

/// Poll interval while waiting on an encoder with a timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Explicit encoder executable. Used as-is when set.
    pub program: Option<PathBuf>,
    /// Audio codec (`-c:a`).
    pub codec: String,
    /// Variable bitrate quality (`-q:a`).
    pub quality: u8,
    /// Kill the encoder after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: None,
            codec: defaults::ENCODER_CODEC.to_string(),
            quality: defaults::ENCODER_QUALITY,
            timeout: None,
        }
    }
}

impl EncoderConfig {
    /// Creates a new config with the given encoder executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
            ..Default::default()
        }
    }

    /// Sets the encoder executable.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Sets the audio codec.
    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    /// Sets the quality level.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Exit information of a finished encoder run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStatus {
    /// Process exit code, `None` if terminated by a signal.
    pub exit_code: Option<i32>,
    /// Whether the process exited successfully.
    pub success: bool,
}

impl From<ExitStatus> for EncodeStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
            success: status.success(),
        }
    }
}

/// The external encoder.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Creates an encoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with the given configuration.
    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Finds the encoder executable.
    ///
    /// Order: config override, `FFMPEG_PATH`, PATH lookup, then common
    /// installation locations. Overrides are returned without checking that
    /// they exist so that a wrong override surfaces as an unavailable encoder
    /// instead of silently falling back to another binary.
    pub fn resolve_program(&self) -> EncoderResult<PathBuf> {
        if let Some(ref program) = self.config.program {
            return Ok(program.clone());
        }

        if let Some(program) = std::env::var_os(PROGRAM_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(program));
        }

        if let Ok(path) = which::which(DEFAULT_PROGRAM) {
            return Ok(path);
        }

        let common_paths: &[&str] = if cfg!(windows) {
            &["C:\\ffmpeg\\bin\\ffmpeg.exe"]
        } else if cfg!(target_os = "macos") {
            &["/opt/homebrew/bin/ffmpeg", "/usr/local/bin/ffmpeg"]
        } else {
            &["/usr/bin/ffmpeg", "/usr/local/bin/ffmpeg", "/snap/bin/ffmpeg"]
        };

        common_paths
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
            .ok_or_else(|| EncoderError::EncoderNotFound {
                program: PathBuf::from(DEFAULT_PROGRAM),
            })
    }

    /// Arguments for transcoding `input` into `output`.
    ///
    /// `-y` overwrites an existing output file.
    pub fn command_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-c:a".into(),
            self.config.codec.clone().into(),
            "-q:a".into(),
            self.config.quality.to_string().into(),
            output.into(),
        ]
    }

    /// Runs the encoder and returns its exit status.
    ///
    /// Blocks until the encoder exits, or until the configured timeout
    /// elapses.
    pub fn run(&self, input: &Path, output: &Path) -> EncoderResult<EncodeStatus> {
        let program = self.resolve_program()?;
        let args = self.command_args(input, output);
        tracing::debug!(program = %program.display(), ?args, "spawning encoder");

        let child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(&program, e))?;

        let status = wait_for_exit(child, self.config.timeout)?;
        tracing::debug!(?status, "encoder exited");
        Ok(EncodeStatus::from(status))
    }

    /// Runs the encoder, treating a non-zero exit as an error.
    pub fn transcode(&self, input: &Path, output: &Path) -> EncoderResult<EncodeStatus> {
        let status = self.run(input, output)?;
        if !status.success {
            return Err(EncoderError::ProcessFailed {
                exit_code: status.exit_code,
            });
        }
        Ok(status)
    }

    /// Runs `ffmpeg -version` and returns the reported version.
    pub fn probe(&self) -> EncoderResult<String> {
        let program = self.resolve_program()?;
        let output = Command::new(&program)
            .arg("-version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&program, e))?;

        if !output.status.success() {
            return Err(EncoderError::ProcessFailed {
                exit_code: output.status.code(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ffmpeg_version(&stdout).unwrap_or_else(|| "unknown".to_string()))
    }
}

fn spawn_error(program: &Path, source: std::io::Error) -> EncoderError {
    if source.kind() == std::io::ErrorKind::NotFound {
        EncoderError::EncoderNotFound {
            program: program.to_path_buf(),
        }
    } else {
        EncoderError::NotInvocable {
            program: program.to_path_buf(),
            source,
        }
    }
}

fn wait_for_exit(mut child: Child, timeout: Option<Duration>) -> EncoderResult<ExitStatus> {
    let Some(timeout) = timeout else {
        return child.wait().map_err(EncoderError::Wait);
    };

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    tracing::warn!(timeout_secs = timeout.as_secs(), "killing encoder");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(EncoderError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(EncoderError::Wait(e)),
        }
    }
}

/// Parses the version from `ffmpeg -version` output.
///
/// The first line looks like `ffmpeg version 6.1.1 Copyright (c) ...`.
pub fn parse_ffmpeg_version(output: &str) -> Option<String> {
    output
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("ffmpeg version "))
        .and_then(|rest| rest.split_whitespace().next())
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_builder() {
        let config = EncoderConfig::with_program("/opt/ffmpeg/bin/ffmpeg")
            .codec("libopus")
            .quality(6)
            .timeout_secs(30);

        assert_eq!(config.program, Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")));
        assert_eq!(config.codec, "libopus");
        assert_eq!(config.quality, 6);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.program, None);
        assert_eq!(config.codec, "libvorbis");
        assert_eq!(config.quality, 4);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_command_args() {
        let encoder = Encoder::new();
        let args = encoder.command_args(Path::new("in.wav"), Path::new("out.ogg"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec!["-y", "-i", "in.wav", "-c:a", "libvorbis", "-q:a", "4", "out.ogg"]
        );
    }

    #[test]
    fn test_explicit_program_is_not_second_guessed() {
        let encoder = Encoder::with_config(EncoderConfig::with_program("/no/such/ffmpeg"));
        assert_eq!(
            encoder.resolve_program().unwrap(),
            PathBuf::from("/no/such/ffmpeg")
        );
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = Encoder::with_config(EncoderConfig::with_program(
            dir.path().join("missing-ffmpeg"),
        ));

        let err = encoder
            .run(&dir.path().join("in.wav"), &dir.path().join("out.ogg"))
            .unwrap_err();
        assert!(matches!(err, EncoderError::EncoderNotFound { .. }));
        assert!(err.is_unavailable());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_program_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("ffmpeg");
        std::fs::write(&program, "not a program").unwrap();

        let encoder = Encoder::with_config(EncoderConfig::with_program(&program));
        let err = encoder
            .run(&dir.path().join("in.wav"), &dir.path().join("out.ogg"))
            .unwrap_err();
        assert!(matches!(err, EncoderError::NotInvocable { .. }));
        assert!(err.is_unavailable());
    }

    #[cfg(unix)]
    #[test]
    fn test_status_reports_exit_code() {
        let Ok(program) = which::which("false") else {
            eprintln!("`false` not found; skipping");
            return;
        };
        let encoder = Encoder::with_config(EncoderConfig::with_program(program));

        let status = encoder
            .run(Path::new("in.wav"), Path::new("out.ogg"))
            .unwrap();
        assert!(!status.success);
        assert_eq!(status.exit_code, Some(1));

        let err = encoder
            .transcode(Path::new("in.wav"), Path::new("out.ogg"))
            .unwrap_err();
        assert!(matches!(err, EncoderError::ProcessFailed { exit_code: Some(1) }));
        assert!(!err.is_unavailable());
    }

    #[cfg(unix)]
    #[test]
    fn test_transcode_accepts_success() {
        let Ok(program) = which::which("true") else {
            eprintln!("`true` not found; skipping");
            return;
        };
        let encoder = Encoder::with_config(EncoderConfig::with_program(program));
        let status = encoder
            .transcode(Path::new("in.wav"), Path::new("out.ogg"))
            .unwrap();
        assert_eq!(
            status,
            EncodeStatus {
                exit_code: Some(0),
                success: true
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_encoder() {
        let Ok(sleep) = which::which("sleep") else {
            eprintln!("`sleep` not found; skipping");
            return;
        };
        let child = Command::new(sleep)
            .arg("5")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let start = Instant::now();
        let err = wait_for_exit(child, Some(Duration::from_millis(100))).unwrap_err();
        assert!(matches!(err, EncoderError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_parse_ffmpeg_version() {
        let out = "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 the FFmpeg developers\nbuilt with gcc\n";
        assert_eq!(parse_ffmpeg_version(out).as_deref(), Some("6.1.1-3ubuntu5"));
        assert_eq!(parse_ffmpeg_version("not ffmpeg\n"), None);
        assert_eq!(parse_ffmpeg_version(""), None);
    }
}
