//! WAV format parameters and scoped scratch containers.
//!
//! A [`ScratchWav`] owns its file on disk. Dropping it removes the file, so
//! every exit path of a generation step cleans up without explicit deletes.

use std::io::BufWriter;
use std::path::Path;

use ambience_spec::defaults;
use tempfile::NamedTempFile;

use crate::error::{AudioError, AudioResult};
use crate::silence::SilenceBuffer;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 for this implementation).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono 16-bit format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: defaults::CHANNELS,
            sample_rate,
            bits_per_sample: defaults::BITS_PER_SAMPLE,
        }
    }

    fn to_spec(self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        }
    }
}

/// A WAV container written to the scratch directory for one theme.
#[derive(Debug)]
pub struct ScratchWav {
    file: NamedTempFile,
}

impl ScratchWav {
    /// Writes `buffer` to a new scratch file in `scratch_dir`.
    ///
    /// The file name is derived from `theme` (`ambience_<theme>_XXXXXX.wav`).
    /// If writing fails after the file was created, it is removed before the
    /// error is returned.
    pub fn write(scratch_dir: &Path, theme: &str, buffer: &SilenceBuffer) -> AudioResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(&scratch_prefix(theme))
            .suffix(".wav")
            .tempfile_in(scratch_dir)
            .map_err(|source| AudioError::CreateScratch {
                path: scratch_dir.to_path_buf(),
                source,
            })?;

        let format = WavFormat::mono(buffer.sample_rate());
        {
            let sink = BufWriter::new(file.as_file_mut());
            let mut writer = hound::WavWriter::new(sink, format.to_spec())?;
            for &sample in buffer.samples() {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }

        tracing::debug!(
            path = %file.path().display(),
            frames = buffer.len(),
            "wrote scratch container"
        );

        Ok(Self { file })
    }

    /// Path of the scratch file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Removes the scratch file, reporting any removal error.
    pub fn close(self) -> AudioResult<()> {
        let path = self.path().to_path_buf();
        self.file.close()?;
        tracing::debug!(path = %path.display(), "removed scratch container");
        Ok(())
    }
}

fn scratch_prefix(theme: &str) -> String {
    format!("ambience_{theme}_")
}
