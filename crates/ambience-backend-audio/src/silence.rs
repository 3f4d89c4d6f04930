//! Zero-filled sample buffers.

use crate::error::{AudioError, AudioResult};

/// Largest number of 16-bit samples a WAV data chunk can hold.
const MAX_WAV_SAMPLES: u64 = (u32::MAX as u64) / 2;

/// A mono buffer of digital silence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SilenceBuffer {
    sample_rate: u32,
    duration_secs: u32,
    samples: Vec<i16>,
}

impl SilenceBuffer {
    /// Allocates `sample_rate * duration_secs` zero samples.
    pub fn new(sample_rate: u32, duration_secs: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        let count = sample_count(sample_rate, duration_secs)?;
        tracing::debug!(sample_rate, duration_secs, count, "allocating silence buffer");

        Ok(Self {
            sample_rate,
            duration_secs,
            samples: vec![0i16; count],
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in whole seconds.
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// The samples, all zero.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true for a zero-length buffer.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn sample_count(sample_rate: u32, duration_secs: u32) -> AudioResult<usize> {
    let too_large = || AudioError::BufferTooLarge {
        sample_rate,
        duration_secs,
    };

    let count = u64::from(sample_rate)
        .checked_mul(u64::from(duration_secs))
        .filter(|&count| count <= MAX_WAV_SAMPLES)
        .ok_or_else(too_large)?;
    usize::try_from(count).map_err(|_| too_large())
}
