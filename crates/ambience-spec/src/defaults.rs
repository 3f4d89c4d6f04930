//! Fixed generation settings.
//!
//! The command-line tool does not expose these; library callers may override
//! the sample rate and encoder settings through their config types.

/// Sample rate of the silence buffer in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Number of channels in the scratch container.
pub const CHANNELS: u16 = 1;

/// Bits per sample in the scratch container.
pub const BITS_PER_SAMPLE: u16 = 16;

/// File extension of generated placeholders.
pub const OUTPUT_EXTENSION: &str = "ogg";

/// Audio codec passed to the encoder.
pub const ENCODER_CODEC: &str = "libvorbis";

/// Variable bitrate quality passed to the encoder (`-q:a`).
pub const ENCODER_QUALITY: u8 = 4;

/// Output directory, relative to the working directory.
pub const OUTPUT_DIR: &str = "assets/audio/ambient";

/// Reference theme configuration as `(name, duration_secs)` pairs.
pub const REFERENCE_THEMES: &[(&str, u32)] = &[
    ("operator", 8),
    ("guide", 12),
    ("map", 10),
    ("timeline", 14),
    ("tape", 16),
];
