//! CLI argument definitions for the ambience command-line interface.

use clap::{Parser, Subcommand};

/// Ambience - silent placeholder generator for ambient sound themes
#[derive(Parser)]
#[command(name = "ambience")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a silent placeholder for each theme
    Generate {
        /// Output directory (default: $AMBIENCE_OUT_DIR or assets/audio/ambient)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Path to the ffmpeg executable (default: $FFMPEG_PATH or PATH lookup)
        #[arg(short, long)]
        encoder: Option<String>,

        /// Only generate these themes (repeatable)
        #[arg(short, long = "theme", value_name = "THEME")]
        themes: Vec<String>,

        /// Kill the encoder if a theme takes longer than this
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the generation report as JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the themes and their target files
    List {
        /// Output directory used to show target paths
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Print the theme table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the encoder and output directories
    Doctor {
        /// Output directory to check
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Path to the ffmpeg executable
        #[arg(short, long)]
        encoder: Option<String>,
    },
}
