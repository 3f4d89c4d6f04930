//! Ambience CLI - silent placeholder generation for ambient sound themes
//!
//! This binary generates one silent Ogg Vorbis file per theme so that the
//! application has something to load until real recordings exist.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ambience_cli::commands;
use cli_args::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            out_dir,
            encoder,
            themes,
            timeout_secs,
            json,
        } => commands::generate::run(
            out_dir.as_deref(),
            encoder.as_deref(),
            &themes,
            timeout_secs,
            json,
        ),
        Commands::List { out_dir, json } => commands::list::run(out_dir.as_deref(), json),
        Commands::Doctor { out_dir, encoder } => {
            commands::doctor::run(out_dir.as_deref(), encoder.as_deref())
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
