//! CLI command implementations

pub mod doctor;
pub mod generate;
pub mod list;

mod reporting;

/// Environment variable overriding the default output directory.
pub const OUT_DIR_ENV: &str = "AMBIENCE_OUT_DIR";

/// Resolves the output directory: flag, then `AMBIENCE_OUT_DIR`, then default.
pub fn resolve_out_dir(flag: Option<&str>) -> std::path::PathBuf {
    resolve_out_dir_from(flag, std::env::var(OUT_DIR_ENV).ok())
}

fn resolve_out_dir_from(flag: Option<&str>, env: Option<String>) -> std::path::PathBuf {
    flag.map(str::to_string)
        .or(env.filter(|v| !v.is_empty()))
        .unwrap_or_else(|| ambience_spec::defaults::OUTPUT_DIR.to_string())
        .into()
}
