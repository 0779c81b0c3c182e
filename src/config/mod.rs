mod file_config;

pub use file_config::FileConfig;

use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub lookup_url: String,
    pub lookup_timeout_sec: u64,
    pub lookup_limit: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub lookup_url: String,
    pub lookup_timeout_sec: u64,
    pub lookup_limit: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Self {
        let file = file_config.unwrap_or_default();

        Self {
            db_path: file
                .db_path
                .map(PathBuf::from)
                .unwrap_or_else(|| cli.db_path.clone()),
            uploads_dir: file
                .uploads_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| cli.uploads_dir.clone()),
            lookup_url: file.lookup_url.unwrap_or_else(|| cli.lookup_url.clone()),
            lookup_timeout_sec: file.lookup_timeout_sec.unwrap_or(cli.lookup_timeout_sec),
            lookup_limit: file.lookup_limit.unwrap_or(cli.lookup_limit),
        }
    }
}
