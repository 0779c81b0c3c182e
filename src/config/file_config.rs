use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub db_path: Option<String>,
    pub uploads_dir: Option<String>,
    pub lookup_url: Option<String>,
    pub lookup_timeout_sec: Option<u64>,
    pub lookup_limit: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "db_path = \"/data/library.db\"\nlookup_limit = 5\n").unwrap();

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.db_path, Some("/data/library.db".to_string()));
        assert_eq!(config.lookup_limit, Some(5));
        assert_eq!(config.uploads_dir, None);
        assert_eq!(config.lookup_url, None);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(FileConfig::load(Path::new("/no/such/config.toml")).is_err());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "db_path = [not toml").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }
}
