use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::fs;

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "CBT_BASE_URL";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Base URL the topic index and question files are served from.
    pub base_url: String,
}

impl Config {
    pub fn load_from(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CatalogError::Config(format!("Failed to read config file '{config_path}': {e}"))
        })?;

        let mut config: Config = toml::from_str(&config_content)?;
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.catalog.base_url = base_url;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Tests touching CBT_BASE_URL must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(base_url: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[catalog]\nbase_url = \"{base_url}\"").unwrap();
        (dir, path)
    }

    #[test]
    fn loads_base_url_from_toml() {
        let _env = ENV_LOCK.lock().unwrap();
        std::env::remove_var(BASE_URL_ENV);
        let (_dir, path) = write_config("http://localhost:8000");

        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:8000");
    }

    #[test]
    fn env_var_overrides_configured_base_url() {
        let _env = ENV_LOCK.lock().unwrap();
        std::env::set_var(BASE_URL_ENV, "http://override:9000");
        let (_dir, path) = write_config("http://localhost:8000");

        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        std::env::remove_var(BASE_URL_ENV);
        assert_eq!(config.catalog.base_url, "http://override:9000");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load_from("/nonexistent/config.toml").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }
}
