use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::query::{DEFAULT_NUMERIC_COLUMN, DEFAULT_PAGE_SIZE};
use crate::infra::sample::SAMPLE_SIZE;
use crate::usecase::engine::EngineSettings;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page_size: usize,
    /// Records generated when the app starts without an import.
    pub sample_size: usize,
    pub sample_seed: Option<u64>,
    pub numeric_columns: Vec<String>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sample_size: SAMPLE_SIZE,
            sample_seed: None,
            numeric_columns: vec![DEFAULT_NUMERIC_COLUMN.to_string()],
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `config.toml` from the platform config directory. A missing
    /// file, or a platform without one, gives the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match project_dirs() {
            Some(dirs) => Self::load_from(&dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            page_size: self.page_size,
            numeric_columns: self.numeric_columns.clone(),
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "shelf", "shelf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("should create temp dir");

        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE_NAME))
            .expect("missing config should not fail");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "page_size = 25\nsample_seed = 9\n").expect("should write config");

        let config = AppConfig::load_from(&path).expect("config should load");

        assert_eq!(config.page_size, 25);
        assert_eq!(config.sample_seed, Some(9));
        assert_eq!(config.sample_size, SAMPLE_SIZE);
        assert_eq!(config.numeric_columns, vec!["PublishedYear".to_string()]);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "page_size = 0\n").expect("should write config");

        let result = AppConfig::load_from(&path);

        assert!(matches!(result, Err(ConfigError::Invalid(_))), "{result:?}");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "page_size = = 3").expect("should write config");

        let result = AppConfig::load_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })), "{result:?}");
    }
}
