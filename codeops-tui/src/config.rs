//! Configuration loading for the CodeOps console.
//!
//! A TOML file is read from `--config <path>` or `CODEOPS_CONFIG`. Without
//! either, the built-in defaults are used. Unknown keys are rejected.

use codeops_core::EngineMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CODEOPS_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuiConfig {
    pub api_base_url: String,
    pub solve_path: String,
    pub default_mode: EngineMode,
    pub tick_interval_ms: u64,
    pub log_path: PathBuf,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            solve_path: "/api/solve".to_string(),
            default_mode: EngineMode::Cloud,
            tick_interval_ms: 250,
            log_path: PathBuf::from("codeops.log"),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "ultra".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    /// Resolve the config from an explicit path, then the environment, then
    /// the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map(Path::to_path_buf).or_else(config_path_from_env);
        let config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Full URL of the solve endpoint.
    pub fn solve_url(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), self.solve_path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.solve_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "solve_path",
                reason: "must start with '/'".to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "ultra" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'ultra' is supported".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TuiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.solve_url(), "http://localhost:8000/api/solve");
        assert_eq!(config.default_mode, EngineMode::Cloud);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = TuiConfig::from_toml(
            r#"
            api_base_url = "http://solver.internal:9000/"
            default_mode = "local"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_mode, EngineMode::Local);
        assert_eq!(config.solve_url(), "http://solver.internal:9000/api/solve");
        assert_eq!(config.tick_interval_ms, 250);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = TuiConfig::from_toml("request_timeout_ms = 5000").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(TuiConfig::from_toml(r#"default_mode = "gpu""#).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = TuiConfig::default();
        config.solve_path = "api/solve".to_string();
        assert!(config.validate().is_err());

        let mut config = TuiConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = TuiConfig::default();
        config.api_base_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = TuiConfig::default();
        config.theme.name = "synthwave".to_string();
        assert!(config.validate().is_err());

        let mut config = TuiConfig::default();
        config.log_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_path_is_loaded_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codeops.toml");
        std::fs::write(&path, "tick_interval_ms = 0\n").unwrap();
        assert!(matches!(
            TuiConfig::load(Some(&path)),
            Err(ConfigError::InvalidValue { field: "tick_interval_ms", .. })
        ));

        std::fs::write(&path, "tick_interval_ms = 100\n").unwrap();
        let config = TuiConfig::load(Some(&path)).unwrap();
        assert_eq!(config.tick_interval_ms, 100);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            TuiConfig::from_path(&path),
            Err(ConfigError::MissingFile(_))
        ));
    }
}
