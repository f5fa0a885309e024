//! Interpreter configuration
//!
//! Values come from an optional TOML file and may be overridden from the
//! command line. Every field has a default so an empty file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{PlanError, Result};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "plankeeper.toml";

/// Configuration for a session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the plan snapshot is loaded from and saved to
    pub data_file: PathBuf,

    /// Where the line editor keeps its history between sessions
    pub history_file: PathBuf,

    /// Maximum number of history entries kept by the line editor
    pub history_size: usize,

    /// Prompt shown at the command level
    pub prompt: String,

    /// Owner name applied to a plan that has none
    pub owner: String,

    /// Vision statement applied to a plan that has none
    pub vision: String,

    /// Whether notices are colored
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("plan.json"),
            history_file: PathBuf::from(".plankeeper_history"),
            history_size: 500,
            prompt: "plan> ".to_string(),
            owner: String::new(),
            vision: String::new(),
            color: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| PlanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.history_size == 0 {
            return Err(PlanError::Config("history_size must be positive".into()));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(PlanError::Config("data_file must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml_overrides_fields() {
        let config = Config::from_toml(
            r#"
            data_file = "mine.json"
            owner = "Ada"
            vision = "Healthy and well read"
            color = false
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("mine.json"));
        assert_eq!(config.owner, "Ada");
        assert_eq!(config.vision, "Healthy and well read");
        assert!(!config.color);
        assert_eq!(config.history_size, 500);
    }

    #[test]
    fn test_zero_history_rejected() {
        let result = Config::from_toml("history_size = 0");
        assert!(matches!(result, Err(PlanError::Config(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_toml("colour = true");
        assert!(matches!(result, Err(PlanError::Config(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
