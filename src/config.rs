//! # Console Configuration
//!
//! Read once at startup. Sources, lowest precedence first:
//!
//! 1. Built-in defaults ([`ConsoleConfig::default`]).
//! 2. A TOML file ([`ConsoleConfig::load`]); missing keys keep their defaults.
//! 3. Environment variables ([`ConsoleConfig::with_env_overrides`]):
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ESTATE_CONSOLE_PER_PAGE` | `default_per_page` |
//! | `ESTATE_CONSOLE_REPORT_PER_PAGE` | `report_per_page` |
//! | `ESTATE_CONSOLE_API_PREFIX` | `api_prefix` |
//!
//! ```rust
//! use estate_console::config::ConsoleConfig;
//!
//! let config = ConsoleConfig::from_toml_str("report_per_page = 100").unwrap();
//! assert_eq!(config.report_per_page, 100);
//! assert_eq!(config.default_per_page, 10);
//! assert_eq!(config.endpoint("/leads"), "/api/leads");
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_PER_PAGE: &str = "ESTATE_CONSOLE_PER_PAGE";
pub const ENV_REPORT_PER_PAGE: &str = "ESTATE_CONSOLE_REPORT_PER_PAGE";
pub const ENV_API_PREFIX: &str = "ESTATE_CONSOLE_API_PREFIX";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Initial `per_page` of every list module.
    pub default_per_page: u32,
    /// Initial `per_page` of the report modules.
    pub report_per_page: u32,
    /// Prefix prepended to every operation path.
    pub api_prefix: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            report_per_page: 50,
            api_prefix: "/api".to_owned(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file, then applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)?.with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PER_PAGE) {
            self.default_per_page = parse_count(ENV_PER_PAGE, &value)?;
        }
        if let Some(value) = lookup(ENV_REPORT_PER_PAGE) {
            self.report_per_page = parse_count(ENV_REPORT_PER_PAGE, &value)?;
        }
        if let Some(value) = lookup(ENV_API_PREFIX) {
            self.api_prefix = value;
        }
        self.validate()?;
        Ok(self)
    }

    /// Full operation path for a collection path such as `/leads`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_prefix.trim_end_matches('/'), path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_per_page == 0 {
            return Err(ConfigError::Invalid("default_per_page must be at least 1".into()));
        }
        if self.report_per_page == 0 {
            return Err(ConfigError::Invalid("report_per_page must be at least 1".into()));
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "api_prefix must start with '/': {}",
                self.api_prefix
            )));
        }
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{key} must be a positive integer, got {value:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.default_per_page, 10);
        assert_eq!(config.report_per_page, 50);
        assert_eq!(config.endpoint("/owners"), "/api/owners");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConsoleConfig::from_toml_str("api_prefix = \"/v2/\"").unwrap();
        assert_eq!(config.default_per_page, 10);
        assert_eq!(config.endpoint("/leads"), "/v2/leads");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ConsoleConfig::from_toml_str("default_per_page = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ConsoleConfig::from_toml_str("default_per_page = \"ten\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ConsoleConfig::from_toml_str("api_prefix = \"api\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_overrides_win() {
        let env = HashMap::from([
            (ENV_PER_PAGE, "25".to_owned()),
            (ENV_API_PREFIX, "".to_owned()),
        ]);
        let config = ConsoleConfig::default()
            .with_overrides(|key| env.get(key).cloned())
            .unwrap();
        assert_eq!(config.default_per_page, 25);
        assert_eq!(config.report_per_page, 50);
        assert_eq!(config.endpoint("/leads"), "/leads");

        let bad = HashMap::from([(ENV_REPORT_PER_PAGE, "many".to_owned())]);
        let result = ConsoleConfig::default().with_overrides(|key| bad.get(key).cloned());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConsoleConfig::load("/nonexistent/estate-console.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
