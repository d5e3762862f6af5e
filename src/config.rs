//! Configuration file
//!
//! A single JSON object; every key is optional:
//!
//! ```json
//! { "unknown_fields": "ignore", "coerce": true, "log_level": "info" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::schema::{UnknownFieldPolicy, ValidatorOptions};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON or has unexpected keys
    #[error("invalid config JSON in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of its allowed set
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Undeclared document keys: "ignore" (default) or "reject"
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,

    /// Convert compatible values such as "30" for an int (default true)
    #[serde(default = "default_coerce")]
    pub coerce: bool,

    /// Lowest severity written to the log (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_coerce() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::default(),
            coerce: default_coerce(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Load from an optional path; `None` means defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from JSON text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".into(),
            source,
        })?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        self.min_severity()?;
        Ok(())
    }

    /// Parsed log threshold
    pub fn min_severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// Validator options described by this config
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            unknown_fields: self.unknown_fields,
            coerce: self.coerce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.validator_options(), ValidatorOptions::default());
        assert_eq!(config.min_severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_reject_and_strict() {
        let config =
            Config::from_json(r#"{"unknown_fields": "reject", "coerce": false, "log_level": "warn"}"#)
                .unwrap();
        let options = config.validator_options();
        assert_eq!(options.unknown_fields, UnknownFieldPolicy::Reject);
        assert!(!options.coerce);
        assert_eq!(config.min_severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let result = Config::from_json(r#"{"unknown_fields": "drop"}"#);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_json(r#"{"data_dir": "/tmp"}"#);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = Config::from_json(r#"{"log_level": "loud"}"#);
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"unknown_fields": "reject"}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.unknown_fields, UnknownFieldPolicy::Reject);
        assert!(config.coerce);
    }

    #[test]
    fn test_load_reports_path_on_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_no_path_means_defaults() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
