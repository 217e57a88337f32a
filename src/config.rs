//! Configuration file
//!
//! A JSON object; every field is optional:
//!
//! ```json
//! {
//!   "strict_numbers": false,
//!   "strict_structure": false,
//!   "strict_rows": false,
//!   "index_column": "NAME",
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::ParseOptions;
use crate::frame::TextMode;
use crate::observability::Severity;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid log_level '{0}', expected trace, info, warn or error")]
    InvalidLogLevel(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "TFS_CONFIG_READ_FAILED",
            ConfigError::Parse(_) => "TFS_CONFIG_INVALID",
            ConfigError::InvalidLogLevel(_) => "TFS_CONFIG_INVALID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfsConfig {
    /// Reject numeric tokens with trailing garbage
    #[serde(default)]
    pub strict_numbers: bool,

    /// Reject unrecognized pre-data lines and unknown type tags
    #[serde(default)]
    pub strict_structure: bool,

    /// Reject rows whose value count differs from the column count
    #[serde(default)]
    pub strict_rows: bool,

    /// String column used to index rows by name
    #[serde(default)]
    pub index_column: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TfsConfig {
    fn default() -> Self {
        Self {
            strict_numbers: false,
            strict_structure: false,
            strict_rows: false,
            index_column: None,
            log_level: default_log_level(),
        }
    }
}

impl TfsConfig {
    /// Load and validate the configuration at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: TfsConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.min_severity().map(|_| ())
    }

    pub fn min_severity(&self) -> Result<Severity, ConfigError> {
        Severity::from_name(&self.log_level)
            .ok_or_else(|| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Parse options described by this configuration
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            numbers: if self.strict_numbers {
                TextMode::Strict
            } else {
                TextMode::Lenient
            },
            strict_structure: self.strict_structure,
            strict_rows: self.strict_rows,
            index_column: self.index_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = TfsConfig::from_json("{}").unwrap();
        assert_eq!(config, TfsConfig::default());
        assert_eq!(config.parse_options(), ParseOptions::default());
        assert_eq!(config.min_severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_fields_map_to_options() {
        let config = TfsConfig::from_json(
            r#"{"strict_numbers": true, "strict_rows": true, "index_column": "NAME"}"#,
        )
        .unwrap();
        let options = config.parse_options();
        assert_eq!(options.numbers, TextMode::Strict);
        assert!(options.strict_rows);
        assert!(!options.strict_structure);
        assert_eq!(options.index_column(), Some("NAME"));
    }

    #[test]
    fn test_invalid_log_level() {
        let err = TfsConfig::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
        assert_eq!(err.code(), "TFS_CONFIG_INVALID");
    }

    #[test]
    fn test_invalid_json() {
        let err = TfsConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "WARN"}}"#).unwrap();
        let config = TfsConfig::load(file.path()).unwrap();
        assert_eq!(config.min_severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TfsConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), "TFS_CONFIG_READ_FAILED");
    }
}
