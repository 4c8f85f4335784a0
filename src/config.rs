//! Configuration management for nasalstage
//!
//! Settings are loaded from environment variables with defaults. The staging
//! thresholds themselves are not configurable; see
//! [`ReferenceNormals::STANDARD`](crate::severity::ReferenceNormals::STANDARD).
//!
//! # Environment Variables
//!
//! - `NASALSTAGE_LOG_LEVEL`: Logging level - default: "info"
//! - `NASALSTAGE_LOG_JSON`: Emit JSON log lines (true|false) - default: "false"
//! - `NASALSTAGE_FORMAT`: Default output format (json|yaml|human) - default: "human"
//!
//! # Example
//!
//! ```no_run
//! use nasalstage::NasalstageConfig;
//!
//! let config = NasalstageConfig::default();
//! config.validate().expect("Invalid configuration");
//! let format = config.output_format().expect("Invalid output format");
//! ```

use crate::cli::output::OutputFormat;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_JSON: bool = false;
const DEFAULT_FORMAT: &str = "human";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Unknown output format name
    #[error("Invalid output format: {0}. Valid options: json, yaml, human")]
    InvalidFormat(String),
}

#[derive(Debug, Clone)]
pub struct NasalstageConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Output format used when no `--format` flag is given
    pub format: String,
}

impl Default for NasalstageConfig {
    /// Loads from `NASALSTAGE_*` environment variables, falling back to defaults
    fn default() -> Self {
        let log_level = env::var("NASALSTAGE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("NASALSTAGE_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        let format = env::var("NASALSTAGE_FORMAT")
            .unwrap_or_else(|_| DEFAULT_FORMAT.to_string())
            .to_lowercase();

        Self {
            log_level,
            log_json,
            format,
        }
    }
}

impl NasalstageConfig {
    /// Checks the log level and output format
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any setting is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        self.output_format()?;
        Ok(())
    }

    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        self.format
            .parse::<OutputFormat>()
            .map_err(|_| ConfigError::InvalidFormat(self.format.clone()))
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());
        map.insert("format".to_string(), self.format.clone());
        map
    }
}

impl fmt::Display for NasalstageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nasalstage Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        writeln!(f, "  Output Format: {}", self.format)?;
        Ok(())
    }
}
