//! Configuration types and the launcher TOML file.
//!
//! Launch parameters come from the environment (see [`crate::launch`]).
//! The optional launcher file only tunes logging and the invocation targets.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! log_level = "debug"
//! service_name = "cognee-mcp-staging"
//!
//! [target]
//! interpreter = "/opt/venv/bin/python"
//! module = "cognee_mcp.server"
//! command = "cognee-mcp"
//! ```

use crate::consts::{
    DEFAULT_COMMAND, DEFAULT_INTERPRETER, DEFAULT_MODULE, DEFAULT_SERVICE_NAME,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Error type for configuration loading and validation.
///
/// Covers both the launcher file and the environment-derived
/// [`LaunchConfig`](crate::launch::LaunchConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// Required environment variables are unset or empty.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    /// Port is not an integer in `1..=65535`.
    #[error("Invalid port {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },

    /// Environment variable holds non UTF-8 data.
    #[error("Environment variable {name} is not valid unicode")]
    NotUnicode { name: &'static str },
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common fields shared by every launcher instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Instance identifier, attached to the launcher's log span.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: default_service_name(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Invocation targets for the two launch strategies.
///
/// Strategy A runs `<interpreter> -m <module>`, strategy B runs `<command>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TargetConfig {
    pub interpreter: String,
    pub module: String,
    pub command: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            module: DEFAULT_MODULE.to_string(),
            command: DEFAULT_COMMAND.to_string(),
        }
    }
}

impl TargetConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - any field is empty
    /// - `module` is not a dotted path of non-empty segments
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("interpreter", &self.interpreter),
            ("module", &self.module),
            ("command", &self.command),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "target.{field} cannot be empty"
                )));
            }
        }

        if self.module.starts_with('-') || self.module.split('.').any(str::is_empty) {
            return Err(ConfigError::ValidationError(format!(
                "target.module {:?} is not a dotted module path",
                self.module
            )));
        }
        Ok(())
    }
}

/// Contents of the optional launcher file (`--config`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherFile {
    #[serde(default)]
    pub shared: SharedConfig,

    #[serde(default)]
    pub target: TargetConfig,
}

impl LauncherFile {
    /// Load and validate a launcher file.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::load(path)?;
        file.shared.validate()?;
        file.target.validate()?;
        Ok(file)
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize)]
        struct TestWrapper {
            level: LogLevel,
        }

        for (raw, expected) in [
            ("trace", LogLevel::Trace),
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("error", LogLevel::Error),
        ] {
            let parsed: TestWrapper = toml::from_str(&format!("level = \"{raw}\"")).unwrap();
            assert_eq!(parsed.level, expected, "level {raw}");
        }
    }

    #[test]
    fn test_log_level_maps_to_tracing_level() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }

    #[test]
    fn test_shared_config_validation_empty_service_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "  ".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_target_defaults() {
        let target = TargetConfig::default();
        assert_eq!(target.interpreter, "python");
        assert_eq!(target.module, "cognee_mcp.server");
        assert_eq!(target.command, "cognee-mcp");
        assert!(target.validate().is_ok());
    }

    #[test]
    fn test_target_rejects_empty_command() {
        let target = TargetConfig {
            command: String::new(),
            ..TargetConfig::default()
        };
        let err = target.validate().unwrap_err();
        assert!(err.to_string().contains("target.command"));
    }

    #[test]
    fn test_target_rejects_malformed_module() {
        for module in ["cognee_mcp..server", ".server", "-c"] {
            let target = TargetConfig {
                module: module.to_string(),
                ..TargetConfig::default()
            };
            assert!(target.validate().is_err(), "module {module:?}");
        }
    }

    #[test]
    fn test_missing_variables_message() {
        let err = ConfigError::MissingVariables(vec!["COGNEE_LLM_PROVIDER"]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: COGNEE_LLM_PROVIDER"
        );
    }

    #[test]
    fn test_partial_target_section_keeps_defaults() {
        let file: LauncherFile = toml::from_str("[target]\ncommand = \"cognee\"\n").unwrap();
        assert_eq!(file.target.command, "cognee");
        assert_eq!(file.target.interpreter, "python");
        assert_eq!(file.shared, SharedConfig::default());
    }
}
