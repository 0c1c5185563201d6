//! Launch parameters resolved from the environment.

use crate::config::ConfigError;
use crate::consts::{
    DEFAULT_HOST, DEFAULT_PATH, DEFAULT_PORT, DEFAULT_TRANSPORT, ENV_HOST, ENV_LLM_PROVIDER,
    ENV_PATH, ENV_PORT, ENV_TRANSPORT, REQUIRED_VARS,
};
use std::env::VarError;

/// Startup parameters for the MCP server.
///
/// Built once at process start and read-only afterwards. A value of this
/// type always carries a non-empty `provider`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub transport: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub provider: String,
}

impl LaunchConfig {
    /// Resolve from an arbitrary variable source with `std::env::var` semantics.
    ///
    /// Unset variables take their defaults; a variable set to the empty
    /// string is passed through as is. The port is parsed before the
    /// required variables are checked.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidPort` if the port is not an integer in `1..=65535`
    /// - `ConfigError::MissingVariables` if the provider is unset or empty
    /// - `ConfigError::NotUnicode` if any recognised variable is not UTF-8
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Result<String, VarError>,
    {
        let mut read = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name) {
                Ok(value) => Ok(Some(value)),
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
            }
        };

        let transport = read(ENV_TRANSPORT)?.unwrap_or_else(|| DEFAULT_TRANSPORT.to_string());
        let host = read(ENV_HOST)?.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match read(ENV_PORT)? {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };
        let path = read(ENV_PATH)?.unwrap_or_else(|| DEFAULT_PATH.to_string());

        let provider = read(ENV_LLM_PROVIDER)?.filter(|value| !value.is_empty());
        let Some(provider) = provider else {
            return Err(ConfigError::MissingVariables(REQUIRED_VARS.to_vec()));
        };

        Ok(Self {
            transport,
            host,
            port,
            path,
            provider,
        })
    }

    /// Flags forwarded to the server, in the order both strategies use.
    pub fn server_args(&self) -> Vec<String> {
        vec![
            "--transport".to_string(),
            self.transport.clone(),
            "--host".to_string(),
            self.host.clone(),
            "--port".to_string(),
            self.port.to_string(),
            "--path".to_string(),
            self.path.clone(),
        ]
    }
}

/// Parse a port, tolerating surrounding whitespace.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidPort {
        value: raw.to_string(),
        reason,
    };

    let port: u16 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if port == 0 {
        return Err(invalid("port 0 is not bindable".to_string()));
    }
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl FnMut(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn test_defaults_with_provider_only() {
        let config =
            LaunchConfig::from_lookup(lookup(&[("COGNEE_LLM_PROVIDER", "openai")])).unwrap();
        assert_eq!(config.transport, "http");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.path, "/mcp");
        assert_eq!(config.provider, "openai");
    }

    #[test]
    fn test_overrides_are_used() {
        let config = LaunchConfig::from_lookup(lookup(&[
            ("TRANSPORT_MODE", "sse"),
            ("COGNEE_HOST", "127.0.0.1"),
            ("COGNEE_PORT", "9001"),
            ("COGNEE_PATH", "/cognee"),
            ("COGNEE_LLM_PROVIDER", "ollama"),
        ]))
        .unwrap();
        assert_eq!(config.transport, "sse");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9001);
        assert_eq!(config.path, "/cognee");
    }

    #[test]
    fn test_missing_provider() {
        let err = LaunchConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVariables(vec!["COGNEE_LLM_PROVIDER"]));
    }

    #[test]
    fn test_empty_provider_counts_as_missing() {
        let err = LaunchConfig::from_lookup(lookup(&[("COGNEE_LLM_PROVIDER", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVariables(_)));
    }

    #[test]
    fn test_empty_host_is_passed_through() {
        let config = LaunchConfig::from_lookup(lookup(&[
            ("COGNEE_HOST", ""),
            ("COGNEE_LLM_PROVIDER", "openai"),
        ]))
        .unwrap();
        assert_eq!(config.host, "");
    }

    #[test]
    fn test_bad_port_wins_over_missing_provider() {
        let err = LaunchConfig::from_lookup(lookup(&[("COGNEE_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8000").unwrap(), 8000);
        assert_eq!(parse_port(" 9001\n").unwrap(), 9001);
        assert_eq!(parse_port("65535").unwrap(), 65535);
        assert!(parse_port("0").is_err());
        assert!(parse_port("65536").is_err());
        assert!(parse_port("-1").is_err());
        assert!(parse_port("").is_err());
        assert!(parse_port("80.5").is_err());
    }

    #[test]
    fn test_not_unicode_is_reported_by_name() {
        let err = LaunchConfig::from_lookup(|name| {
            if name == "COGNEE_PATH" {
                Err(VarError::NotUnicode("\u{fffd}".into()))
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::NotUnicode { name: "COGNEE_PATH" });
    }

    #[test]
    fn test_server_args_order() {
        let config = LaunchConfig::from_lookup(lookup(&[
            ("COGNEE_PORT", "9001"),
            ("COGNEE_LLM_PROVIDER", "openai"),
        ]))
        .unwrap();
        assert_eq!(
            config.server_args(),
            ["--transport", "http", "--host", "0.0.0.0", "--port", "9001", "--path", "/mcp"]
        );
    }
}
