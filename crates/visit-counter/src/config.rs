//! Function configuration

use std::env;

/// Service name used when `POWERTOOLS_SERVICE_NAME` is unset
pub const DEFAULT_SERVICE_NAME: &str = "service_undefined";

/// Configuration loaded from the Lambda environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// DynamoDB table holding visit records
    pub table_name: String,

    /// Service name attached to every invocation span
    pub service_name: String,

    /// Whether invocation spans are emitted at all
    pub tracing_enabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

impl AppConfig {
    pub fn new(table_name: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            service_name: service_name.into(),
            tracing_enabled: true,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Ok(Self {
            table_name: non_empty("TABLE_NAME").ok_or(ConfigError::Missing("TABLE_NAME"))?,

            service_name: non_empty("POWERTOOLS_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            tracing_enabled: !non_empty("POWERTOOLS_TRACE_DISABLED")
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("TABLE_NAME", "visit-count-table")])).unwrap();

        assert_eq!(config.table_name, "visit-count-table");
        assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
        assert!(config.tracing_enabled);
    }

    #[test]
    fn test_missing_table_name() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("TABLE_NAME")));

        let err = AppConfig::from_lookup(lookup(&[("TABLE_NAME", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("TABLE_NAME")));
    }

    #[test]
    fn test_service_name_and_trace_flag() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TABLE_NAME", "t"),
            ("POWERTOOLS_SERVICE_NAME", "visits"),
            ("POWERTOOLS_TRACE_DISABLED", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.service_name, "visits");
        assert!(!config.tracing_enabled);
    }

    #[test]
    fn test_trace_flag_false_values() {
        for value in ["0", "false", "no", "off"] {
            let config = AppConfig::from_lookup(lookup(&[
                ("TABLE_NAME", "t"),
                ("POWERTOOLS_TRACE_DISABLED", value),
            ]))
            .unwrap();
            assert!(config.tracing_enabled, "{value} should keep tracing on");
        }
    }
}
