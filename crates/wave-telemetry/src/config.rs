//! Telemetry configuration from environment variables.

use std::env;

use crate::TelemetryError;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full directive
    pub log_level: String,

    /// Whether to write logs to the console at all
    pub console_output: bool,

    /// Whether to format logs as JSON
    pub json_logs: bool,

    /// Network label (simnet, devnet, testnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "wave-hive".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "simnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: wave-hive)
    /// - `WH_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `WH_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `WH_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `WH_NETWORK`: Network name (default: simnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "wave-hive".to_string()),

            log_level: env::var("WH_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("WH_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, true))
                .unwrap_or(true),

            json_logs: env::var("WH_JSON_LOGS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(is_container),

            network: env::var("WH_NETWORK").unwrap_or_else(|_| "simnet".to_string()),
        }
    }

    /// Builder-style override for the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Builder-style override for JSON output.
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Reject configurations the subscriber cannot use.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.service_name.trim().is_empty() {
            return Err(TelemetryError::Config("service name is empty".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(TelemetryError::Config("log level is empty".into()));
        }
        Ok(())
    }
}

/// `"true"`/`"1"` and `"false"`/`"0"` in any case; anything else is `default`.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => default,
    }
}
