//! # Wave Telemetry
//!
//! Observability for the Wave-Hive contract and its node.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber, pretty for development, JSON for log shippers
//! - **Metrics**: Prometheus counters and gauges in a crate-local registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wave_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `wave-hive` | Service name attached to logs |
//! | `WH_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `WH_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |
//! | `WH_CONSOLE_OUTPUT` | `true` | Write logs to stderr at all |
//! | `WH_NETWORK` | `simnet` | Network label |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_metrics, register_metrics, MetricsHandle, CALLS_REJECTED, CHAIN_HEIGHT,
    COLLABORATIONS, LICENSES_PURCHASED, QUERIES_SERVED, REGISTRY, TRACKS_CREATED,
};
pub use tracing_setup::{init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first, so anything logged during setup can already count.
    let metrics_handle = register_metrics()?;
    let tracing_guard = init_tracing(&config)?;

    Ok(TelemetryGuard {
        tracing: tracing_guard,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    tracing: TracingGuard,
    _metrics: MetricsHandle,
}

impl TelemetryGuard {
    /// Service name telemetry was installed for.
    pub fn service_name(&self) -> &str {
        self.tracing.service_name()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(
            service = self.service_name(),
            "[wave-telemetry] Shutting down telemetry"
        );
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
