//! Prometheus metrics for the Wave-Hive contract.
//!
//! All metrics follow the naming convention: `wh_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., tracks_created_total)
//! - **Gauge**: Value that can go up or down (e.g., chain_height)

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CATALOG METRICS
    // =========================================================================

    /// Total tracks registered
    pub static ref TRACKS_CREATED: Counter = Counter::new(
        "wh_catalog_tracks_created_total",
        "Total number of tracks registered"
    ).expect("metric creation failed");

    // =========================================================================
    // LICENSING METRICS
    // =========================================================================

    /// Total licenses purchased
    pub static ref LICENSES_PURCHASED: Counter = Counter::new(
        "wh_licensing_licenses_purchased_total",
        "Total number of licenses purchased"
    ).expect("metric creation failed");

    // =========================================================================
    // COLLABORATION METRICS
    // =========================================================================

    /// Collaboration proposals by outcome
    pub static ref COLLABORATIONS: CounterVec = CounterVec::new(
        Opts::new("wh_collab_transitions_total", "Collaboration proposal transitions"),
        &["outcome"]  // outcome: proposed/accepted/rejected
    ).expect("metric creation failed");

    // =========================================================================
    // CALL METRICS
    // =========================================================================

    /// Rejected contract calls by function and error kind
    pub static ref CALLS_REJECTED: CounterVec = CounterVec::new(
        Opts::new("wh_calls_rejected_total", "Contract calls rejected with an error"),
        &["function", "kind"]  // kind: not_found/unauthorized/invalid_argument/invalid_state
    ).expect("metric creation failed");

    /// Read-only calls served by function
    pub static ref QUERIES_SERVED: CounterVec = CounterVec::new(
        Opts::new("wh_queries_served_total", "Read-only calls served"),
        &["function"]
    ).expect("metric creation failed");

    // =========================================================================
    // CHAIN METRICS
    // =========================================================================

    /// Current chain height
    pub static ref CHAIN_HEIGHT: Gauge = Gauge::new(
        "wh_chain_height",
        "Current block height of the hosting chain"
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRACKS_CREATED.clone()),
        Box::new(LICENSES_PURCHASED.clone()),
        Box::new(COLLABORATIONS.clone()),
        Box::new(CALLS_REJECTED.clone()),
        Box::new(QUERIES_SERVED.clone()),
        Box::new(CHAIN_HEIGHT.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all registered metrics in Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
