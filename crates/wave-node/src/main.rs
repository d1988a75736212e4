//! Wave-Node: replay a Wave-Hive scenario on a simulated chain.
//!
//! ## Usage
//!
//! ```bash
//! # Replay and print the report
//! wave-node scenarios/licensing.json --pretty
//!
//! # Start the chain tip at height 1000 and dump metrics afterwards
//! wave-node scenarios/licensing.json --start-height 1000 --metrics
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use wave_hive::domain::WaveHiveConfig;
use wave_node::Scenario;
use wave_telemetry::{gather_metrics, init_telemetry, TelemetryConfig};

/// Wave-Hive scenario runner
#[derive(Parser, Debug)]
#[command(name = "wave-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Tip height before the first step
    #[arg(long, default_value = "0")]
    start_height: u64,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    /// Print Prometheus metrics after the report
    #[arg(long)]
    metrics: bool,

    /// Log level filter (overrides WH_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    let guard = init_telemetry(telemetry).context("Failed to initialize telemetry")?;

    let path = args.scenario.clone();
    let scenario = tokio::task::spawn_blocking(move || Scenario::load(&path))
        .await
        .context("Scenario loader panicked")??;

    let fallback = WaveHiveConfig::from_env();
    fallback
        .validate()
        .context("Invalid contract configuration in environment")?;
    let config = scenario.effective_config(fallback);

    let report = scenario.replay(config, args.start_height);
    info!(
        service = guard.service_name(),
        committed = report.committed(),
        rejected = report.rejected(),
        "[wave-node] Replay finished"
    );

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    if args.metrics {
        println!("{}", gather_metrics()?);
    }

    Ok(())
}
