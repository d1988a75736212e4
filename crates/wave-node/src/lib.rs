//! # Wave Node
//!
//! Replays Wave-Hive scenarios against a [`SimulatedChain`].
//!
//! A scenario is a JSON document listing steps in order:
//!
//! ```json
//! {
//!   "name": "licensing",
//!   "steps": [
//!     { "block": [
//!         { "sender": "deployer", "function": "create-track",
//!           "title": "Licensed Track", "license-price": 1000, "license-duration": 100 }
//!     ] },
//!     { "advance": 50 },
//!     { "read-only": { "function": "is-license-valid", "license-id": 1 } }
//!   ]
//! }
//! ```
//!
//! `block` mines one block of transactions, `advance` mines empty blocks,
//! `read-only` runs a query at the current tip.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use wave_hive::prelude::*;

/// Scenario loading errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The scenario is not valid JSON for the scenario schema.
    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// The scenario's contract configuration was rejected.
    #[error("invalid contract configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// One step of a scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Mine one block holding these transactions.
    Block(Vec<Tx>),
    /// Mine this many empty blocks.
    Advance(u64),
    /// Run a read-only call at the tip.
    ReadOnly(ReadOnlyCall),
}

/// A replayable scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contract configuration; omitted fields take their defaults.
    #[serde(default)]
    pub config: Option<WaveHiveConfig>,
    /// Steps, in order.
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        if let Some(config) = &scenario.config {
            config.validate()?;
        }
        Ok(scenario)
    }

    /// Read and parse a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Contract configuration for this run: the scenario's own, else `fallback`.
    pub fn effective_config(&self, fallback: WaveHiveConfig) -> WaveHiveConfig {
        self.config.clone().unwrap_or(fallback)
    }

    /// Replay every step on a fresh chain whose tip starts at `start_height`.
    pub fn replay(&self, config: WaveHiveConfig, start_height: BlockHeight) -> ScenarioReport {
        let mut chain = SimulatedChain::starting_at(config, start_height);
        let mut report = ScenarioReport {
            name: self.name.clone(),
            blocks: Vec::new(),
            queries: Vec::new(),
            final_height: start_height,
            stats: ServiceStats::default(),
        };

        info!(name = %self.name, steps = self.steps.len(), "[wave-node] Replaying scenario");

        for step in &self.steps {
            match step {
                Step::Block(txs) => {
                    let block = chain.mine_block(txs.clone());
                    debug!(height = block.height, "[wave-node] Block applied");
                    report.blocks.push(block);
                }
                Step::Advance(count) => {
                    let height = chain.mine_empty_blocks(*count);
                    debug!(height, "[wave-node] Advanced");
                }
                Step::ReadOnly(call) => {
                    let result = chain
                        .call_read_only(call)
                        .map_err(|e| ReceiptError::from(&e));
                    report.queries.push(QueryOutcome {
                        height: chain.block_height(),
                        function: call.function_name().to_string(),
                        result,
                    });
                }
            }
        }

        report.final_height = chain.block_height();
        report.stats = chain.service().stats();

        info!(
            name = %self.name,
            blocks = report.blocks.len(),
            queries = report.queries.len(),
            final_height = report.final_height,
            committed = report.stats.calls_committed,
            rejected = report.stats.calls_rejected,
            "[wave-node] Scenario complete"
        );

        report
    }
}

/// Result of one read-only step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    /// Height the query ran at.
    pub height: BlockHeight,
    /// Read-only function name.
    pub function: String,
    /// Query result.
    pub result: Result<ReadOnlyOutput, ReceiptError>,
}

/// Everything a replay produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Mined blocks with receipts.
    pub blocks: Vec<Block>,
    /// Read-only results, in step order.
    pub queries: Vec<QueryOutcome>,
    /// Tip height after the last step.
    pub final_height: BlockHeight,
    /// Contract service counters.
    pub stats: ServiceStats,
}

impl ScenarioReport {
    /// Number of transactions that committed.
    pub fn committed(&self) -> usize {
        self.receipts().filter(|r| r.is_ok()).count()
    }

    /// Number of transactions rejected with an error.
    pub fn rejected(&self) -> usize {
        self.receipts().filter(|r| !r.is_ok()).count()
    }

    fn receipts(&self) -> impl Iterator<Item = &Receipt> {
        self.blocks.iter().flat_map(|b| b.receipts.iter())
    }
}
