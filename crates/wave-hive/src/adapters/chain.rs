//! Simulated Chain Adapter
//!
//! Plays the role of the external sequencer: mines blocks of contract calls
//! in order, supplies the caller and block height to each call, and returns
//! one receipt per call with the events it emitted. Read-only calls run at
//! the current tip height.
//!
//! No consensus, no fees, no signatures. The sender of a `Tx` is trusted.

use crate::adapters::EventLog;
use crate::domain::{
    BlockHeight, CallContext, ErrorKind, Principal, WaveHiveConfig, WaveHiveError,
};
use crate::events::WaveHiveEvent;
use crate::ports::inbound::{CallOutput, ContractCall, ReadOnlyCall, ReadOnlyOutput};
use crate::service::WaveHiveService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// A contract call signed (by assumption) by `sender`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    /// Calling principal.
    pub sender: Principal,
    /// Call to execute.
    #[serde(flatten)]
    pub call: ContractCall,
}

impl Tx {
    /// Build a contract-call transaction.
    pub fn contract_call(call: ContractCall, sender: Principal) -> Self {
        Self { sender, call }
    }
}

/// Error half of a receipt, in wire form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptError {
    /// Contract error code, `(err uNNN)`.
    pub code: u32,
    /// Coarse classification.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl From<&WaveHiveError> for ReceiptError {
    fn from(err: &WaveHiveError) -> Self {
        Self {
            code: err.code(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one transaction in a mined block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Position in the block.
    pub tx_index: usize,
    /// Calling principal.
    pub sender: Principal,
    /// Contract function invoked.
    pub function: String,
    /// `(ok ...)` or `(err uNNN)`.
    pub result: Result<CallOutput, ReceiptError>,
    /// Events emitted; empty when the call was rejected.
    pub events: Vec<WaveHiveEvent>,
}

impl Receipt {
    /// Whether the call committed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The uint carried by an `(ok uN)` result.
    pub fn ok_uint(&self) -> Option<u64> {
        self.result.as_ref().ok().and_then(CallOutput::as_uint)
    }

    /// Error code of an `(err uNNN)` result.
    pub fn err_code(&self) -> Option<u32> {
        self.result.as_ref().err().map(|e| e.code)
    }
}

/// A mined block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block height.
    pub height: BlockHeight,
    /// One receipt per transaction, in order.
    pub receipts: Vec<Receipt>,
}

/// In-memory chain hosting one Wave-Hive contract.
pub struct SimulatedChain {
    service: Arc<WaveHiveService<EventLog>>,
    events: Arc<EventLog>,
    block_height: BlockHeight,
}

impl SimulatedChain {
    /// Deploy a fresh contract at height 0.
    pub fn new(config: WaveHiveConfig) -> Self {
        Self::starting_at(config, 0)
    }

    /// Deploy a fresh contract with the tip at `height`.
    pub fn starting_at(config: WaveHiveConfig, height: BlockHeight) -> Self {
        let events = Arc::new(EventLog::new());
        let service = Arc::new(WaveHiveService::new(config, Arc::clone(&events)));
        info!(height, "[wave-hive] Simulated chain started");
        Self {
            service,
            events,
            block_height: height,
        }
    }

    /// Current tip height.
    pub fn block_height(&self) -> BlockHeight {
        self.block_height
    }

    /// The hosted contract service.
    pub fn service(&self) -> &Arc<WaveHiveService<EventLog>> {
        &self.service
    }

    /// Mine one block containing `txs`, executed in order at the new height.
    pub fn mine_block(&mut self, txs: Vec<Tx>) -> Block {
        self.block_height = self.block_height.saturating_add(1);
        let height = self.block_height;

        // Anything published outside a block does not belong to this one.
        self.events.drain();

        let receipts: Vec<Receipt> = txs
            .into_iter()
            .enumerate()
            .map(|(tx_index, tx)| {
                let ctx = CallContext::new(tx.sender.clone(), height);
                let result = self
                    .service
                    .execute(&ctx, &tx.call)
                    .map_err(|e| ReceiptError::from(&e));
                Receipt {
                    tx_index,
                    sender: tx.sender,
                    function: tx.call.function_name().to_string(),
                    result,
                    events: self.events.drain(),
                }
            })
            .collect();

        debug!(
            height,
            txs = receipts.len(),
            committed = receipts.iter().filter(|r| r.is_ok()).count(),
            "[wave-hive] Block mined"
        );
        #[cfg(feature = "metrics")]
        wave_telemetry::CHAIN_HEIGHT.set(height as f64);

        Block { height, receipts }
    }

    /// Mine `count` empty blocks and return the new tip height.
    pub fn mine_empty_blocks(&mut self, count: u64) -> BlockHeight {
        self.block_height = self.block_height.saturating_add(count);
        #[cfg(feature = "metrics")]
        wave_telemetry::CHAIN_HEIGHT.set(self.block_height as f64);
        self.block_height
    }

    /// Run a read-only call at the current tip.
    pub fn call_read_only(&self, call: &ReadOnlyCall) -> Result<ReadOnlyOutput, WaveHiveError> {
        self.service.query(call, self.block_height)
    }
}

impl Default for SimulatedChain {
    fn default() -> Self {
        Self::new(WaveHiveConfig::default())
    }
}
