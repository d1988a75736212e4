//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits and the simulated chain that drives the
//! contract.

mod chain;
mod event_log;

pub use chain::{Block, Receipt, ReceiptError, SimulatedChain, Tx};
pub use event_log::EventLog;
