//! # Wave-Hive - Music Track Licensing & Collaboration Contract
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A deterministic ledger of music tracks, the licenses bought on them and
//! the collaboration agreements between their creators and invitees. The
//! chain hosting the contract is an external collaborator: it orders calls,
//! names the caller and reports the block height.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Track and license ids run 1, 2, 3, … with no gaps | `domain/state.rs` - counters advance on commit only |
//! | Licenses reference an existing track | `domain/state.rs` - `purchase_license()` |
//! | Only the creator proposes, only the invitee answers | `domain/invariants.rs` |
//! | Royalty share within [0, 100] | `domain/invariants.rs` - `invariant_royalty_share()` |
//! | Collaborators only grow, one per acceptance | `domain/entities.rs` - `Track::add_collaborator()` |
//! | Rejected calls change nothing | `domain/state.rs` - validate first, write last |
//!
//! ## Module Structure
//!
//! ```text
//! wave-hive/
//! ├── domain/      # Track, License, CollaborationProposal, state machine, errors
//! ├── ports/       # WaveHiveApi, WaveHiveQuery, EventSink, call surface
//! ├── adapters/    # EventLog, SimulatedChain
//! ├── events.rs    # Contract events
//! └── service.rs   # Locking, events, stats, tracing
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use wave_hive::prelude::*;
//!
//! let mut chain = SimulatedChain::default();
//! let deployer = Principal::new("deployer").unwrap();
//!
//! let block = chain.mine_block(vec![Tx::contract_call(
//!     ContractCall::CreateTrack {
//!         title: "My First Track".into(),
//!         license_price: Some(1000),
//!         license_duration: Some(100),
//!     },
//!     deployer,
//! )]);
//! assert_eq!(block.receipts[0].ok_uint(), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{Block, EventLog, Receipt, ReceiptError, SimulatedChain, Tx};
    pub use crate::domain::{
        BlankPrincipal, BlockHeight, CallContext, CollaborationProposal, ConfigError, ErrorKind,
        License, LicenseId, LicenseView, Principal, ProposalStatus, ProposalView, Track, TrackId,
        TrackView, WaveHiveConfig, WaveHiveError, WaveHiveState,
    };
    pub use crate::events::WaveHiveEvent;
    pub use crate::ports::{
        CallOutput, ContractCall, EventSink, NoopEventSink, ReadOnlyCall, ReadOnlyOutput,
        WaveHiveApi, WaveHiveQuery,
    };
    pub use crate::service::{create_test_service, ServiceStats, WaveHiveService};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contract name as deployed.
pub const CONTRACT_NAME: &str = "wave-hive";
