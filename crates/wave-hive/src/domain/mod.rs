//! # Domain Module
//!
//! Core domain types and the contract state machine.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod state;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use state::WaveHiveState;
pub use value_objects::*;
