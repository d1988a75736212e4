//! # Wave-Hive Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── contract_flows.rs  # Call sequences against a simulated chain
//!     ├── properties.rs      # proptest invariants over random call streams
//!     └── concurrency.rs     # Concurrent callers against one service
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wave-hive-tests
//!
//! # By category
//! cargo test -p wave-hive-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p wave-hive-tests
//! ```

pub mod integration;
