//! Cross-module tests driving the contract the way a chain would.

pub mod concurrency;
pub mod properties;
