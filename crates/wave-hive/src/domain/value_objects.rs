//! # Domain Value Objects
//!
//! Immutable value types for the Wave-Hive contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Block height (logical time) as reported by the chain.
pub type BlockHeight = u64;

/// Caller identity supplied by the execution environment.
///
/// The contract never verifies it; whatever the chain says the caller is,
/// the caller is. Deserialization goes through the same non-blank check
/// as [`Principal::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

/// Empty or whitespace-only principal address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("principal address is blank")]
pub struct BlankPrincipal;

impl Principal {
    /// Create a principal from its address string.
    ///
    /// Returns `None` for an empty or whitespace-only address.
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return None;
        }
        Some(Self(address))
    }

    /// Address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Principal {
    type Error = BlankPrincipal;

    fn try_from(address: String) -> Result<Self, Self::Error> {
        Self::new(address).ok_or(BlankPrincipal)
    }
}

impl From<Principal> for String {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Track identifier. Assigned from 1 upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl TrackId {
    /// First id handed out by the registry.
    pub const FIRST: TrackId = TrackId(1);

    /// Raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// License identifier. Assigned from 1 upward, independent of track ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseId(pub u64);

impl LicenseId {
    /// First id handed out by the ledger.
    pub const FIRST: LicenseId = LicenseId(1);

    /// Raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LicenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// Collaboration proposal state machine.
///
/// ```text
/// Pending ──accept──→ Accepted
///    └─────reject──→ Rejected
/// ```
///
/// A new proposal on the same track replaces the record whatever its state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalStatus {
    /// Awaiting the invitee's answer.
    #[default]
    Pending,
    /// Invitee accepted and was appended to the collaborators.
    Accepted,
    /// Invitee declined.
    Rejected,
}

impl ProposalStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: ProposalStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}
