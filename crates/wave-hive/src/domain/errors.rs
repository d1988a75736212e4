//! # Domain Errors
//!
//! Every failure a Wave-Hive call can return. Each variant maps onto one of
//! four [`ErrorKind`]s and a stable numeric contract code, which is what a
//! receipt reports as `(err uNNN)`.

use super::value_objects::{LicenseId, ProposalStatus, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse error classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Unknown track, license or proposal.
    NotFound,
    /// Caller lacks the required relationship (not creator, not invitee).
    Unauthorized,
    /// Value outside its domain.
    InvalidArgument,
    /// Operation not permitted in the current state.
    InvalidState,
}

impl ErrorKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidState => "invalid_state",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wave-Hive error types.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WaveHiveError {
    /// Track id was never created.
    #[error("track not found: {0}")]
    TrackNotFound(TrackId),

    /// License id was never issued.
    #[error("license not found: {0}")]
    LicenseNotFound(LicenseId),

    /// Track has no collaboration proposal on record.
    #[error("no collaboration proposal for track {0}")]
    ProposalNotFound(TrackId),

    /// Caller is not the track's creator.
    #[error("caller is not the creator of track {0}")]
    NotTrackCreator(TrackId),

    /// Caller is not the invitee of the track's proposal.
    #[error("caller is not the invitee of the proposal on track {0}")]
    NotInvitee(TrackId),

    /// Title is empty.
    #[error("title must not be empty")]
    EmptyTitle,

    /// Title exceeds the configured bound.
    #[error("title too long: {len} > {max} characters")]
    TitleTooLong {
        /// Character count supplied
        len: usize,
        /// Configured bound
        max: usize,
    },

    /// License terms are empty.
    #[error("license terms must not be empty")]
    EmptyTerms,

    /// License terms exceed the configured bound.
    #[error("terms too long: {len} > {max} characters")]
    TermsTooLong {
        /// Character count supplied
        len: usize,
        /// Configured bound
        max: usize,
    },

    /// Royalty share outside [0, max].
    #[error("invalid royalty share: {share} > {max}")]
    InvalidRoyaltyShare {
        /// Share supplied
        share: u64,
        /// Upper bound (inclusive)
        max: u64,
    },

    /// Proposal already answered.
    #[error("proposal on track {track_id} is {status}, not pending")]
    ProposalNotPending {
        /// Track the proposal belongs to
        track_id: TrackId,
        /// Current status
        status: ProposalStatus,
    },

    /// Track already holds the maximum number of collaborators.
    #[error("track {track_id} is at the collaborator limit ({max})")]
    CollaboratorLimitReached {
        /// Track at capacity
        track_id: TrackId,
        /// Configured bound
        max: usize,
    },

    /// An id counter would overflow.
    #[error("identifier space exhausted")]
    IdSpaceExhausted,
}

/// Contract configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A length bound of zero would reject every title or terms string.
    #[error("{field} must be at least 1")]
    ZeroLengthBound {
        /// Offending field
        field: &'static str,
    },

    /// No room for the creator plus one invitee.
    #[error("max-collaborators must be at least {min}, got {got}")]
    TooFewCollaborators {
        /// Smallest usable cap
        min: usize,
        /// Configured cap
        got: usize,
    },

    /// Royalty cap is not a percentage.
    #[error("max-royalty-share is a percentage (<= 100), got {0}")]
    RoyaltyCapAboveHundred(u64),
}

impl WaveHiveError {
    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TrackNotFound(_) | Self::LicenseNotFound(_) | Self::ProposalNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::NotTrackCreator(_) | Self::NotInvitee(_) => ErrorKind::Unauthorized,
            Self::EmptyTitle
            | Self::TitleTooLong { .. }
            | Self::EmptyTerms
            | Self::TermsTooLong { .. }
            | Self::InvalidRoyaltyShare { .. } => ErrorKind::InvalidArgument,
            Self::ProposalNotPending { .. }
            | Self::CollaboratorLimitReached { .. }
            | Self::IdSpaceExhausted => ErrorKind::InvalidState,
        }
    }

    /// Numeric contract error code.
    pub fn code(&self) -> u32 {
        match self {
            Self::TrackNotFound(_) => 101,
            Self::LicenseNotFound(_) => 102,
            Self::ProposalNotFound(_) => 103,
            Self::NotTrackCreator(_) => 110,
            Self::NotInvitee(_) => 111,
            Self::EmptyTitle => 120,
            Self::TitleTooLong { .. } => 121,
            Self::EmptyTerms => 122,
            Self::TermsTooLong { .. } => 123,
            Self::InvalidRoyaltyShare { .. } => 124,
            Self::ProposalNotPending { .. } => 130,
            Self::CollaboratorLimitReached { .. } => 131,
            Self::IdSpaceExhausted => 132,
        }
    }
}
