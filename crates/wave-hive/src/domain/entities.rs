//! # Domain Entities
//!
//! Tracks, licenses and collaboration proposals, plus the read-only views
//! the query surface hands out.

use super::errors::{ConfigError, WaveHiveError};
use super::value_objects::{BlockHeight, LicenseId, Principal, ProposalStatus, TrackId};
use serde::{Deserialize, Serialize};
use std::env;

/// Who is calling and at which block height.
///
/// Supplied by the chain for every call; trusted as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Calling principal.
    pub caller: Principal,
    /// Height of the block the call executes in.
    pub block_height: BlockHeight,
}

impl CallContext {
    /// Create a call context.
    pub fn new(caller: Principal, block_height: BlockHeight) -> Self {
        Self {
            caller,
            block_height,
        }
    }
}

/// A registered music track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier.
    pub id: TrackId,
    /// Creator; immutable.
    pub creator: Principal,
    /// Title.
    pub title: String,
    /// Price of one license.
    pub license_price: u64,
    /// Blocks a license stays valid after purchase.
    pub license_duration: u64,
    /// Creator first, then accepted invitees in acceptance order.
    pub collaborators: Vec<Principal>,
    /// Height the track was created at.
    pub created_at: BlockHeight,
}

/// Parameters for creating a track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackParams {
    /// Identifier assigned by the registry.
    pub id: TrackId,
    /// Creator.
    pub creator: Principal,
    /// Title, already validated.
    pub title: String,
    /// Price of one license.
    pub license_price: u64,
    /// License validity in blocks.
    pub license_duration: u64,
    /// Creation height.
    pub created_at: BlockHeight,
}

impl Track {
    /// Create a new track. The creator is its first collaborator.
    pub fn new(params: TrackParams) -> Self {
        Self {
            id: params.id,
            collaborators: vec![params.creator.clone()],
            creator: params.creator,
            title: params.title,
            license_price: params.license_price,
            license_duration: params.license_duration,
            created_at: params.created_at,
        }
    }

    /// Check if `principal` created this track.
    pub fn is_creator(&self, principal: &Principal) -> bool {
        self.creator == *principal
    }

    /// Check if another collaborator fits under `max`.
    pub fn has_capacity(&self, max: usize) -> bool {
        self.collaborators.len() < max
    }

    /// Append a collaborator. No dedup.
    pub fn add_collaborator(
        &mut self,
        collaborator: Principal,
        max: usize,
    ) -> Result<(), WaveHiveError> {
        if !self.has_capacity(max) {
            return Err(WaveHiveError::CollaboratorLimitReached {
                track_id: self.id,
                max,
            });
        }
        self.collaborators.push(collaborator);
        Ok(())
    }

    /// Read-only projection.
    pub fn view(&self) -> TrackView {
        TrackView {
            creator: self.creator.clone(),
            title: self.title.clone(),
            license_price: self.license_price,
            license_duration: self.license_duration,
            collaborators: self.collaborators.clone(),
        }
    }
}

/// A purchased license. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Unique identifier.
    pub id: LicenseId,
    /// Licensed track.
    pub track_id: TrackId,
    /// Purchaser.
    pub licensee: Principal,
    /// Usage rights.
    pub terms: String,
    /// Track price at purchase time.
    pub price_paid: u64,
    /// Purchase height.
    pub purchased_at: BlockHeight,
    /// Last height at which the license is valid.
    pub expires_at: BlockHeight,
}

impl License {
    /// Issue a license for `track` at `purchased_at`.
    pub fn issue(
        id: LicenseId,
        track: &Track,
        licensee: Principal,
        terms: String,
        purchased_at: BlockHeight,
    ) -> Self {
        Self {
            id,
            track_id: track.id,
            licensee,
            terms,
            price_paid: track.license_price,
            purchased_at,
            expires_at: purchased_at.saturating_add(track.license_duration),
        }
    }

    /// Valid up to and including `expires_at`.
    pub fn is_valid_at(&self, height: BlockHeight) -> bool {
        height <= self.expires_at
    }

    /// Read-only projection.
    pub fn view(&self) -> LicenseView {
        LicenseView {
            licensee: self.licensee.clone(),
            track_id: self.track_id,
            terms: self.terms.clone(),
            purchased_at: self.purchased_at,
            expires_at: self.expires_at,
        }
    }
}

/// Collaboration proposal on a track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationProposal {
    /// Track the proposal belongs to.
    pub track_id: TrackId,
    /// Track creator who proposed.
    pub proposer: Principal,
    /// Invited collaborator.
    pub invitee: Principal,
    /// Royalty percentage offered.
    pub royalty_share: u64,
    /// Current state.
    pub status: ProposalStatus,
    /// Height the proposal was made at.
    pub proposed_at: BlockHeight,
}

impl CollaborationProposal {
    /// Create a pending proposal.
    pub fn new(
        track_id: TrackId,
        proposer: Principal,
        invitee: Principal,
        royalty_share: u64,
        proposed_at: BlockHeight,
    ) -> Self {
        Self {
            track_id,
            proposer,
            invitee,
            royalty_share,
            status: ProposalStatus::Pending,
            proposed_at,
        }
    }

    /// Transition to new state.
    pub fn transition_to(&mut self, next: ProposalStatus) -> Result<(), WaveHiveError> {
        if !self.status.can_transition_to(next) {
            return Err(WaveHiveError::ProposalNotPending {
                track_id: self.track_id,
                status: self.status,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Read-only projection.
    pub fn view(&self) -> ProposalView {
        ProposalView {
            proposer: self.proposer.clone(),
            invitee: self.invitee.clone(),
            royalty_share: self.royalty_share,
            status: self.status,
        }
    }
}

/// `get-track-details` result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackView {
    /// Creator.
    pub creator: Principal,
    /// Title.
    pub title: String,
    /// Price of one license.
    pub license_price: u64,
    /// License validity in blocks.
    pub license_duration: u64,
    /// Creator plus accepted collaborators.
    pub collaborators: Vec<Principal>,
}

/// `get-license-details` result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LicenseView {
    /// Purchaser.
    pub licensee: Principal,
    /// Licensed track.
    pub track_id: TrackId,
    /// Usage rights.
    pub terms: String,
    /// Purchase height.
    pub purchased_at: BlockHeight,
    /// Last valid height.
    pub expires_at: BlockHeight,
}

/// `get-collab-proposal` result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProposalView {
    /// Track creator.
    pub proposer: Principal,
    /// Invited collaborator.
    pub invitee: Principal,
    /// Royalty percentage.
    pub royalty_share: u64,
    /// Current state.
    pub status: ProposalStatus,
}

/// Contract configuration.
///
/// Keys are kebab-case like the rest of the call surface; missing fields
/// deserialize to their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WaveHiveConfig {
    /// Maximum title length in characters.
    pub max_title_len: usize,
    /// Maximum license terms length in characters.
    pub max_terms_len: usize,
    /// Maximum collaborators per track, creator included.
    pub max_collaborators: usize,
    /// Upper bound for royalty shares (inclusive).
    pub max_royalty_share: u64,
    /// Price used when `create-track` omits one.
    pub default_license_price: u64,
    /// Duration used when `create-track` omits one.
    pub default_license_duration: u64,
}

impl Default for WaveHiveConfig {
    fn default() -> Self {
        Self {
            max_title_len: 100,
            max_terms_len: 500,
            max_collaborators: 10,
            max_royalty_share: 100,
            default_license_price: 0,
            default_license_duration: 0,
        }
    }
}

impl WaveHiveConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WH_MAX_TITLE_LEN` (default: 100)
    /// - `WH_MAX_TERMS_LEN` (default: 500)
    /// - `WH_MAX_COLLABORATORS` (default: 10)
    /// - `WH_DEFAULT_LICENSE_PRICE` (default: 0)
    /// - `WH_DEFAULT_LICENSE_DURATION` (default: 0)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_title_len: parse_env("WH_MAX_TITLE_LEN").unwrap_or(defaults.max_title_len),
            max_terms_len: parse_env("WH_MAX_TERMS_LEN").unwrap_or(defaults.max_terms_len),
            max_collaborators: parse_env("WH_MAX_COLLABORATORS")
                .unwrap_or(defaults.max_collaborators),
            max_royalty_share: defaults.max_royalty_share,
            default_license_price: parse_env("WH_DEFAULT_LICENSE_PRICE")
                .unwrap_or(defaults.default_license_price),
            default_license_duration: parse_env("WH_DEFAULT_LICENSE_DURATION")
                .unwrap_or(defaults.default_license_duration),
        }
    }

    /// Reject configurations no call could succeed under.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_title_len == 0 {
            return Err(ConfigError::ZeroLengthBound {
                field: "max-title-len",
            });
        }
        if self.max_terms_len == 0 {
            return Err(ConfigError::ZeroLengthBound {
                field: "max-terms-len",
            });
        }
        // Room for the creator plus one invitee.
        if self.max_collaborators < 2 {
            return Err(ConfigError::TooFewCollaborators {
                min: 2,
                got: self.max_collaborators,
            });
        }
        if self.max_royalty_share > 100 {
            return Err(ConfigError::RoyaltyCapAboveHundred(self.max_royalty_share));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
