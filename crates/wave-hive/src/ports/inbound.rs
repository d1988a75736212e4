//! # Inbound Ports
//!
//! What the Wave-Hive contract can do, plus the typed call surface the chain
//! uses to invoke it by name.

use crate::domain::{
    BlockHeight, CallContext, LicenseId, LicenseView, Principal, ProposalView, TrackId,
    TrackView, WaveHiveError,
};
use serde::{Deserialize, Serialize};

/// Mutating contract API - inbound port.
///
/// Every method is one atomic transition: it either commits fully or
/// returns `Err` with no state changed.
pub trait WaveHiveApi: Send + Sync {
    /// Register a track owned by the caller.
    fn create_track(
        &self,
        ctx: &CallContext,
        title: &str,
        license_price: Option<u64>,
        license_duration: Option<u64>,
    ) -> Result<TrackId, WaveHiveError>;

    /// Buy a license on an existing track.
    fn purchase_license(
        &self,
        ctx: &CallContext,
        track_id: TrackId,
        terms: &str,
    ) -> Result<LicenseId, WaveHiveError>;

    /// Creator invites `invitee` to collaborate for `royalty_share` percent.
    fn propose_collab(
        &self,
        ctx: &CallContext,
        track_id: TrackId,
        invitee: Principal,
        royalty_share: u64,
    ) -> Result<(), WaveHiveError>;

    /// Invitee accepts the pending proposal.
    fn accept_collab(&self, ctx: &CallContext, track_id: TrackId) -> Result<(), WaveHiveError>;

    /// Invitee declines the pending proposal.
    fn reject_collab(&self, ctx: &CallContext, track_id: TrackId) -> Result<(), WaveHiveError>;
}

/// Read-only contract API - inbound port.
pub trait WaveHiveQuery: Send + Sync {
    /// Track details, if the track exists.
    fn get_track_details(&self, track_id: TrackId) -> Option<TrackView>;

    /// License details, if the license exists.
    fn get_license_details(&self, license_id: LicenseId) -> Option<LicenseView>;

    /// Whether the license is still valid at `height`.
    fn is_license_valid(
        &self,
        license_id: LicenseId,
        height: BlockHeight,
    ) -> Result<bool, WaveHiveError>;

    /// Current proposal record on a track, if any.
    fn get_collab_proposal(&self, track_id: TrackId) -> Option<ProposalView>;
}

/// A public (mutating) contract call, addressed by function name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "kebab-case")]
pub enum ContractCall {
    /// `create-track`
    CreateTrack {
        /// Title.
        title: String,
        /// Optional license price.
        #[serde(default, rename = "license-price")]
        license_price: Option<u64>,
        /// Optional license duration.
        #[serde(default, rename = "license-duration")]
        license_duration: Option<u64>,
    },
    /// `purchase-license`
    PurchaseLicense {
        /// Track to license.
        #[serde(rename = "track-id")]
        track_id: TrackId,
        /// Usage rights.
        terms: String,
    },
    /// `propose-collab`
    ProposeCollab {
        /// Track.
        #[serde(rename = "track-id")]
        track_id: TrackId,
        /// Invited principal.
        invitee: Principal,
        /// Royalty percentage.
        #[serde(rename = "royalty-share")]
        royalty_share: u64,
    },
    /// `accept-collab`
    AcceptCollab {
        /// Track.
        #[serde(rename = "track-id")]
        track_id: TrackId,
    },
    /// `reject-collab`
    RejectCollab {
        /// Track.
        #[serde(rename = "track-id")]
        track_id: TrackId,
    },
}

impl ContractCall {
    /// Contract function name.
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::CreateTrack { .. } => "create-track",
            Self::PurchaseLicense { .. } => "purchase-license",
            Self::ProposeCollab { .. } => "propose-collab",
            Self::AcceptCollab { .. } => "accept-collab",
            Self::RejectCollab { .. } => "reject-collab",
        }
    }
}

/// Successful result of a [`ContractCall`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum CallOutput {
    /// `(ok uN)` carrying a new track id.
    TrackId(TrackId),
    /// `(ok uN)` carrying a new license id.
    LicenseId(LicenseId),
    /// `(ok true)`.
    Unit,
}

impl CallOutput {
    /// The uint payload, if any.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::TrackId(id) => Some(id.get()),
            Self::LicenseId(id) => Some(id.get()),
            Self::Unit => None,
        }
    }
}

/// A read-only contract call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "kebab-case")]
pub enum ReadOnlyCall {
    /// `get-track-details`
    GetTrackDetails {
        /// Track.
        #[serde(rename = "track-id")]
        track_id: TrackId,
    },
    /// `get-license-details`
    GetLicenseDetails {
        /// License.
        #[serde(rename = "license-id")]
        license_id: LicenseId,
    },
    /// `is-license-valid`
    IsLicenseValid {
        /// License.
        #[serde(rename = "license-id")]
        license_id: LicenseId,
    },
    /// `get-collab-proposal`
    GetCollabProposal {
        /// Track.
        #[serde(rename = "track-id")]
        track_id: TrackId,
    },
}

impl ReadOnlyCall {
    /// Contract function name.
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::GetTrackDetails { .. } => "get-track-details",
            Self::GetLicenseDetails { .. } => "get-license-details",
            Self::IsLicenseValid { .. } => "is-license-valid",
            Self::GetCollabProposal { .. } => "get-collab-proposal",
        }
    }
}

/// Result of a [`ReadOnlyCall`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum ReadOnlyOutput {
    /// Optional track tuple.
    Track(Option<TrackView>),
    /// Optional license tuple.
    License(Option<LicenseView>),
    /// `(ok bool)`.
    Validity(bool),
    /// Optional proposal tuple.
    Proposal(Option<ProposalView>),
}
