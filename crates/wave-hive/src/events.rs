//! # Contract Events
//!
//! One event per committed mutation, published through the [`EventSink`]
//! outbound port. Rejected calls publish nothing.
//!
//! | Event | Emitted by |
//! |-------|-----------|
//! | `TrackCreated` | `create-track` |
//! | `LicensePurchased` | `purchase-license` |
//! | `CollabProposed` | `propose-collab` |
//! | `CollabAccepted` | `accept-collab` |
//! | `CollabRejected` | `reject-collab` |
//!
//! [`EventSink`]: crate::ports::outbound::EventSink

use crate::domain::value_objects::{BlockHeight, LicenseId, Principal, TrackId};
use serde::{Deserialize, Serialize};

/// Event topic names, as they appear in receipts and logs.
pub mod topics {
    /// Track registered.
    pub const TRACK_CREATED: &str = "track-created";
    /// License issued.
    pub const LICENSE_PURCHASED: &str = "license-purchased";
    /// Collaboration proposed.
    pub const COLLAB_PROPOSED: &str = "collab-proposed";
    /// Collaboration accepted.
    pub const COLLAB_ACCEPTED: &str = "collab-accepted";
    /// Collaboration rejected.
    pub const COLLAB_REJECTED: &str = "collab-rejected";
}

/// Wave-Hive contract event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum WaveHiveEvent {
    /// A track was registered.
    TrackCreated {
        /// New track id.
        track_id: TrackId,
        /// Creator.
        creator: Principal,
        /// License price.
        license_price: u64,
        /// License duration in blocks.
        license_duration: u64,
        /// Block height.
        block_height: BlockHeight,
    },
    /// A license was issued.
    LicensePurchased {
        /// New license id.
        license_id: LicenseId,
        /// Licensed track.
        track_id: TrackId,
        /// Purchaser.
        licensee: Principal,
        /// Price recorded on the license.
        price_paid: u64,
        /// Last valid height.
        expires_at: BlockHeight,
    },
    /// A collaboration was proposed.
    CollabProposed {
        /// Track.
        track_id: TrackId,
        /// Invited principal.
        invitee: Principal,
        /// Royalty percentage.
        royalty_share: u64,
        /// Whether a previous proposal record was overwritten.
        replaced_previous: bool,
    },
    /// A collaboration was accepted.
    CollabAccepted {
        /// Track.
        track_id: TrackId,
        /// New collaborator.
        collaborator: Principal,
        /// Royalty percentage.
        royalty_share: u64,
    },
    /// A collaboration was rejected.
    CollabRejected {
        /// Track.
        track_id: TrackId,
        /// Invitee who declined.
        invitee: Principal,
    },
}

impl WaveHiveEvent {
    /// Topic name.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::TrackCreated { .. } => topics::TRACK_CREATED,
            Self::LicensePurchased { .. } => topics::LICENSE_PURCHASED,
            Self::CollabProposed { .. } => topics::COLLAB_PROPOSED,
            Self::CollabAccepted { .. } => topics::COLLAB_ACCEPTED,
            Self::CollabRejected { .. } => topics::COLLAB_REJECTED,
        }
    }

    /// Track the event concerns.
    pub fn track_id(&self) -> TrackId {
        match self {
            Self::TrackCreated { track_id, .. }
            | Self::LicensePurchased { track_id, .. }
            | Self::CollabProposed { track_id, .. }
            | Self::CollabAccepted { track_id, .. }
            | Self::CollabRejected { track_id, .. } => *track_id,
        }
    }
}
