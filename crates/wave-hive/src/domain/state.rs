//! # Contract State
//!
//! The three stores (tracks, licenses, proposals) and their id counters.
//!
//! Every mutating method validates first and writes last: when it returns
//! `Err`, no store and no counter has changed.

use super::entities::{
    CallContext, CollaborationProposal, License, LicenseView, ProposalView, Track, TrackParams,
    TrackView, WaveHiveConfig,
};
use super::errors::WaveHiveError;
use super::invariants::{
    invariant_caller_is_creator, invariant_caller_is_invitee, invariant_proposal_pending,
    invariant_royalty_share, invariant_terms_bounds, invariant_title_bounds,
};
use super::value_objects::{BlockHeight, LicenseId, Principal, ProposalStatus, TrackId};
use std::collections::BTreeMap;

/// Authoritative in-memory contract state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveHiveState {
    config: WaveHiveConfig,
    tracks: BTreeMap<TrackId, Track>,
    licenses: BTreeMap<LicenseId, License>,
    proposals: BTreeMap<TrackId, CollaborationProposal>,
    next_track_id: u64,
    next_license_id: u64,
}

impl WaveHiveState {
    /// Empty state; first ids handed out are 1.
    pub fn new(config: WaveHiveConfig) -> Self {
        Self {
            config,
            tracks: BTreeMap::new(),
            licenses: BTreeMap::new(),
            proposals: BTreeMap::new(),
            next_track_id: TrackId::FIRST.get(),
            next_license_id: LicenseId::FIRST.get(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &WaveHiveConfig {
        &self.config
    }

    /// Number of tracks created.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of licenses issued.
    pub fn license_count(&self) -> usize {
        self.licenses.len()
    }

    // =========================================================================
    // TRACK REGISTRY
    // =========================================================================

    /// Register a track owned by the caller. Returns the committed record.
    pub fn create_track(
        &mut self,
        ctx: &CallContext,
        title: &str,
        license_price: Option<u64>,
        license_duration: Option<u64>,
    ) -> Result<&Track, WaveHiveError> {
        invariant_title_bounds(title, self.config.max_title_len)?;
        let id = TrackId(self.next_track_id);
        let next = self
            .next_track_id
            .checked_add(1)
            .ok_or(WaveHiveError::IdSpaceExhausted)?;

        let track = Track::new(TrackParams {
            id,
            creator: ctx.caller.clone(),
            title: title.to_string(),
            license_price: license_price.unwrap_or(self.config.default_license_price),
            license_duration: license_duration.unwrap_or(self.config.default_license_duration),
            created_at: ctx.block_height,
        });

        self.next_track_id = next;
        Ok(self.tracks.entry(id).or_insert(track))
    }

    /// Track record, if any.
    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// `get-track-details`.
    pub fn get_track_details(&self, track_id: TrackId) -> Option<TrackView> {
        self.tracks.get(&track_id).map(Track::view)
    }

    // =========================================================================
    // LICENSE LEDGER
    // =========================================================================

    /// Issue a license on an existing track to the caller. Returns the
    /// committed record.
    pub fn purchase_license(
        &mut self,
        ctx: &CallContext,
        track_id: TrackId,
        terms: &str,
    ) -> Result<&License, WaveHiveError> {
        let track = self
            .tracks
            .get(&track_id)
            .ok_or(WaveHiveError::TrackNotFound(track_id))?;
        invariant_terms_bounds(terms, self.config.max_terms_len)?;
        let id = LicenseId(self.next_license_id);
        let next = self
            .next_license_id
            .checked_add(1)
            .ok_or(WaveHiveError::IdSpaceExhausted)?;

        let license = License::issue(
            id,
            track,
            ctx.caller.clone(),
            terms.to_string(),
            ctx.block_height,
        );

        self.next_license_id = next;
        Ok(self.licenses.entry(id).or_insert(license))
    }

    /// License record, if any.
    pub fn license(&self, license_id: LicenseId) -> Option<&License> {
        self.licenses.get(&license_id)
    }

    /// `get-license-details`.
    pub fn get_license_details(&self, license_id: LicenseId) -> Option<LicenseView> {
        self.licenses.get(&license_id).map(License::view)
    }

    /// `is-license-valid` evaluated at `height`.
    pub fn is_license_valid(
        &self,
        license_id: LicenseId,
        height: BlockHeight,
    ) -> Result<bool, WaveHiveError> {
        self.licenses
            .get(&license_id)
            .map(|license| license.is_valid_at(height))
            .ok_or(WaveHiveError::LicenseNotFound(license_id))
    }

    /// All licenses issued on a track, in id order.
    pub fn licenses_for_track(&self, track_id: TrackId) -> Vec<&License> {
        self.licenses
            .values()
            .filter(|license| license.track_id == track_id)
            .collect()
    }

    // =========================================================================
    // COLLABORATION WORKFLOW
    // =========================================================================

    /// Record a pending proposal, replacing any previous one on the track.
    ///
    /// Returns the replaced proposal, if there was one.
    pub fn propose_collab(
        &mut self,
        ctx: &CallContext,
        track_id: TrackId,
        invitee: Principal,
        royalty_share: u64,
    ) -> Result<Option<CollaborationProposal>, WaveHiveError> {
        let track = self
            .tracks
            .get(&track_id)
            .ok_or(WaveHiveError::TrackNotFound(track_id))?;
        invariant_caller_is_creator(track, &ctx.caller)?;
        invariant_royalty_share(royalty_share, self.config.max_royalty_share)?;
        if !track.has_capacity(self.config.max_collaborators) {
            return Err(WaveHiveError::CollaboratorLimitReached {
                track_id,
                max: self.config.max_collaborators,
            });
        }

        let proposal = CollaborationProposal::new(
            track_id,
            ctx.caller.clone(),
            invitee,
            royalty_share,
            ctx.block_height,
        );
        Ok(self.proposals.insert(track_id, proposal))
    }

    /// Invitee accepts: append to collaborators and mark accepted.
    pub fn accept_collab(
        &mut self,
        ctx: &CallContext,
        track_id: TrackId,
    ) -> Result<CollaborationProposal, WaveHiveError> {
        let (track, proposal) = self.answerable_proposal(ctx, track_id)?;
        if !track.has_capacity(self.config.max_collaborators) {
            return Err(WaveHiveError::CollaboratorLimitReached {
                track_id,
                max: self.config.max_collaborators,
            });
        }
        let invitee = proposal.invitee.clone();

        // All checks passed; commit both stores.
        let max = self.config.max_collaborators;
        let proposal = self
            .proposals
            .get_mut(&track_id)
            .ok_or(WaveHiveError::ProposalNotFound(track_id))?;
        proposal.transition_to(ProposalStatus::Accepted)?;
        let accepted = proposal.clone();
        self.tracks
            .get_mut(&track_id)
            .ok_or(WaveHiveError::TrackNotFound(track_id))?
            .add_collaborator(invitee, max)?;
        Ok(accepted)
    }

    /// Invitee declines: collaborators untouched, track free for a new proposal.
    pub fn reject_collab(
        &mut self,
        ctx: &CallContext,
        track_id: TrackId,
    ) -> Result<CollaborationProposal, WaveHiveError> {
        self.answerable_proposal(ctx, track_id)?;
        let proposal = self
            .proposals
            .get_mut(&track_id)
            .ok_or(WaveHiveError::ProposalNotFound(track_id))?;
        proposal.transition_to(ProposalStatus::Rejected)?;
        Ok(proposal.clone())
    }

    /// `get-collab-proposal`.
    pub fn get_collab_proposal(&self, track_id: TrackId) -> Option<ProposalView> {
        self.proposals.get(&track_id).map(CollaborationProposal::view)
    }

    /// Shared checks for accept/reject: track, proposal, pending, invitee.
    fn answerable_proposal(
        &self,
        ctx: &CallContext,
        track_id: TrackId,
    ) -> Result<(&Track, &CollaborationProposal), WaveHiveError> {
        let track = self
            .tracks
            .get(&track_id)
            .ok_or(WaveHiveError::TrackNotFound(track_id))?;
        let proposal = self
            .proposals
            .get(&track_id)
            .ok_or(WaveHiveError::ProposalNotFound(track_id))?;
        invariant_proposal_pending(proposal)?;
        invariant_caller_is_invitee(proposal, &ctx.caller)?;
        Ok((track, proposal))
    }
}

impl Default for WaveHiveState {
    fn default() -> Self {
        Self::new(WaveHiveConfig::default())
    }
}
