//! # Domain Invariants
//!
//! Preconditions every mutating call checks before touching state.

use super::entities::{CollaborationProposal, Track};
use super::errors::WaveHiveError;
use super::value_objects::Principal;

/// Invariant: title is non-empty and at most `max` characters.
pub fn invariant_title_bounds(title: &str, max: usize) -> Result<(), WaveHiveError> {
    if title.trim().is_empty() {
        return Err(WaveHiveError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > max {
        return Err(WaveHiveError::TitleTooLong { len, max });
    }
    Ok(())
}

/// Invariant: license terms are non-empty and at most `max` characters.
pub fn invariant_terms_bounds(terms: &str, max: usize) -> Result<(), WaveHiveError> {
    if terms.trim().is_empty() {
        return Err(WaveHiveError::EmptyTerms);
    }
    let len = terms.chars().count();
    if len > max {
        return Err(WaveHiveError::TermsTooLong { len, max });
    }
    Ok(())
}

/// Invariant: royalty share in `[0, max]`.
pub fn invariant_royalty_share(share: u64, max: u64) -> Result<(), WaveHiveError> {
    if share > max {
        return Err(WaveHiveError::InvalidRoyaltyShare { share, max });
    }
    Ok(())
}

/// Invariant: only the creator may propose on a track.
pub fn invariant_caller_is_creator(track: &Track, caller: &Principal) -> Result<(), WaveHiveError> {
    if !track.is_creator(caller) {
        return Err(WaveHiveError::NotTrackCreator(track.id));
    }
    Ok(())
}

/// Invariant: only the invitee may answer a proposal.
pub fn invariant_caller_is_invitee(
    proposal: &CollaborationProposal,
    caller: &Principal,
) -> Result<(), WaveHiveError> {
    if proposal.invitee != *caller {
        return Err(WaveHiveError::NotInvitee(proposal.track_id));
    }
    Ok(())
}

/// Invariant: the proposal is still awaiting an answer.
pub fn invariant_proposal_pending(proposal: &CollaborationProposal) -> Result<(), WaveHiveError> {
    if proposal.status.is_terminal() {
        return Err(WaveHiveError::ProposalNotPending {
            track_id: proposal.track_id,
            status: proposal.status,
        });
    }
    Ok(())
}
