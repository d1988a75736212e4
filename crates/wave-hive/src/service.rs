//! # Wave-Hive Service
//!
//! Wraps [`WaveHiveState`] for use by a chain: mutations are serialized
//! behind the write lock, queries share the read lock, committed mutations
//! are published to the [`EventSink`] and every call is counted.
//!
//! A query holding the read lock never observes a half-applied mutation,
//! since each mutation validates and commits inside a single write-lock
//! critical section.

use crate::domain::{
    BlockHeight, CallContext, LicenseId, LicenseView, Principal, ProposalView,
    TrackId, TrackView, WaveHiveConfig, WaveHiveError, WaveHiveState,
};
use crate::events::WaveHiveEvent;
use crate::ports::inbound::{
    CallOutput, ContractCall, ReadOnlyCall, ReadOnlyOutput, WaveHiveApi, WaveHiveQuery,
};
use crate::ports::outbound::{EventSink, NoopEventSink};

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Statistics for the Wave-Hive service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Mutating calls that committed.
    pub calls_committed: u64,
    /// Mutating calls rejected with an error.
    pub calls_rejected: u64,
    /// Tracks created.
    pub tracks_created: u64,
    /// Licenses purchased.
    pub licenses_purchased: u64,
    /// Proposals recorded.
    pub collabs_proposed: u64,
    /// Proposals accepted.
    pub collabs_accepted: u64,
    /// Proposals rejected by the invitee.
    pub collabs_rejected: u64,
    /// Read-only calls served.
    pub queries_served: u64,
}

/// The Wave-Hive contract service.
pub struct WaveHiveService<E: EventSink> {
    /// Contract state.
    state: RwLock<WaveHiveState>,
    /// Event sink for committed mutations.
    events: Arc<E>,
    /// Service statistics for mutating calls.
    stats: RwLock<ServiceStats>,
    /// Read-only calls served; kept off the stats lock so reads never contend.
    queries_served: AtomicU64,
}

impl<E: EventSink> WaveHiveService<E> {
    /// Create a service with empty state.
    pub fn new(config: WaveHiveConfig, events: Arc<E>) -> Self {
        info!(
            max_title_len = config.max_title_len,
            max_collaborators = config.max_collaborators,
            "[wave-hive] Contract state initialized"
        );
        Self {
            state: RwLock::new(WaveHiveState::new(config)),
            events,
            stats: RwLock::new(ServiceStats::default()),
            queries_served: AtomicU64::new(0),
        }
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        let mut stats = self.stats.read().clone();
        stats.queries_served = self.queries_served.load(Ordering::Relaxed);
        stats
    }

    /// Event sink this service publishes to.
    pub fn event_sink(&self) -> &Arc<E> {
        &self.events
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> WaveHiveState {
        self.state.read().clone()
    }

    /// Dispatch a mutating call by function name.
    pub fn execute(
        &self,
        ctx: &CallContext,
        call: &ContractCall,
    ) -> Result<CallOutput, WaveHiveError> {
        match call {
            ContractCall::CreateTrack {
                title,
                license_price,
                license_duration,
            } => self
                .create_track(ctx, title, *license_price, *license_duration)
                .map(CallOutput::TrackId),
            ContractCall::PurchaseLicense { track_id, terms } => self
                .purchase_license(ctx, *track_id, terms)
                .map(CallOutput::LicenseId),
            ContractCall::ProposeCollab {
                track_id,
                invitee,
                royalty_share,
            } => self
                .propose_collab(ctx, *track_id, invitee.clone(), *royalty_share)
                .map(|()| CallOutput::Unit),
            ContractCall::AcceptCollab { track_id } => {
                self.accept_collab(ctx, *track_id).map(|()| CallOutput::Unit)
            }
            ContractCall::RejectCollab { track_id } => {
                self.reject_collab(ctx, *track_id).map(|()| CallOutput::Unit)
            }
        }
    }

    /// Dispatch a read-only call, evaluated at `height`.
    pub fn query(
        &self,
        call: &ReadOnlyCall,
        height: BlockHeight,
    ) -> Result<ReadOnlyOutput, WaveHiveError> {
        match call {
            ReadOnlyCall::GetTrackDetails { track_id } => {
                Ok(ReadOnlyOutput::Track(self.get_track_details(*track_id)))
            }
            ReadOnlyCall::GetLicenseDetails { license_id } => {
                Ok(ReadOnlyOutput::License(self.get_license_details(*license_id)))
            }
            ReadOnlyCall::IsLicenseValid { license_id } => self
                .is_license_valid(*license_id, height)
                .map(ReadOnlyOutput::Validity),
            ReadOnlyCall::GetCollabProposal { track_id } => {
                Ok(ReadOnlyOutput::Proposal(self.get_collab_proposal(*track_id)))
            }
        }
    }

    /// Count the outcome of a mutating call and log rejections.
    fn record<T>(&self, function: &'static str, result: &Result<T, WaveHiveError>) {
        let mut stats = self.stats.write();
        match result {
            Ok(_) => stats.calls_committed += 1,
            Err(e) => {
                stats.calls_rejected += 1;
                warn!(
                    function,
                    kind = %e.kind(),
                    code = e.code(),
                    error = %e,
                    "[wave-hive] Call rejected"
                );
                #[cfg(feature = "metrics")]
                wave_telemetry::metric_inc!(
                    wave_telemetry::CALLS_REJECTED,
                    &[function, e.kind().as_str()]
                );
            }
        }
    }

    fn count_query(&self, _function: &'static str) {
        self.queries_served.fetch_add(1, Ordering::Relaxed);
        #[cfg(feature = "metrics")]
        wave_telemetry::metric_inc!(wave_telemetry::QUERIES_SERVED, &[_function]);
    }
}

// Events are published while the state write lock is still held, so the
// sink sees them in commit order even with concurrent writers.
impl<E: EventSink> WaveHiveApi for WaveHiveService<E> {
    #[instrument(skip_all, fields(caller = %ctx.caller, height = ctx.block_height))]
    fn create_track(
        &self,
        ctx: &CallContext,
        title: &str,
        license_price: Option<u64>,
        license_duration: Option<u64>,
    ) -> Result<TrackId, WaveHiveError> {
        let mut state = self.state.write();
        let result = state
            .create_track(ctx, title, license_price, license_duration)
            .map(|track| WaveHiveEvent::TrackCreated {
                track_id: track.id,
                creator: track.creator.clone(),
                license_price: track.license_price,
                license_duration: track.license_duration,
                block_height: track.created_at,
            });
        self.record("create-track", &result);

        let event = result?;
        let track_id = event.track_id();
        info!(track_id = %track_id, "[wave-hive] Track created");
        self.stats.write().tracks_created += 1;
        #[cfg(feature = "metrics")]
        wave_telemetry::metric_inc!(wave_telemetry::TRACKS_CREATED);

        self.events.publish(event);
        Ok(track_id)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller, height = ctx.block_height, track_id = %track_id))]
    fn purchase_license(
        &self,
        ctx: &CallContext,
        track_id: TrackId,
        terms: &str,
    ) -> Result<LicenseId, WaveHiveError> {
        let mut state = self.state.write();
        let result = state
            .purchase_license(ctx, track_id, terms)
            .map(|license| (license.id, license.price_paid, license.expires_at));
        self.record("purchase-license", &result);

        let (license_id, price_paid, expires_at) = result?;
        info!(license_id = %license_id, expires_at, "[wave-hive] License purchased");
        self.stats.write().licenses_purchased += 1;
        #[cfg(feature = "metrics")]
        wave_telemetry::metric_inc!(wave_telemetry::LICENSES_PURCHASED);

        self.events.publish(WaveHiveEvent::LicensePurchased {
            license_id,
            track_id,
            licensee: ctx.caller.clone(),
            price_paid,
            expires_at,
        });
        Ok(license_id)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller, height = ctx.block_height, track_id = %track_id))]
    fn propose_collab(
        &self,
        ctx: &CallContext,
        track_id: TrackId,
        invitee: Principal,
        royalty_share: u64,
    ) -> Result<(), WaveHiveError> {
        let mut state = self.state.write();
        let result = state.propose_collab(ctx, track_id, invitee.clone(), royalty_share);
        self.record("propose-collab", &result);

        let replaced = result?;
        if let Some(previous) = replaced.as_ref().filter(|p| !p.status.is_terminal()) {
            warn!(
                previous_invitee = %previous.invitee,
                "[wave-hive] Pending proposal overwritten"
            );
        }
        info!(invitee = %invitee, royalty_share, "[wave-hive] Collaboration proposed");
        self.stats.write().collabs_proposed += 1;
        #[cfg(feature = "metrics")]
        wave_telemetry::metric_inc!(wave_telemetry::COLLABORATIONS, &["proposed"]);

        self.events.publish(WaveHiveEvent::CollabProposed {
            track_id,
            invitee,
            royalty_share,
            replaced_previous: replaced.is_some(),
        });
        Ok(())
    }

    #[instrument(skip_all, fields(caller = %ctx.caller, height = ctx.block_height, track_id = %track_id))]
    fn accept_collab(&self, ctx: &CallContext, track_id: TrackId) -> Result<(), WaveHiveError> {
        let mut state = self.state.write();
        let result = state.accept_collab(ctx, track_id);
        self.record("accept-collab", &result);

        let accepted = result?;
        info!(collaborator = %accepted.invitee, "[wave-hive] Collaboration accepted");
        self.stats.write().collabs_accepted += 1;
        #[cfg(feature = "metrics")]
        wave_telemetry::metric_inc!(wave_telemetry::COLLABORATIONS, &["accepted"]);

        self.events.publish(WaveHiveEvent::CollabAccepted {
            track_id,
            collaborator: accepted.invitee,
            royalty_share: accepted.royalty_share,
        });
        Ok(())
    }

    #[instrument(skip_all, fields(caller = %ctx.caller, height = ctx.block_height, track_id = %track_id))]
    fn reject_collab(&self, ctx: &CallContext, track_id: TrackId) -> Result<(), WaveHiveError> {
        let mut state = self.state.write();
        let result = state.reject_collab(ctx, track_id);
        self.record("reject-collab", &result);

        let rejected = result?;
        info!(invitee = %rejected.invitee, "[wave-hive] Collaboration rejected");
        self.stats.write().collabs_rejected += 1;
        #[cfg(feature = "metrics")]
        wave_telemetry::metric_inc!(wave_telemetry::COLLABORATIONS, &["rejected"]);

        self.events.publish(WaveHiveEvent::CollabRejected {
            track_id,
            invitee: rejected.invitee,
        });
        Ok(())
    }
}

impl<E: EventSink> WaveHiveQuery for WaveHiveService<E> {
    fn get_track_details(&self, track_id: TrackId) -> Option<TrackView> {
        self.count_query("get-track-details");
        let view = self.state.read().get_track_details(track_id);
        debug!(%track_id, found = view.is_some(), "[wave-hive] get-track-details");
        view
    }

    fn get_license_details(&self, license_id: LicenseId) -> Option<LicenseView> {
        self.count_query("get-license-details");
        let view = self.state.read().get_license_details(license_id);
        debug!(%license_id, found = view.is_some(), "[wave-hive] get-license-details");
        view
    }

    fn is_license_valid(
        &self,
        license_id: LicenseId,
        height: BlockHeight,
    ) -> Result<bool, WaveHiveError> {
        self.count_query("is-license-valid");
        let valid = self.state.read().is_license_valid(license_id, height);
        debug!(%license_id, height, ?valid, "[wave-hive] is-license-valid");
        valid
    }

    fn get_collab_proposal(&self, track_id: TrackId) -> Option<ProposalView> {
        self.count_query("get-collab-proposal");
        self.state.read().get_collab_proposal(track_id)
    }
}

/// Create a service with default config that discards events (for testing).
#[must_use]
pub fn create_test_service() -> WaveHiveService<NoopEventSink> {
    WaveHiveService::new(WaveHiveConfig::default(), Arc::new(NoopEventSink))
}

// =============================================================================
// TESTS
// =============================================================================
