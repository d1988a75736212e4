//! # Contract Properties
//!
//! Random call streams against [`WaveHiveState`], checking the ledger
//! invariants after every step.

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use wave_hive::prelude::*;

    const CALLERS: [&str; 4] = ["deployer", "wallet_1", "wallet_2", "wallet_3"];

    #[derive(Clone, Debug)]
    enum Op {
        Create { caller: usize, title_len: usize, duration: u64 },
        Purchase { caller: usize, track: u64, terms_len: usize },
        Propose { caller: usize, track: u64, invitee: usize, share: u64 },
        Accept { caller: usize, track: u64 },
        Reject { caller: usize, track: u64 },
        Advance { blocks: u64 },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let caller = 0..CALLERS.len();
        let track = 0u64..6;
        prop_oneof![
            (caller.clone(), 0usize..110, 0u64..50).prop_map(|(caller, title_len, duration)| {
                Op::Create { caller, title_len, duration }
            }),
            (caller.clone(), track.clone(), 0usize..8).prop_map(|(caller, track, terms_len)| {
                Op::Purchase { caller, track, terms_len }
            }),
            (caller.clone(), track.clone(), 0..CALLERS.len(), 0u64..120).prop_map(
                |(caller, track, invitee, share)| Op::Propose { caller, track, invitee, share }
            ),
            (caller.clone(), track.clone()).prop_map(|(caller, track)| Op::Accept { caller, track }),
            (caller, track).prop_map(|(caller, track)| Op::Reject { caller, track }),
            (1u64..20).prop_map(|blocks| Op::Advance { blocks }),
        ]
    }

    fn who(index: usize) -> Principal {
        Principal::new(CALLERS[index]).unwrap()
    }

    fn small_config() -> WaveHiveConfig {
        WaveHiveConfig {
            max_collaborators: 3,
            ..WaveHiveConfig::default()
        }
    }

    /// Apply one op; `Ok(Some(id))` for calls that return an id.
    fn apply(
        state: &mut WaveHiveState,
        height: &mut BlockHeight,
        op: &Op,
    ) -> Result<Option<u64>, WaveHiveError> {
        match op {
            Op::Create { caller, title_len, duration } => {
                let ctx = CallContext::new(who(*caller), *height);
                let title = "t".repeat(*title_len);
                state
                    .create_track(&ctx, &title, Some(10), Some(*duration))
                    .map(|t| Some(t.id.get()))
            }
            Op::Purchase { caller, track, terms_len } => {
                let ctx = CallContext::new(who(*caller), *height);
                let terms = "r".repeat(*terms_len);
                state
                    .purchase_license(&ctx, TrackId(*track), &terms)
                    .map(|l| Some(l.id.get()))
            }
            Op::Propose { caller, track, invitee, share } => {
                let ctx = CallContext::new(who(*caller), *height);
                state
                    .propose_collab(&ctx, TrackId(*track), who(*invitee), *share)
                    .map(|_| None)
            }
            Op::Accept { caller, track } => {
                let ctx = CallContext::new(who(*caller), *height);
                state.accept_collab(&ctx, TrackId(*track)).map(|_| None)
            }
            Op::Reject { caller, track } => {
                let ctx = CallContext::new(who(*caller), *height);
                state.reject_collab(&ctx, TrackId(*track)).map(|_| None)
            }
            Op::Advance { blocks } => {
                *height += blocks;
                Ok(None)
            }
        }
    }

    proptest! {
        /// Ids handed out are 1, 2, 3, … per kind, and failures never consume one.
        #[test]
        fn prop_ids_are_gap_free(ops in prop::collection::vec(op_strategy(), 1..80)) {
            let mut state = WaveHiveState::new(small_config());
            let mut height = 1;
            let mut track_ids = Vec::new();
            let mut license_ids = Vec::new();

            for op in &ops {
                if let Ok(Some(id)) = apply(&mut state, &mut height, op) {
                    match op {
                        Op::Create { .. } => track_ids.push(id),
                        Op::Purchase { .. } => license_ids.push(id),
                        _ => {}
                    }
                }
            }

            let expected: Vec<u64> = (1..=track_ids.len() as u64).collect();
            prop_assert_eq!(&track_ids, &expected);
            let expected: Vec<u64> = (1..=license_ids.len() as u64).collect();
            prop_assert_eq!(&license_ids, &expected);
            prop_assert_eq!(state.track_count(), track_ids.len());
            prop_assert_eq!(state.license_count(), license_ids.len());
        }

        /// A rejected call changes nothing at all.
        #[test]
        fn prop_errors_leave_state_unchanged(ops in prop::collection::vec(op_strategy(), 1..80)) {
            let mut state = WaveHiveState::new(small_config());
            let mut height = 1;

            for op in &ops {
                let before = state.clone();
                if apply(&mut state, &mut height, op).is_err() {
                    prop_assert_eq!(&state, &before);
                }
            }
        }

        /// Collaborator lists only grow, by one per acceptance, within the cap,
        /// and always start with the creator.
        #[test]
        fn prop_collaborators_grow_monotonically(ops in prop::collection::vec(op_strategy(), 1..80)) {
            let config = small_config();
            let mut state = WaveHiveState::new(config.clone());
            let mut height = 1;
            let mut accepted: BTreeMap<u64, usize> = BTreeMap::new();

            for op in &ops {
                let lens_before: BTreeMap<u64, usize> = (1..6)
                    .filter_map(|id| state.track(TrackId(id)).map(|t| (id, t.collaborators.len())))
                    .collect();

                let result = apply(&mut state, &mut height, op);
                if let (Op::Accept { track, .. }, Ok(_)) = (op, &result) {
                    *accepted.entry(*track).or_default() += 1;
                }

                for (id, before) in lens_before {
                    let track = state.track(TrackId(id)).unwrap();
                    prop_assert!(track.collaborators.len() >= before);
                    prop_assert!(track.collaborators.len() <= config.max_collaborators);
                    prop_assert_eq!(&track.collaborators[0], &track.creator);
                    prop_assert_eq!(
                        track.collaborators.len(),
                        1 + accepted.get(&id).copied().unwrap_or(0)
                    );
                }
            }
        }

        /// A license is valid through `purchased_at + duration` and not after.
        #[test]
        fn prop_license_validity_boundary(
            purchased_at in 0u64..1_000_000,
            duration in 0u64..1_000_000,
        ) {
            let mut state = WaveHiveState::default();
            let creator = CallContext::new(Principal::new("deployer").unwrap(), purchased_at);
            let buyer = CallContext::new(Principal::new("wallet_1").unwrap(), purchased_at);
            state.create_track(&creator, "t", Some(1), Some(duration)).unwrap();
            let id = state.purchase_license(&buyer, TrackId(1), "terms").unwrap().id;

            let last = purchased_at + duration;
            prop_assert_eq!(state.is_license_valid(id, purchased_at), Ok(true));
            prop_assert_eq!(state.is_license_valid(id, last), Ok(true));
            prop_assert_eq!(state.is_license_valid(id, last + 1), Ok(false));
        }

        /// Validity saturates instead of wrapping for huge durations.
        #[test]
        fn prop_huge_duration_never_wraps(purchased_at in 1u64..u64::MAX) {
            let mut state = WaveHiveState::default();
            let creator = CallContext::new(Principal::new("deployer").unwrap(), purchased_at);
            state.create_track(&creator, "t", Some(1), Some(u64::MAX)).unwrap();
            let license = state.purchase_license(&creator, TrackId(1), "terms").unwrap();
            prop_assert_eq!(license.expires_at, u64::MAX);
            let id = license.id;
            prop_assert_eq!(state.is_license_valid(id, u64::MAX), Ok(true));
        }

        /// Proposals succeed exactly when the share is within [0, 100].
        #[test]
        fn prop_royalty_share_bound(share in 0u64..1_000) {
            let mut state = WaveHiveState::default();
            let ctx = CallContext::new(Principal::new("deployer").unwrap(), 1);
            state.create_track(&ctx, "t", None, None).unwrap();
            let result = state.propose_collab(
                &ctx,
                TrackId(1),
                Principal::new("wallet_1").unwrap(),
                share,
            );
            if share <= 100 {
                prop_assert!(result.is_ok());
            } else {
                let rejected = matches!(
                    result,
                    Err(WaveHiveError::InvalidRoyaltyShare { .. })
                );
                prop_assert!(rejected);
            }
        }
    }
}
