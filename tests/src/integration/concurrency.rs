//! # Concurrent Callers
//!
//! Many tasks hitting one [`WaveHiveService`] at once. Mutations serialize
//! behind the state lock; ids stay gap-free and events arrive in commit
//! order.

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::sync::Arc;
    use wave_hive::prelude::*;

    fn p(name: &str) -> Principal {
        Principal::new(name).unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_sequential_ids() {
        let events = Arc::new(EventLog::new());
        let service = Arc::new(WaveHiveService::new(
            WaveHiveConfig::default(),
            Arc::clone(&events),
        ));
        let ids = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for worker in 0..8 {
            let service = Arc::clone(&service);
            let ids = Arc::clone(&ids);
            handles.push(tokio::spawn(async move {
                let ctx = CallContext::new(p(&format!("artist_{worker}")), 1);
                for n in 0..25 {
                    let id = service
                        .create_track(&ctx, &format!("track {worker}/{n}"), Some(1), Some(10))
                        .unwrap();
                    ids.lock().push(id.get());
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut ids = ids.lock().clone();
        ids.sort_unstable();
        let expected: Vec<u64> = (1..=200).collect();
        assert_eq!(ids, expected);

        // sink order is commit order
        let published: Vec<u64> = events.drain().iter().map(|e| e.track_id().get()).collect();
        assert_eq!(published, expected);
        assert_eq!(service.stats().tracks_created, 200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_purchases_on_shared_track() {
        let service = Arc::new(create_test_service());
        let creator = CallContext::new(p("deployer"), 1);
        let track = service
            .create_track(&creator, "Shared", Some(100), Some(50))
            .unwrap();

        let mut handles = Vec::new();
        for buyer in 0..10 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let ctx = CallContext::new(p(&format!("buyer_{buyer}")), 2);
                (0..10)
                    .map(|_| service.purchase_license(&ctx, track, "Streaming").unwrap())
                    .collect::<Vec<_>>()
            }));
        }

        let mut licenses = Vec::new();
        for handle in handles {
            licenses.extend(handle.await.unwrap());
        }
        licenses.sort();
        licenses.dedup();
        assert_eq!(licenses.len(), 100);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.licenses_for_track(track).len(), 100);
        assert!(snapshot
            .licenses_for_track(track)
            .iter()
            .all(|l| l.expires_at == 52 && l.price_paid == 100));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_only_one_invitee_answer_wins() {
        let service = Arc::new(create_test_service());
        let creator = CallContext::new(p("deployer"), 1);
        let track = service.create_track(&creator, "Duel", None, None).unwrap();
        service
            .propose_collab(&creator, track, p("wallet_1"), 25)
            .unwrap();

        let invitee = CallContext::new(p("wallet_1"), 2);
        let accept = {
            let service = Arc::clone(&service);
            let ctx = invitee.clone();
            tokio::spawn(async move { service.accept_collab(&ctx, track) })
        };
        let reject = {
            let service = Arc::clone(&service);
            let ctx = invitee.clone();
            tokio::spawn(async move { service.reject_collab(&ctx, track) })
        };

        let accepted = accept.await.unwrap();
        let rejected = reject.await.unwrap();
        assert!(accepted.is_ok() != rejected.is_ok());

        let loser = if accepted.is_ok() { rejected } else { accepted };
        assert!(matches!(loser, Err(WaveHiveError::ProposalNotPending { .. })));

        let collaborators = service.get_track_details(track).unwrap().collaborators;
        let status = service.get_collab_proposal(track).unwrap().status;
        match status {
            ProposalStatus::Accepted => assert_eq!(collaborators.len(), 2),
            ProposalStatus::Rejected => assert_eq!(collaborators.len(), 1),
            ProposalStatus::Pending => panic!("proposal left pending"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_partial_acceptance() {
        let service = Arc::new(create_test_service());
        let creator = CallContext::new(p("deployer"), 1);
        let track = service.create_track(&creator, "Watched", None, None).unwrap();
        service
            .propose_collab(&creator, track, p("wallet_1"), 10)
            .unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    for _ in 0..200 {
                        let snapshot = service.snapshot();
                        let accepted = snapshot
                            .get_collab_proposal(track)
                            .map(|v| v.status == ProposalStatus::Accepted)
                            .unwrap_or(false);
                        let len = snapshot
                            .get_track_details(track)
                            .map(|v| v.collaborators.len())
                            .unwrap_or(0);
                        assert_eq!(len, if accepted { 2 } else { 1 });
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        let ctx = CallContext::new(p("wallet_1"), 2);
        service.accept_collab(&ctx, track).unwrap();

        for reader in readers {
            reader.await.unwrap();
        }
    }
}
