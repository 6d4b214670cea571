//! End-to-end tracker flows driven through the public API, with a checker
//! whose answers can be flipped mid-test to simulate endpoints going dark
//! and coming back.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use heartbeat::monitoring::checker::Checker;
use heartbeat::{
    DumpFile, Reachability, RegisterOutcome, RemoveOutcome, Tracker, UpdateOutcome,
};

/// Answers Reachable while `up` holds, Unreachable otherwise.
struct SwitchableChecker {
    up: AtomicBool,
}

impl SwitchableChecker {
    fn starting_up() -> Arc<Self> {
        Arc::new(Self { up: AtomicBool::new(true) })
    }

    fn go_dark(&self) {
        self.up.store(false, Ordering::SeqCst);
    }

    fn come_back(&self) {
        self.up.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Checker for SwitchableChecker {
    async fn check(&self, _name: &str) -> Reachability {
        if self.up.load(Ordering::SeqCst) {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }
}

fn tracker_in(dir: &tempfile::TempDir, checker: Arc<SwitchableChecker>) -> Tracker {
    Tracker::new(checker, DumpFile::new(dir.path().join("heartbeat_dump.csv")), 30)
}

#[tokio::test]
async fn outage_and_recovery_move_an_endpoint_between_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let checker = SwitchableChecker::starting_up();
    let mut tracker = tracker_in(&dir, checker.clone());

    let added = tracker.register("a.example", None).await.unwrap();
    assert_eq!(added, RegisterOutcome::Added { interval: 30 });
    assert!(tracker.status_report().contains("a.example,30,Reachable\n"));

    // Thirty ticks make the endpoint due; the probe now fails.
    for _ in 0..30 {
        tracker.tick();
    }
    checker.go_dark();
    assert_eq!(tracker.evaluate_due().await.unwrap(), 1);
    assert!(tracker.status_report().contains("a.example,30,Unreachable\n"));

    // The counter was reset, so nothing is due again until thirty more
    // ticks have passed, even though the endpoint has recovered.
    checker.come_back();
    for _ in 0..29 {
        tracker.tick();
    }
    assert_eq!(tracker.evaluate_due().await.unwrap(), 0);
    assert!(tracker.status_report().contains("a.example,30,Unreachable\n"));

    tracker.tick();
    assert_eq!(tracker.evaluate_due().await.unwrap(), 1);
    assert!(tracker.status_report().contains("a.example,30,Reachable\n"));
}

#[tokio::test]
async fn restart_restores_the_tracked_set_with_fresh_classifications() {
    let dir = tempfile::tempdir().unwrap();
    let checker = SwitchableChecker::starting_up();

    {
        let mut tracker = tracker_in(&dir, checker.clone());
        tracker.register("x.example", Some(7)).await.unwrap();
        assert_eq!(
            tracker.set_interval("y.example", 3).await.unwrap(),
            UpdateOutcome::Created { interval: 3 },
        );
    }

    // Everything went dark between the save and the restart; the dump's
    // status column must lose to the fresh probe.
    checker.go_dark();
    let mut tracker = tracker_in(&dir, checker);
    assert_eq!(tracker.load().await.unwrap(), 2);

    let report = tracker.status_report();
    assert!(report.contains("x.example,7,Unreachable\n"));
    assert!(report.contains("y.example,3,Unreachable\n"));
}

#[tokio::test]
async fn interval_update_and_removal_round_trip_through_the_dump() {
    let dir = tempfile::tempdir().unwrap();
    let checker = SwitchableChecker::starting_up();
    let mut tracker = tracker_in(&dir, checker.clone());

    tracker.register("keep.example", Some(10)).await.unwrap();
    tracker.register("drop.example", Some(10)).await.unwrap();

    assert_eq!(
        tracker.set_interval("keep.example", 20).await.unwrap(),
        UpdateOutcome::Updated { interval: 20 },
    );
    assert_eq!(tracker.unregister("drop.example").unwrap(), RemoveOutcome::Removed);
    assert_eq!(tracker.unregister("drop.example").unwrap(), RemoveOutcome::NotTracked);

    let mut restored = tracker_in(&dir, checker);
    restored.load().await.unwrap();

    let report = restored.status_report();
    assert!(report.contains("keep.example,20,Reachable\n"));
    assert!(!report.contains("drop.example"));
}
