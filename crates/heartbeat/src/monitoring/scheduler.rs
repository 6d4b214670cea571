use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::error;

use super::tracker::SharedTracker;

/// Recurring tick driver.
///
/// Each firing advances every endpoint's timer and runs the due-check
/// pass as one unit under the tracker lock, then re-arms. The loop has no
/// cancellation path other than process exit.
pub struct Heartbeat {
    tracker: SharedTracker,
    period: Duration,
}

impl Heartbeat {
    pub fn new(tracker: SharedTracker, period: Duration) -> Self {
        Self { tracker, period }
    }

    /// Spawn the driver loop onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = interval(self.period);
            // A missed tick is caught on the next due check, not bursted.
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;

                let mut tracker = self.tracker.lock().await;
                tracker.tick();
                if let Err(err) = tracker.evaluate_due().await {
                    error!("heartbeat cycle failed: {err}");
                }
            }
        })
    }
}
