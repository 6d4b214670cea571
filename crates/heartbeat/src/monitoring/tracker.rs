use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::store::{DumpFile, render_dump};

use super::checker::Checker;
use super::types::{Endpoint, EndpointStatus, Reachability};
use super::validation::{self, NameError};

/// Handle shared between the API layer and the heartbeat driver.
///
/// Every mutating operation and the tick+evaluate unit contend for this
/// one lock, so an API call can never observe a due-check pass midway.
pub type SharedTracker = Arc<Mutex<Tracker>>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("ping interval must be a positive number of ticks")]
    InvalidInterval,
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error("failed to write endpoint dump: {0}")]
    Dump(#[from] io::Error),
}

/// Outcome of [`Tracker::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Added { interval: u64 },
    AlreadyTracked,
}

/// Outcome of [`Tracker::unregister`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotTracked,
}

/// Outcome of [`Tracker::set_interval`]. `Created` marks the deliberate
/// implicit-registration path taken for names not yet tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { interval: u64 },
    Created { interval: u64 },
}

/// Owns every tracked endpoint and its classification.
///
/// Endpoints live in one map keyed by name, with the Reachable and
/// Unreachable partitions derived from each entry's status field, so an
/// endpoint can never be in both partitions or in neither. A due-check
/// pass still runs in two phases - scan, then apply - so the map is never
/// reclassified while it is being walked.
pub struct Tracker {
    endpoints: HashMap<String, Endpoint>,
    checker: Arc<dyn Checker>,
    dump: DumpFile,
    default_interval: u64,
}

impl Tracker {
    pub fn new(checker: Arc<dyn Checker>, dump: DumpFile, default_interval: u64) -> Self {
        Self { endpoints: HashMap::new(), checker, dump, default_interval }
    }

    pub fn into_shared(self) -> SharedTracker {
        Arc::new(Mutex::new(self))
    }

    /// Rebuild state from the dump file.
    ///
    /// Name and interval are authoritative from disk; status is recomputed
    /// with a fresh probe because the file may predate a reachability
    /// change. Returns how many endpoints were restored.
    pub async fn load(&mut self) -> Result<usize, TrackerError> {
        let dump = self.dump.load()?;
        if dump.skipped > 0 {
            warn!(skipped = dump.skipped, "ignored unusable dump rows");
        }

        let mut restored = 0;
        for (name, interval) in dump.entries {
            let status = self.checker.check(&name).await;
            self.endpoints.insert(name, Endpoint { interval, elapsed: 0, status });
            restored += 1;
        }

        if restored > 0 {
            info!(count = restored, "restored endpoints from dump file");
        }

        Ok(restored)
    }

    /// Start tracking `name`, probing it immediately to pick its initial
    /// classification. A name that is already tracked is left untouched.
    pub async fn register(
        &mut self,
        name: &str,
        interval: Option<u64>,
    ) -> Result<RegisterOutcome, TrackerError> {
        validation::validate_endpoint_name(name)?;
        let interval = match interval {
            Some(0) => return Err(TrackerError::InvalidInterval),
            Some(interval) => interval,
            None => self.default_interval,
        };

        if self.endpoints.contains_key(name) {
            return Ok(RegisterOutcome::AlreadyTracked);
        }

        let status = self.checker.check(name).await;
        self.endpoints.insert(name.to_owned(), Endpoint { interval, elapsed: 0, status });
        info!(endpoint = name, interval, %status, "endpoint registered");

        self.persist()?;
        Ok(RegisterOutcome::Added { interval })
    }

    /// Stop tracking `name`. Removing an unknown name changes nothing and
    /// triggers no dump write.
    pub fn unregister(&mut self, name: &str) -> Result<RemoveOutcome, TrackerError> {
        if self.endpoints.remove(name).is_none() {
            return Ok(RemoveOutcome::NotTracked);
        }

        info!(endpoint = name, "endpoint unregistered");
        self.persist()?;
        Ok(RemoveOutcome::Removed)
    }

    /// Change how often `name` is probed.
    ///
    /// For a tracked name the classification and schedule position are
    /// preserved; an unknown name is registered on the spot with the given
    /// interval.
    pub async fn set_interval(
        &mut self,
        name: &str,
        interval: u64,
    ) -> Result<UpdateOutcome, TrackerError> {
        validation::validate_endpoint_name(name)?;
        if interval == 0 {
            return Err(TrackerError::InvalidInterval);
        }

        let outcome = if let Some(endpoint) = self.endpoints.get_mut(name) {
            endpoint.interval = interval;
            info!(endpoint = name, interval, "ping interval updated");
            UpdateOutcome::Updated { interval }
        } else {
            let status = self.checker.check(name).await;
            self.endpoints.insert(name.to_owned(), Endpoint { interval, elapsed: 0, status });
            info!(endpoint = name, interval, %status, "endpoint registered via interval update");
            UpdateOutcome::Created { interval }
        };

        self.persist()?;
        Ok(outcome)
    }

    /// Advance every endpoint's schedule by one tick.
    pub fn tick(&mut self) {
        for endpoint in self.endpoints.values_mut() {
            endpoint.elapsed += 1;
        }
    }

    /// Probe everything that is due and reclassify on disagreement.
    ///
    /// Scan phase: due endpoints (`elapsed >= interval`) are collected up
    /// front, then probed; each probed entry has its counter reset whether
    /// or not its classification still matches. Apply phase: recorded
    /// migrations are flipped. The dump is rewritten only when at least
    /// one migration was applied. Returns the migration count.
    pub async fn evaluate_due(&mut self) -> Result<usize, TrackerError> {
        let due: Vec<(String, Reachability)> = self
            .endpoints
            .iter()
            .filter(|(_, endpoint)| endpoint.elapsed >= endpoint.interval)
            .map(|(name, endpoint)| (name.clone(), endpoint.status))
            .collect();

        let mut migrations: Vec<(String, Reachability)> = Vec::new();
        for (name, current) in due {
            let outcome = self.checker.check(&name).await;
            let Some(endpoint) = self.endpoints.get_mut(&name) else {
                continue;
            };
            endpoint.elapsed = 0;
            if outcome != current {
                migrations.push((name, outcome));
            }
        }

        let migrated = migrations.len();
        for (name, status) in migrations {
            if let Some(endpoint) = self.endpoints.get_mut(&name) {
                info!(endpoint = %name, from = %endpoint.status, to = %status, "endpoint reclassified");
                endpoint.status = status;
            }
        }

        if migrated > 0 {
            self.persist()?;
        }

        Ok(migrated)
    }

    /// Every tracked endpoint with its interval and classification,
    /// reachable entries first. Ordering within a partition is map order.
    pub fn snapshot(&self) -> Vec<EndpointStatus> {
        let row = |(name, endpoint): (&String, &Endpoint)| EndpointStatus {
            name: name.clone(),
            interval: endpoint.interval,
            status: endpoint.status,
        };

        let mut rows: Vec<EndpointStatus> = self
            .endpoints
            .iter()
            .filter(|(_, endpoint)| endpoint.status == Reachability::Reachable)
            .map(row)
            .collect();
        rows.extend(
            self.endpoints
                .iter()
                .filter(|(_, endpoint)| endpoint.status == Reachability::Unreachable)
                .map(row),
        );

        rows
    }

    /// The rendered dump table; also the body of the status report.
    pub fn status_report(&self) -> String {
        render_dump(&self.snapshot())
    }

    pub fn default_interval(&self) -> u64 {
        self.default_interval
    }

    fn persist(&self) -> Result<(), TrackerError> {
        self.dump.save(&self.snapshot())?;
        debug!("endpoint dump rewritten");
        Ok(())
    }
}
