//! Heartbeat - endpoint reachability tracking
//!
//! This library owns the scheduling and state-transition engine behind the
//! heartbeat server: per-endpoint probe timers, the due-check cycle, and
//! the dump file that lets the tracked set survive a restart.

pub mod config;
pub mod monitoring;
pub mod store;

// Re-export main types
pub use monitoring::checker::{Checker, HttpChecker};
pub use monitoring::scheduler::Heartbeat;
pub use monitoring::tracker::{
    RegisterOutcome, RemoveOutcome, SharedTracker, Tracker, TrackerError, UpdateOutcome,
};
pub use monitoring::types::{EndpointStatus, Reachability};
pub use store::DumpFile;

/// Re-export common error types
pub use anyhow;

/// Ticks between probes of an endpoint registered without an explicit
/// interval, unless overridden by configuration.
pub const DEFAULT_PING_INTERVAL: u64 = 30;
