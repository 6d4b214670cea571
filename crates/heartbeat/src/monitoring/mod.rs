pub mod checker;
/// Monitoring engine module - owns the per-endpoint state machine
///
/// This module is responsible for:
/// - Issuing HTTP reachability probes
/// - Tracking every registered endpoint's schedule and classification
/// - Driving the recurring tick/due-check cycle
/// - Validating endpoint names before they enter the tracked set
pub mod scheduler;
pub mod tracker;
pub mod types;
pub mod validation;

pub use checker::{Checker, HttpChecker};
pub use scheduler::Heartbeat;
pub use tracker::{SharedTracker, Tracker};
pub use types::{EndpointStatus, Reachability};
