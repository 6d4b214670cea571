use serde::{Deserialize, Serialize};

/// Binary classification produced by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    Reachable,
    Unreachable,
}

impl std::fmt::Display for Reachability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // These exact words are the dump file's status column.
        match self {
            Reachability::Reachable => write!(f, "Reachable"),
            Reachability::Unreachable => write!(f, "Unreachable"),
        }
    }
}

/// Per-endpoint schedule state.
///
/// `elapsed` counts ticks since the endpoint was last probed and resets
/// the moment a probe is issued, whatever the outcome. `interval` is the
/// number of ticks between probes and is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub interval: u64,
    pub elapsed: u64,
    pub status: Reachability,
}

/// One row of the status report. Schedule position (`elapsed`) is
/// deliberately absent: it is never reported or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointStatus {
    pub name: String,
    pub interval: u64,
    pub status: Reachability,
}
