//! Dump-file persistence for the tracked-endpoint set.
//!
//! The file is a bootstrap list, not a status cache: names and intervals
//! are authoritative on load, the status column is informational only and
//! is recomputed by a fresh probe when the tracker restores itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::monitoring::types::EndpointStatus;
use crate::monitoring::validation;

/// Exact header line of the endpoint dump. A file that does not open with
/// this line is ignored wholesale on load.
pub const DUMP_HEADER: &str = "Server,Ping Interval,Status";

/// Render the dump table: the header plus one `name,interval,status` row
/// per endpoint, every row newline-terminated. Doubles as the status
/// report returned to API callers. `elapsed` never appears here.
pub fn render_dump(rows: &[EndpointStatus]) -> String {
    let mut out = String::with_capacity(DUMP_HEADER.len() + 1 + rows.len() * 32);
    out.push_str(DUMP_HEADER);
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{},{},{}\n", row.name, row.interval, row.status));
    }

    out
}

/// What came back from a dump read: restorable `(name, interval)` pairs
/// plus the number of rows dropped as unusable.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadedDump {
    pub entries: Vec<(String, u64)>,
    pub skipped: usize,
}

/// Full-overwrite persistence at a fixed path.
#[derive(Debug, Clone)]
pub struct DumpFile {
    path: PathBuf,
}

impl DumpFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the dump with the given rows.
    pub fn save(&self, rows: &[EndpointStatus]) -> io::Result<()> {
        fs::write(&self.path, render_dump(rows))
    }

    /// Read the dump back.
    ///
    /// A missing file or a header that is not exactly [`DUMP_HEADER`]
    /// yields an empty result rather than an error. Rows whose interval
    /// does not parse to a positive integer, or whose name would not pass
    /// registration, are counted and skipped; loading continues.
    pub fn load(&self) -> io::Result<LoadedDump> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(LoadedDump::default()),
            Err(err) => return Err(err),
        };

        let mut lines = raw.lines();
        if lines.next() != Some(DUMP_HEADER) {
            return Ok(LoadedDump::default());
        }

        let mut loaded = LoadedDump::default();
        for line in lines.filter(|line| !line.is_empty()) {
            let mut columns = line.splitn(3, ',');
            let name = columns.next().unwrap_or_default();
            let interval = columns
                .next()
                .unwrap_or_default()
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|interval| *interval >= 1);

            match interval {
                Some(interval) if validation::validate_endpoint_name(name).is_ok() => {
                    loaded.entries.push((name.to_owned(), interval));
                }
                _ => loaded.skipped += 1,
            }
        }

        Ok(loaded)
    }
}
