use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

/// A port number as written by the user. Kept wider than `u16` so that
/// out-of-range values survive parsing and are simply reported as closed.
pub type Port = i64;

/// Outcome of probing one host:port pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub host: String,
    pub port: Port,
    pub open: bool,
}

impl ScanResult {
    pub fn new(host: impl Into<String>, port: Port, open: bool) -> Self {
        Self {
            host: host.into(),
            port,
            open,
        }
    }
}

/// Per-scan settings shared read-only by every probe task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    timeout: Duration,
    concurrency: usize,
}

impl ScanConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
    pub const DEFAULT_CONCURRENCY: usize = 100;

    /// Build a config. A concurrency of zero is raised to one.
    pub fn new(timeout: Duration, concurrency: usize) -> Self {
        Self {
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_CONCURRENCY)
    }
}

/// JSON envelope for a finished scan.
#[derive(Serialize, Debug, Clone)]
pub struct ScanReport {
    pub host: String,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub elapsed_ms: u64,
    pub scanned: usize,
    pub open_count: usize,
    pub results: Vec<ScanResult>,
}
