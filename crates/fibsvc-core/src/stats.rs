use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Request counters shared by every handler of a service instance.
#[derive(Debug, Default)]
pub struct ServiceStats {
    requests: AtomicU64,
    compute_nanos: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub total_compute_ms: f64,
    pub average_compute_ms: f64,
}

impl ServiceStats {
    pub fn record(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.compute_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let requests = self.requests.load(Ordering::Relaxed);
        let total_compute_ms = self.compute_nanos.load(Ordering::Relaxed) as f64 / 1_000_000.0;
        let average_compute_ms = if requests == 0 {
            0.0
        } else {
            total_compute_ms / requests as f64
        };
        StatsSnapshot {
            requests,
            total_compute_ms,
            average_compute_ms,
        }
    }
}
