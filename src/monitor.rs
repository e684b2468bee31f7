// Ticker counters. Constructed once in main and shared by Arc; there is no
// global instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct TickerMonitor {
    snapshots_built: AtomicU64,
    frames_rendered: AtomicU64,
    snapshots_lagged: AtomicU64,
    last_build_us: AtomicU64,
    max_boundary_late_ms: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorStats {
    pub snapshots_built: u64,
    pub frames_rendered: u64,
    pub snapshots_lagged: u64,
    pub last_build_us: u64,
    pub max_boundary_late_ms: u64,
}

impl TickerMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one snapshot build and how far past the boundary it ran.
    pub fn record_build(&self, took: Duration, late_ms: u64) {
        self.snapshots_built.fetch_add(1, Ordering::Relaxed);
        self.last_build_us.store(
            u64::try_from(took.as_micros()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );
        self.max_boundary_late_ms.fetch_max(late_ms, Ordering::Relaxed);
    }

    pub fn record_frame(&self) {
        self.frames_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lagged(&self, skipped: u64) {
        self.snapshots_lagged.fetch_add(skipped, Ordering::Relaxed);
    }

    pub fn stats(&self) -> MonitorStats {
        MonitorStats {
            snapshots_built: self.snapshots_built.load(Ordering::Relaxed),
            frames_rendered: self.frames_rendered.load(Ordering::Relaxed),
            snapshots_lagged: self.snapshots_lagged.load(Ordering::Relaxed),
            last_build_us: self.last_build_us.load(Ordering::Relaxed),
            max_boundary_late_ms: self.max_boundary_late_ms.load(Ordering::Relaxed),
        }
    }
}
