//! # Metrics Traits
//!
//! Recording, snapshotting, and export are kept apart so cache logic only
//! ever writes counters.
//!
//! ```text
//!   ArcCache ──record──► ArcMetrics (atomic counters)
//!                             │
//!                             ▼
//!   MetricsSnapshotProvider<S>::snapshot() ──► S ──► MetricsExporter<S>
//! ```
//!
//! - [`MetricsSnapshotProvider`]: point-in-time copy of counters and gauges
//!   (bench/test).
//! - [`MetricsReset`]: zero all counters.
//! - [`MetricsExporter`]: publish a snapshot to a monitoring system.

/// Produces a point-in-time snapshot of a cache's metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Resets all counters to zero.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Publishes a snapshot (e.g. Prometheus text format).
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
