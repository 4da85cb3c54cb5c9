//! Optional runtime counters for the ARC cache (`metrics` feature).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::ArcMetrics;
pub use snapshot::ArcMetricsSnapshot;
pub use traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
