use std::fmt::Write as _;
use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::ArcMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for ARC metrics snapshots.
///
/// Writes in the Prometheus text exposition format so the output can be
/// scraped directly or forwarded to an OpenTelemetry collector. Write errors
/// are ignored; metrics export never affects cache behavior.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn push_sample(&self, out: &mut String, kind: &str, suffix: &str, value: u64) {
        let name = if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        };
        let _ = writeln!(out, "# TYPE {name} {kind}");
        let _ = writeln!(out, "{name} {value}");
    }
}

impl<W: Write + Send> MetricsExporter<ArcMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ArcMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("put_calls_total", snapshot.put_calls),
            ("put_updates_total", snapshot.put_updates),
            ("put_new_total", snapshot.put_new),
            ("recency_ghost_hits_total", snapshot.recency_ghost_hits),
            ("frequency_ghost_hits_total", snapshot.frequency_ghost_hits),
            ("ghost_revivals_total", snapshot.ghost_revivals),
            ("adaptations_to_recency_total", snapshot.adaptations_to_recency),
            (
                "adaptations_to_frequency_total",
                snapshot.adaptations_to_frequency,
            ),
            ("adaptations_skipped_total", snapshot.adaptations_skipped),
            ("promotions_total", snapshot.promotions),
        ];
        let mut out = String::new();
        for (suffix, value) in counters {
            self.push_sample(&mut out, "counter", suffix, value);
        }

        let gauges = [
            ("recency_len", snapshot.recency_len),
            ("recency_capacity", snapshot.recency_capacity),
            ("recency_ghost_len", snapshot.recency_ghost_len),
            ("frequency_len", snapshot.frequency_len),
            ("frequency_capacity", snapshot.frequency_capacity),
            ("frequency_ghost_len", snapshot.frequency_ghost_len),
            ("capacity", snapshot.capacity),
        ];
        for (suffix, value) in gauges {
            self.push_sample(&mut out, "gauge", suffix, value as u64);
        }

        // One write per snapshot so concurrent exports never interleave.
        let mut writer = self.writer.lock();
        let _ = writer.write_all(out.as_bytes());
        let _ = writer.flush();
    }
}
