use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::ArcMetricsSnapshot;
use crate::policy::arc::ArcEvent;

#[derive(Debug, Default)]
pub struct ArcMetrics {
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub put_updates: MetricsCell,
    pub put_new: MetricsCell,
    pub recency_ghost_hits: MetricsCell,
    pub frequency_ghost_hits: MetricsCell,
    pub ghost_revivals: MetricsCell,
    pub adaptations_to_recency: MetricsCell,
    pub adaptations_to_frequency: MetricsCell,
    pub adaptations_skipped: MetricsCell,
    pub promotions: MetricsCell,
}

impl ArcMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record(&self, event: ArcEvent) {
        let cell = match event {
            ArcEvent::GetHit => &self.get_hits,
            ArcEvent::GetMiss => &self.get_misses,
            ArcEvent::PutUpdate => &self.put_updates,
            ArcEvent::PutNew => &self.put_new,
            ArcEvent::RecencyGhostHit => &self.recency_ghost_hits,
            ArcEvent::FrequencyGhostHit => &self.frequency_ghost_hits,
            ArcEvent::GhostRevival => &self.ghost_revivals,
            ArcEvent::AdaptedToRecency => &self.adaptations_to_recency,
            ArcEvent::AdaptedToFrequency => &self.adaptations_to_frequency,
            ArcEvent::AdaptationSkipped => &self.adaptations_skipped,
            ArcEvent::Promotion => &self.promotions,
        };
        cell.incr();
    }

    /// Copies the counters into `snapshot`; gauges are left to the caller.
    pub fn fill_counters(&self, snapshot: &mut ArcMetricsSnapshot) {
        snapshot.get_hits = self.get_hits.get();
        snapshot.get_misses = self.get_misses.get();
        snapshot.get_calls = snapshot.get_hits + snapshot.get_misses;
        snapshot.put_updates = self.put_updates.get();
        snapshot.put_new = self.put_new.get();
        snapshot.put_calls = snapshot.put_updates + snapshot.put_new;
        snapshot.recency_ghost_hits = self.recency_ghost_hits.get();
        snapshot.frequency_ghost_hits = self.frequency_ghost_hits.get();
        snapshot.ghost_revivals = self.ghost_revivals.get();
        snapshot.adaptations_to_recency = self.adaptations_to_recency.get();
        snapshot.adaptations_to_frequency = self.adaptations_to_frequency.get();
        snapshot.adaptations_skipped = self.adaptations_skipped.get();
        snapshot.promotions = self.promotions.get();
    }

    pub fn reset(&self) {
        for cell in [
            &self.get_hits,
            &self.get_misses,
            &self.put_updates,
            &self.put_new,
            &self.recency_ghost_hits,
            &self.frequency_ghost_hits,
            &self.ghost_revivals,
            &self.adaptations_to_recency,
            &self.adaptations_to_frequency,
            &self.adaptations_skipped,
            &self.promotions,
        ] {
            cell.reset();
        }
    }
}
