/// Point-in-time view of an [`ArcCache`](crate::policy::arc::ArcCache)'s
/// counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArcMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,

    pub recency_ghost_hits: u64,
    pub frequency_ghost_hits: u64,
    /// Misses that re-warmed a ghost value into recency main.
    pub ghost_revivals: u64,

    pub adaptations_to_recency: u64,
    pub adaptations_to_frequency: u64,
    /// Ghost hits where the shrinking side was already at capacity 0.
    pub adaptations_skipped: u64,

    pub promotions: u64,

    /// Live entries in recency main at snapshot time.
    pub recency_len: usize,
    pub recency_capacity: usize,
    pub recency_ghost_len: usize,
    pub frequency_len: usize,
    pub frequency_capacity: usize,
    pub frequency_ghost_len: usize,
    pub capacity: usize,
}

impl ArcMetricsSnapshot {
    /// Hit ratio over all `get` calls, or `0.0` before the first call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_zero_calls() {
        let snapshot = ArcMetricsSnapshot::default();
        assert_eq!(snapshot.hit_ratio(), 0.0);

        let snapshot = ArcMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert!((snapshot.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
