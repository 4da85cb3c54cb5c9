//! Adaptive Replacement Cache (ARC) built from two cooperating partitions.
//!
//! A [`RecencyPartition`] (LRU) and a [`FrequencyPartition`] (LFU) split one
//! capacity budget. Each keeps a ghost list of recently evicted keys; a hit in
//! one side's ghost list means that side evicted too eagerly, so one unit of
//! capacity moves to it from the other side.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                              ArcCache<K, V>                                 │
//! │                                                                             │
//! │   total_capacity = recency.capacity + frequency.capacity                    │
//! │                                                                             │
//! │   ┌──────────────── Mutex ────────────────┐ ┌──────────── Mutex ─────────┐  │
//! │   │ RecencyPartition                      │ │ FrequencyPartition         │  │
//! │   │   main:  MRU [..] ◄──► [..] LRU       │ │   buckets: 1 → [..]        │  │
//! │   │   ghost: new [..] ◄──► [..] old       │ │            3 → [..]        │  │
//! │   └───────────────────────────────────────┘ │   ghost: old [..] new      │  │
//! │                                             └────────────────────────────┘  │
//! │                                                                             │
//! │   recency ghost hit   → frequency.decrease_capacity() → recency +1          │
//! │   frequency ghost hit → recency.decrease_capacity()   → frequency +1        │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Key Lifecycle
//! ─────────────
//!
//! ```text
//!   Absent ──put──► RecencyMain ──count ≥ threshold──► FrequencyMain
//!                     │    ▲                               │
//!                 evict│    │revive (get/put)          evict│
//!                     ▼    │                               ▼
//!                 RecencyGhost ◄────────┐           FrequencyGhost
//!                     │                 └──revive into RecencyMain──┘
//!                     ▼ ghost overflow
//!                   Absent
//! ```
//!
//! Get Flow
//! ────────
//!
//!   get(key):
//!     1. Probe both ghost lists (adapt capacities, keep recovered value)
//!     2. Live in frequency main → bump, hit
//!     3. Live in recency main → bump, promote if threshold reached, hit
//!     4. Recovered from a ghost → re-warm recency main, still a miss
//!     5. Otherwise miss
//!
//! ## Concurrency
//!
//! Each partition sits behind its own `parking_lot::Mutex`, held for a single
//! partition call. The coordinator takes no lock of its own, so the
//! probe → check → mutate → promote sequence is not atomic across partitions.
//! Racing callers on one key may duplicate an insert, miss or repeat a
//! promotion, or adapt on stale information, but each partition stays
//! structurally consistent.
//!
//! ## Example Usage
//!
//! ```
//! use arckit::policy::arc::ArcCache;
//!
//! let cache = ArcCache::new(4, 2);
//! cache.put("page1", "content1");
//! assert!(cache.in_recency_main(&"page1"));
//!
//! // The second access reaches the threshold and promotes.
//! assert_eq!(cache.get(&"page1"), Some("content1"));
//! assert!(cache.in_frequency_main(&"page1"));
//!
//! assert_eq!(cache.get(&"missing"), None);
//! assert_eq!(cache.get_or_default(&"missing"), "");
//! ```

pub mod frequency;
pub mod node;
pub mod recency;

use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{ArcMetrics, ArcMetricsSnapshot, MetricsReset, MetricsSnapshotProvider};
use crate::traits::{CachePolicy, ConcurrentCache};

pub use frequency::FrequencyPartition;
pub use node::CacheNode;
pub use recency::RecencyPartition;

/// Capacity used by [`ArcCache::default`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Access count at which a recency entry is promoted, unless configured.
pub const DEFAULT_TRANSFORM_THRESHOLD: u64 = 2;

/// Observable coordinator events, counted when the `metrics` feature is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArcEvent {
    GetHit,
    GetMiss,
    PutUpdate,
    PutNew,
    RecencyGhostHit,
    FrequencyGhostHit,
    GhostRevival,
    AdaptedToRecency,
    AdaptedToFrequency,
    AdaptationSkipped,
    Promotion,
}

/// Adaptive replacement cache coordinating a recency and a frequency
/// partition.
///
/// Cold entries always land in the recency partition. An entry whose access
/// count reaches `transform_threshold` there is re-created in the frequency
/// partition. Ghost hits shift capacity between the two, one unit at a time,
/// keeping `recency_capacity() + frequency_capacity() == capacity()`.
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
///
/// let cache: ArcCache<u32, String> = ArcCache::new(4, 100);
/// cache.put(1, "a".to_string());
/// cache.put(2, "b".to_string());
/// cache.put(3, "c".to_string()); // recency holds 2, so 1 becomes a ghost
///
/// // A ghost hit is still a miss, but it re-warms the old value.
/// assert_eq!(cache.get(&1), None);
/// assert_eq!(cache.get(&1), Some("a".to_string()));
/// assert_eq!(cache.recency_capacity(), 3);
/// assert_eq!(cache.frequency_capacity(), 1);
/// ```
pub struct ArcCache<K, V> {
    recency: Mutex<RecencyPartition<K, V>>,
    frequency: Mutex<FrequencyPartition<K, V>>,
    requested_capacity: usize,
    total_capacity: usize,
    transform_threshold: u64,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with `capacity` split evenly between the partitions.
    ///
    /// Each side gets `capacity / 2`, so an odd capacity loses one slot. A
    /// threshold of 0 behaves like 1 and is stored as 1.
    ///
    /// # Example
    ///
    /// ```
    /// use arckit::policy::arc::ArcCache;
    ///
    /// let cache: ArcCache<u64, u64> = ArcCache::new(7, 3);
    /// assert_eq!(cache.capacity(), 6);
    /// assert_eq!(cache.requested_capacity(), 7);
    /// assert_eq!(cache.recency_capacity(), 3);
    /// assert_eq!(cache.frequency_capacity(), 3);
    /// ```
    pub fn new(capacity: usize, transform_threshold: u64) -> Self {
        let transform_threshold = transform_threshold.max(1);
        let half = capacity / 2;
        Self {
            recency: Mutex::new(RecencyPartition::new(half, transform_threshold)),
            frequency: Mutex::new(FrequencyPartition::new(half)),
            requested_capacity: capacity,
            total_capacity: half * 2,
            transform_threshold,
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::new(),
        }
    }

    /// Like [`ArcCache::new`], but rejects a zero threshold.
    pub fn try_new(capacity: usize, transform_threshold: u64) -> Result<Self, ConfigError> {
        if transform_threshold == 0 {
            return Err(ConfigError::ZeroTransformThreshold);
        }
        Ok(Self::new(capacity, transform_threshold))
    }

    /// Creates a cache with [`DEFAULT_TRANSFORM_THRESHOLD`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, DEFAULT_TRANSFORM_THRESHOLD)
    }

    /// Effective total capacity (`2 * (requested / 2)`).
    pub fn capacity(&self) -> usize {
        self.total_capacity
    }

    /// Capacity as passed to the constructor.
    pub fn requested_capacity(&self) -> usize {
        self.requested_capacity
    }

    pub fn transform_threshold(&self) -> u64 {
        self.transform_threshold
    }

    /// Number of live entries across both partitions.
    pub fn len(&self) -> usize {
        self.recency.lock().len() + self.frequency.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is live in either partition. No side effects.
    pub fn contains(&self, key: &K) -> bool {
        self.in_frequency_main(key) || self.in_recency_main(key)
    }

    pub fn in_recency_main(&self, key: &K) -> bool {
        self.recency.lock().exists_in_main(key)
    }

    pub fn in_frequency_main(&self, key: &K) -> bool {
        self.frequency.lock().exists_in_main(key)
    }

    pub fn recency_capacity(&self) -> usize {
        self.recency.lock().capacity()
    }

    pub fn frequency_capacity(&self) -> usize {
        self.frequency.lock().capacity()
    }

    pub fn recency_len(&self) -> usize {
        self.recency.lock().len()
    }

    pub fn frequency_len(&self) -> usize {
        self.frequency.lock().len()
    }

    pub fn recency_ghost_len(&self) -> usize {
        self.recency.lock().ghost_len()
    }

    pub fn frequency_ghost_len(&self) -> usize {
        self.frequency.lock().ghost_len()
    }

    /// Drops all entries and ghosts and restores the initial even split.
    pub fn clear(&self) {
        let half = self.total_capacity / 2;
        *self.recency.lock() = RecencyPartition::new(half, self.transform_threshold);
        *self.frequency.lock() = FrequencyPartition::new(half);
    }

    /// Checks both partitions plus the capacity-sum and single-residency
    /// invariants. Only meaningful while no other thread is mutating.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let recency = self.recency.lock();
        let frequency = self.frequency.lock();
        recency.check_invariants()?;
        frequency.check_invariants()?;

        let sum = recency.capacity() + frequency.capacity();
        if sum != self.total_capacity {
            return Err(InvariantError::new(format!(
                "partition capacities sum to {} ({} + {}), expected {}",
                sum,
                recency.capacity(),
                frequency.capacity(),
                self.total_capacity
            )));
        }
        if recency.main_keys().any(|key| frequency.exists_in_main(key)) {
            return Err(InvariantError::new("key is live in both partitions"));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("ARC invariant violated: {err}");
        }
    }

    #[inline]
    fn record(&self, event: ArcEvent) {
        #[cfg(feature = "metrics")]
        self.metrics.record(event);
        #[cfg(not(feature = "metrics"))]
        let _ = event;
    }
}

impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Inserts or updates `key`.
    ///
    /// Ghost hits on `key` adapt the capacity split first; the recovered
    /// ghost value is discarded. A live entry is updated in place (and may be
    /// promoted); anything else is inserted cold into the recency partition.
    pub fn put(&self, key: K, value: V) {
        let _ = self.probe_ghosts(&key);

        let in_frequency = self.frequency.lock().exists_in_main(&key);
        let in_recency = self.recency.lock().exists_in_main(&key);

        if !in_frequency && !in_recency {
            self.recency.lock().put(key, value);
            self.record(ArcEvent::PutNew);
            return;
        }

        self.record(ArcEvent::PutUpdate);
        if in_frequency {
            self.frequency.lock().put(key.clone(), value.clone());
        }
        if in_recency {
            let promote = self.recency.lock().put(key.clone(), value.clone());
            if promote {
                self.promote(key, value);
            }
        }
    }

    /// Looks up `key`; `None` is a miss.
    ///
    /// A key found only in a ghost list is re-inserted into the recency
    /// partition with its old value, but the call still reports a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let ghost_value = self.probe_ghosts(key);

        let in_frequency = self.frequency.lock().exists_in_main(key);
        let in_recency = self.recency.lock().exists_in_main(key);

        let mut hit = None;
        if in_frequency {
            hit = self.frequency.lock().get(key);
        }
        if in_recency {
            let access = self.recency.lock().get(key);
            if let Some((value, promote)) = access {
                if promote {
                    self.promote(key.clone(), value.clone());
                }
                hit = Some(value);
            }
        }

        if hit.is_some() {
            self.record(ArcEvent::GetHit);
            return hit;
        }

        self.record(ArcEvent::GetMiss);
        if let Some(value) = ghost_value {
            self.recency.lock().put(key.clone(), value);
            self.record(ArcEvent::GhostRevival);
            trace!("ghost value re-warmed into recency partition");
        }
        None
    }

    /// Looks up `key`, returning `V::default()` on a miss.
    pub fn get_or_default(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }

    /// Returns a live value without touching recency, frequency, or ghosts.
    pub fn peek(&self, key: &K) -> Option<V> {
        let from_frequency = self.frequency.lock().peek(key).cloned();
        from_frequency.or_else(|| self.recency.lock().peek(key).cloned())
    }

    /// Moves an entry from recency main into frequency main.
    ///
    /// The frequency side gets a fresh node and the recency node is always
    /// removed. A frequency partition at capacity 0 refuses the insert, so
    /// the entry is dropped from the cache.
    fn promote(&self, key: K, value: V) {
        let accepted = self.frequency.lock().put(key.clone(), value);
        self.recency.lock().remove(&key);
        if accepted {
            self.record(ArcEvent::Promotion);
            trace!("promoted entry from recency to frequency partition");
        } else {
            trace!("promotion dropped entry; frequency partition has no capacity");
        }
    }

    /// Removes `key` from both ghost lists, adapting capacities on each hit.
    ///
    /// Returns the recovered ghost value; a frequency ghost wins if both hit.
    fn probe_ghosts(&self, key: &K) -> Option<V> {
        let mut recovered = None;

        let recency_ghost = self.recency.lock().check_ghost(key);
        if let Some(value) = recency_ghost {
            self.record(ArcEvent::RecencyGhostHit);
            let shrunk = self.frequency.lock().decrease_capacity();
            if shrunk {
                let recency_capacity = {
                    let mut recency = self.recency.lock();
                    recency.increase_capacity();
                    recency.capacity()
                };
                self.record(ArcEvent::AdaptedToRecency);
                debug!(recency_capacity, "recency ghost hit; capacity shifted to recency");
            } else {
                self.record(ArcEvent::AdaptationSkipped);
                debug!("recency ghost hit; frequency partition already at capacity 0");
            }
            recovered = Some(value);
        }

        let frequency_ghost = self.frequency.lock().check_ghost(key);
        if let Some(value) = frequency_ghost {
            self.record(ArcEvent::FrequencyGhostHit);
            let shrunk = self.recency.lock().decrease_capacity();
            if shrunk {
                let frequency_capacity = {
                    let mut frequency = self.frequency.lock();
                    frequency.increase_capacity();
                    frequency.capacity()
                };
                self.record(ArcEvent::AdaptedToFrequency);
                debug!(frequency_capacity, "frequency ghost hit; capacity shifted to frequency");
            } else {
                self.record(ArcEvent::AdaptationSkipped);
                debug!("frequency ghost hit; recency partition already at capacity 0");
            }
            recovered = Some(value);
        }

        recovered
    }
}

impl<K, V> Default for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TRANSFORM_THRESHOLD)
    }
}

impl<K, V> fmt::Debug for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recency = self.recency.lock();
        let frequency = self.frequency.lock();
        f.debug_struct("ArcCache")
            .field("capacity", &self.total_capacity)
            .field("transform_threshold", &self.transform_threshold)
            .field("recency_len", &recency.len())
            .field("recency_capacity", &recency.capacity())
            .field("recency_ghost_len", &recency.ghost_len())
            .field("frequency_len", &frequency.len())
            .field("frequency_capacity", &frequency.capacity())
            .field("frequency_ghost_len", &frequency.ghost_len())
            .field("min_freq", &frequency.min_freq())
            .finish()
    }
}

impl<K, V> CachePolicy<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        ArcCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        ArcCache::get(self, key)
    }
}

impl<K, V> ConcurrentCache for ArcCache<K, V>
where
    K: Send,
    V: Send,
{
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        let mut snapshot = ArcMetricsSnapshot::default();
        self.metrics.fill_counters(&mut snapshot);
        {
            let recency = self.recency.lock();
            snapshot.recency_len = recency.len();
            snapshot.recency_capacity = recency.capacity();
            snapshot.recency_ghost_len = recency.ghost_len();
        }
        {
            let frequency = self.frequency.lock();
            snapshot.frequency_len = frequency.len();
            snapshot.frequency_capacity = frequency.capacity();
            snapshot.frequency_ghost_len = frequency.ghost_len();
        }
        snapshot.capacity = self.total_capacity;
        snapshot
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for ArcCache<K, V> {
    fn reset_metrics(&self) {
        self.metrics.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_new_splits_capacity_evenly() {
        let cache: ArcCache<u32, u32> = ArcCache::new(10, 2);
        assert_eq!(cache.capacity(), 10);
        assert_eq!(cache.recency_capacity(), 5);
        assert_eq!(cache.frequency_capacity(), 5);
        assert!(cache.is_empty());
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_odd_capacity_drops_one_slot() {
        let cache: ArcCache<u32, u32> = ArcCache::new(5, 2);
        assert_eq!(cache.requested_capacity(), 5);
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.recency_capacity() + cache.frequency_capacity(), 4);
    }

    #[test]
    fn arc_zero_threshold_is_clamped() {
        let cache: ArcCache<u32, u32> = ArcCache::new(4, 0);
        assert_eq!(cache.transform_threshold(), 1);
        assert!(ArcCache::<u32, u32>::try_new(4, 0).is_err());
        assert!(ArcCache::<u32, u32>::try_new(4, 1).is_ok());
    }

    #[test]
    fn arc_put_then_get_round_trips() {
        let cache = ArcCache::new(4, 100);
        cache.put("k", 7);
        assert_eq!(cache.get(&"k"), Some(7));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn arc_cold_entries_land_in_recency() {
        let cache = ArcCache::new(4, 2);
        cache.put(1, "a");
        assert!(cache.in_recency_main(&1));
        assert!(!cache.in_frequency_main(&1));
    }

    #[test]
    fn arc_put_update_replaces_value() {
        let cache = ArcCache::new(4, 100);
        cache.put(1, "a");
        cache.put(1, "b");
        assert_eq!(cache.peek(&1), Some("b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn arc_get_threshold_times_promotes() {
        for threshold in 1..=5u64 {
            let cache = ArcCache::new(8, threshold);
            cache.put(1, 10);
            for _ in 0..threshold {
                assert_eq!(cache.get(&1), Some(10));
            }
            assert!(cache.in_frequency_main(&1), "threshold {threshold}");
            assert!(!cache.in_recency_main(&1), "threshold {threshold}");
            cache.debug_validate_invariants();
        }
    }

    #[test]
    fn arc_put_can_promote() {
        let cache = ArcCache::new(4, 2);
        cache.put(1, "a");
        cache.put(1, "b");
        assert!(cache.in_frequency_main(&1));
        assert_eq!(cache.peek(&1), Some("b"));
    }

    #[test]
    fn arc_promoted_entry_starts_fresh_count() {
        let cache = ArcCache::new(4, 3);
        cache.put(1, "a");
        cache.get(&1);
        cache.get(&1);
        assert!(cache.in_frequency_main(&1));
        assert_eq!(cache.frequency.lock().access_count(&1), Some(1));
        cache.get(&1);
        assert_eq!(cache.frequency.lock().access_count(&1), Some(2));
    }

    #[test]
    fn arc_infinite_threshold_is_pure_lru() {
        let cache = ArcCache::new(8, u64::MAX);
        for k in 0..5 {
            cache.put(k, k);
        }
        assert!(!cache.contains(&0));
        for k in 1..5 {
            assert!(cache.in_recency_main(&k));
        }
        assert_eq!(cache.recency_ghost_len(), 1);
        assert_eq!(cache.frequency_len(), 0);
    }

    #[test]
    fn arc_ghost_revival_reports_miss_then_hit() {
        let cache = ArcCache::new(4, 100);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        assert!(!cache.contains(&1));

        assert_eq!(cache.get(&1), None);
        assert!(cache.in_recency_main(&1));
        assert_eq!(cache.get(&1), Some("a"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_two_slot_revival() {
        let cache = ArcCache::new(2, 100);
        cache.put(1, "a");
        cache.put(2, "b"); // recency holds one entry; 1 → ghost
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 0);
        assert_eq!(cache.get(&1), Some("a"));
        assert!(cache.contains(&2));
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_revival_uses_old_value_not_later_put() {
        let cache = ArcCache::new(4, 100);
        cache.put(1, "old");
        cache.put(2, "b");
        cache.put(3, "c");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.peek(&1), Some("old"));
    }

    #[test]
    fn arc_put_on_ghost_key_adapts_and_inserts_new_value() {
        let cache = ArcCache::new(4, 100);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        cache.put(1, "fresh");
        assert_eq!(cache.recency_capacity(), 3);
        assert_eq!(cache.frequency_capacity(), 1);
        assert_eq!(cache.peek(&1), Some("fresh"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_recency_ghost_hit_shifts_capacity() {
        let cache = ArcCache::new(4, 100);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        assert_eq!(cache.recency_ghost_len(), 1);

        cache.get(&1);
        assert_eq!(cache.recency_capacity(), 3);
        assert_eq!(cache.frequency_capacity(), 1);
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_shrinking_full_frequency_side_evicts_first() {
        let cache = ArcCache::new(4, 2);
        cache.put(10, 10);
        cache.get(&10);
        cache.put(11, 11);
        cache.get(&11);
        assert_eq!(cache.frequency_len(), 2);

        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3); // 1 → recency ghost
        cache.get(&1);

        assert_eq!(cache.frequency_capacity(), 1);
        assert_eq!(cache.recency_capacity(), 3);
        assert!(!cache.in_frequency_main(&10)); // oldest at min_freq
        assert!(cache.in_frequency_main(&11));
        assert_eq!(cache.frequency_ghost_len(), 1);
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_frequency_ghost_revives_into_recency() {
        let cache = ArcCache::new(4, 2);
        cache.put(10, 10);
        cache.get(&10);
        cache.put(11, 11);
        cache.get(&11);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        cache.get(&1); // evicts 10 into the frequency ghost list

        assert_eq!(cache.get(&10), None);
        assert!(cache.in_recency_main(&10));
        assert!(!cache.in_frequency_main(&10));
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 2);
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_adaptation_skipped_when_other_side_empty() {
        let cache = ArcCache::new(2, 100);
        cache.put(1, 1);
        cache.put(2, 2); // 1 → ghost
        cache.get(&1); // frequency 1 → 0, recency 1 → 2
        cache.put(3, 3);
        cache.put(4, 4); // recency full at 2, evicts into ghost
        let ghost_key = if cache.contains(&1) { 2 } else { 1 };
        let _ = cache.get(&ghost_key); // frequency already 0: no shift
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 0);
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_promotion_into_zero_capacity_frequency_drops_entry() {
        let cache = ArcCache::new(2, 2);
        cache.put(1, 1);
        cache.put(2, 2); // 1 → ghost
        cache.get(&1); // frequency capacity drops to 0, 1 revived
        assert_eq!(cache.frequency_capacity(), 0);
        assert!(cache.in_recency_main(&1));

        // Threshold reached: the hit is still reported, then the entry is gone.
        assert_eq!(cache.get(&1), Some(1));
        assert!(!cache.in_recency_main(&1));
        assert!(!cache.in_frequency_main(&1));
        assert!(!cache.contains(&1));
        assert_eq!(cache.get(&1), None);
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_zero_capacity_refuses_everything() {
        let cache = ArcCache::new(0, 2);
        cache.put(1, 1);
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_get_or_default_on_miss() {
        let cache: ArcCache<u32, String> = ArcCache::new(4, 2);
        assert_eq!(cache.get_or_default(&1), String::new());
        cache.put(1, "x".to_string());
        assert_eq!(cache.get_or_default(&1), "x");
    }

    #[test]
    fn arc_clear_restores_split() {
        let cache = ArcCache::new(4, 100);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        cache.get(&1);
        assert_eq!(cache.recency_capacity(), 3);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 2);
        assert_eq!(cache.recency_ghost_len(), 0);
        cache.debug_validate_invariants();
    }

    #[test]
    fn arc_debug_output_names_partitions() {
        let cache: ArcCache<u32, u32> = ArcCache::new(4, 2);
        let dbg = format!("{:?}", cache);
        assert!(dbg.contains("recency_capacity"));
        assert!(dbg.contains("frequency_capacity"));
    }

    #[test]
    fn arc_is_concurrent_cache() {
        fn assert_concurrent<C: ConcurrentCache>() {}
        assert_concurrent::<ArcCache<u64, String>>();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_track_hits_ghosts_and_promotions() {
        let cache = ArcCache::new(4, 2);
        cache.put(1, 1);
        cache.get(&1); // hit + promotion
        cache.put(2, 2);
        cache.put(3, 3);
        cache.put(4, 4); // 2 → recency ghost
        cache.get(&2); // ghost hit, adaptation, revival
        cache.get(&9); // plain miss

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.get_misses, 2);
        assert_eq!(snapshot.promotions, 1);
        assert_eq!(snapshot.recency_ghost_hits, 1);
        assert_eq!(snapshot.adaptations_to_recency, 1);
        assert_eq!(snapshot.ghost_revivals, 1);
        assert_eq!(snapshot.put_new, 4);
        assert_eq!(
            snapshot.recency_capacity + snapshot.frequency_capacity,
            snapshot.capacity
        );

        cache.reset_metrics();
        assert_eq!(cache.snapshot().get_calls, 0);
    }
}
