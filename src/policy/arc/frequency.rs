//! Frequency side of the ARC cache.
//!
//! Live entries are grouped into FIFO buckets keyed by access count. The
//! bucket map is ordered, so the smallest populated frequency is always the
//! first key; `min_freq` caches it so eviction is O(1).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                   FrequencyPartition<K, V> Layout                    │
//! │                                                                      │
//! │   main_index: FxHashMap<K, SlotId>    nodes: SlotArena<CacheNode>    │
//! │                                                                      │
//! │   buckets: BTreeMap<u64, IntrusiveList>                              │
//! │                                                                      │
//! │     min_freq = 1                                                     │
//! │        │                                                             │
//! │        ▼          oldest                 newest                      │
//! │     freq=1: head ─► [k7] ◄──► [k9] ◄── tail                          │
//! │     freq=3: head ─► [k2] ◄── tail                                    │
//! │     freq=4: head ─► [k1] ◄──► [k5] ◄── tail                          │
//! │                                                                      │
//! │   ghost: IntrusiveList (oldest at head)    ghost_index               │
//! │     head ─► [k4] ◄──► [k8] ◄── tail                                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bump Flow
//! ─────────
//!
//!   get("k7"):
//!     1. Unlink k7 from bucket 1
//!     2. access_count 1 → 2
//!     3. Append k7 to bucket 2 (created if absent)
//!     4. Bucket 1 empty → drop it; it was min_freq → min_freq = 2
//!
//! Eviction Flow
//! ─────────────
//!
//!   evict():
//!     1. Pop head of bucket[min_freq] (oldest among ties)
//!     2. Bucket empty → drop it, min_freq = first remaining key
//!     3. Drop the oldest ghost if the ghost list is full
//!     4. Reset the node's count and append it to the ghost list
//!
//! `ghost_capacity` is fixed at construction and does not follow later
//! capacity adaptation.

use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;
use crate::policy::arc::node::CacheNode;

/// LFU partition with ghost tracking.
#[derive(Debug)]
pub struct FrequencyPartition<K, V> {
    nodes: SlotArena<CacheNode<K, V>>,
    buckets: BTreeMap<u64, IntrusiveList>,
    main_index: FxHashMap<K, SlotId>,
    ghost: IntrusiveList,
    ghost_index: FxHashMap<K, SlotId>,
    min_freq: u64,
    capacity: usize,
    ghost_capacity: usize,
}

impl<K, V> FrequencyPartition<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a partition holding at most `capacity` live entries and
    /// `capacity` ghost keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity.saturating_mul(2)),
            buckets: BTreeMap::new(),
            main_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ghost: IntrusiveList::new(),
            ghost_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            min_freq: 0,
            capacity,
            ghost_capacity: capacity,
        }
    }

    /// Inserts or updates `key`.
    ///
    /// An existing entry gets the new value and one frequency bump. A new
    /// entry starts at frequency 1, evicting the least frequent entry first
    /// when full. Returns `false` only when the capacity is zero.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if let Some(&id) = self.main_index.get(&key) {
            if let Some(node) = self.nodes.get_mut(id) {
                node.set_value(value);
            }
            self.bump(id);
            return true;
        }

        self.insert_new(key, value);
        true
    }

    /// Looks up `key` and bumps its frequency on a hit.
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let id = *self.main_index.get(key)?;
        self.bump(id);
        self.nodes.get(id).map(|node| node.value().clone())
    }

    /// Removes `key` from the ghost list and returns its last value.
    pub fn check_ghost(&mut self, key: &K) -> Option<V> {
        let id = self.ghost_index.remove(key)?;
        self.ghost.unlink(&mut self.nodes, id);
        self.nodes.remove(id).map(|node| node.into_parts().1)
    }

    /// Returns `true` if `key` is live in a frequency bucket.
    pub fn exists_in_main(&self, key: &K) -> bool {
        self.main_index.contains_key(key)
    }

    pub fn increase_capacity(&mut self) {
        self.capacity += 1;
    }

    /// Shrinks by one slot, evicting the least frequent entry first if full.
    /// Returns `false` (and changes nothing) at capacity 0.
    pub fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.main_index.len() >= self.capacity {
            self.evict_least_frequent();
        }
        self.capacity -= 1;
        true
    }

    /// Returns the value of a live entry without bumping it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.main_index.get(key)?;
        self.nodes.get(id).map(|node| node.value())
    }

    /// Returns the access count (bucket frequency) of a live entry.
    pub fn access_count(&self, key: &K) -> Option<u64> {
        let id = *self.main_index.get(key)?;
        self.nodes.get(id).map(|node| node.access_count())
    }

    /// Smallest populated frequency, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        if self.buckets.is_empty() {
            None
        } else {
            Some(self.min_freq)
        }
    }

    /// Keys in bucket `freq`, oldest first.
    pub fn bucket_keys(&self, freq: u64) -> Vec<&K> {
        self.buckets
            .get(&freq)
            .map(|bucket| {
                bucket
                    .iter(&self.nodes)
                    .filter_map(|id| self.nodes.get(id).map(|node| node.key()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains_ghost(&self, key: &K) -> bool {
        self.ghost_index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.main_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main_index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ghost_len(&self) -> usize {
        self.ghost.len()
    }

    pub fn ghost_capacity(&self) -> usize {
        self.ghost_capacity
    }

    /// Drops every live and ghost entry. Capacity is left untouched.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.clear();
        self.main_index.clear();
        self.ghost.clear();
        self.ghost_index.clear();
        self.min_freq = 0;
    }

    fn insert_new(&mut self, key: K, value: V) {
        if let Some(stale) = self.ghost_index.remove(&key) {
            self.ghost.unlink(&mut self.nodes, stale);
            self.nodes.remove(stale);
        }

        if self.main_index.len() >= self.capacity {
            self.evict_least_frequent();
        }

        let id = self.nodes.insert(CacheNode::new(key.clone(), value));
        self.buckets
            .entry(1)
            .or_default()
            .push_back(&mut self.nodes, id);
        self.main_index.insert(key, id);
        self.min_freq = 1;
    }

    fn bump(&mut self, id: SlotId) {
        let Some(old_freq) = self.nodes.get(id).map(|node| node.access_count()) else {
            return;
        };

        let old_empty = match self.buckets.get_mut(&old_freq) {
            Some(bucket) => {
                bucket.unlink(&mut self.nodes, id);
                bucket.is_empty()
            },
            None => false,
        };

        let Some(new_freq) = self.nodes.get_mut(id).map(|node| node.increment_access_count())
        else {
            return;
        };

        self.buckets
            .entry(new_freq)
            .or_default()
            .push_back(&mut self.nodes, id);

        if old_empty && old_freq != new_freq {
            self.buckets.remove(&old_freq);
            // The bumped node now populates `new_freq`, so it is the next minimum.
            if old_freq == self.min_freq {
                self.min_freq = new_freq;
            }
        }
    }

    fn evict_least_frequent(&mut self) {
        if !self.buckets.contains_key(&self.min_freq) {
            match self.buckets.keys().next() {
                Some(&first) => self.min_freq = first,
                None => return,
            }
        }

        let freq = self.min_freq;
        let (victim, now_empty) = match self.buckets.get_mut(&freq) {
            Some(bucket) => (bucket.pop_front(&mut self.nodes), bucket.is_empty()),
            None => return,
        };
        if now_empty {
            self.buckets.remove(&freq);
            // Frequencies need not be contiguous; take the next populated one.
            self.min_freq = self.buckets.keys().next().copied().unwrap_or(0);
        }

        let Some(id) = victim else {
            return;
        };
        let Some(key) = self.nodes.get(id).map(|node| node.key().clone()) else {
            return;
        };
        self.main_index.remove(&key);

        if self.ghost_capacity == 0 {
            self.nodes.remove(id);
            trace!(freq, "frequency eviction dropped (no ghost capacity)");
            return;
        }

        if self.ghost.len() >= self.ghost_capacity {
            self.drop_oldest_ghost();
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.reset_access_count();
        }
        self.ghost.push_back(&mut self.nodes, id);
        self.ghost_index.insert(key, id);
        trace!(
            freq,
            min_freq = self.min_freq,
            ghost_len = self.ghost.len(),
            "frequency eviction moved entry to ghost list"
        );
    }

    fn drop_oldest_ghost(&mut self) {
        let Some(id) = self.ghost.pop_front(&mut self.nodes) else {
            return;
        };
        if let Some(node) = self.nodes.remove(id) {
            self.ghost_index.remove(node.key());
        }
        trace!(slot = id.index(), "frequency ghost overflow dropped oldest key");
    }

    /// Verifies bucket membership, `min_freq`, index agreement, and bounds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.ghost.check_invariants(&self.nodes)?;

        let mut linked = 0usize;
        for (&freq, bucket) in &self.buckets {
            bucket.check_invariants(&self.nodes)?;
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("bucket {freq} is empty")));
            }
            for id in bucket.iter(&self.nodes) {
                let node = self
                    .nodes
                    .get(id)
                    .ok_or_else(|| InvariantError::new("bucket links a free slot"))?;
                if node.access_count() != freq {
                    return Err(InvariantError::new(format!(
                        "node with access count {} sits in bucket {}",
                        node.access_count(),
                        freq
                    )));
                }
                if self.main_index.get(node.key()) != Some(&id) {
                    return Err(InvariantError::new("bucket node missing from index"));
                }
                if self.ghost_index.contains_key(node.key()) {
                    return Err(InvariantError::new("key is both live and ghosted"));
                }
            }
            linked += bucket.len();
        }

        if let Some(&first) = self.buckets.keys().next()
            && first != self.min_freq
        {
            return Err(InvariantError::new(format!(
                "min_freq is {} but smallest bucket is {}",
                self.min_freq, first
            )));
        }
        if linked != self.main_index.len() {
            return Err(InvariantError::new(format!(
                "buckets link {} nodes, index holds {}",
                linked,
                self.main_index.len()
            )));
        }
        if self.main_index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "frequency main holds {} entries, capacity is {}",
                self.main_index.len(),
                self.capacity
            )));
        }
        if self.ghost.len() > self.ghost_capacity || self.ghost_index.len() != self.ghost.len() {
            return Err(InvariantError::new(format!(
                "frequency ghost holds {} keys (index {}), ghost capacity is {}",
                self.ghost.len(),
                self.ghost_index.len(),
                self.ghost_capacity
            )));
        }
        if self.nodes.len() != linked + self.ghost.len() {
            return Err(InvariantError::new(format!(
                "frequency arena holds {} nodes, lists link {}",
                self.nodes.len(),
                linked + self.ghost.len()
            )));
        }
        for id in self.ghost.iter(&self.nodes) {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| InvariantError::new("frequency ghost links a free slot"))?;
            if self.ghost_index.get(node.key()) != Some(&id) {
                return Err(InvariantError::new("frequency ghost node missing from index"));
            }
            if node.access_count() != 1 {
                return Err(InvariantError::new("ghost node kept its access count"));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frequency partition invariant violated: {err}");
        }
    }
}
