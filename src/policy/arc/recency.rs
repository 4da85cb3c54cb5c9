//! Recency side of the ARC cache.
//!
//! A bounded LRU list plus a bounded ghost list of keys (and last values)
//! evicted from it. Both lists share one node arena, so eviction relinks the
//! victim node into the ghost list instead of reallocating it.
//!
//! ```text
//!   main  (capacity)        MRU [k5] ◄──► [k4] ◄──► [k3] LRU ──evict──┐
//!                                                                     │
//!   ghost (ghost_capacity)  new [k3] ◄──► [k2] ◄──► [k1] old ─► drop  ◄┘
//! ```
//!
//! `put` and `get` on a resident key move it to MRU, bump its access count,
//! and report whether the count reached the transform threshold. The caller
//! (the ARC coordinator) decides whether to promote.
//!
//! `ghost_capacity` is fixed at construction and does not follow later
//! `increase_capacity`/`decrease_capacity` calls.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;
use crate::policy::arc::node::CacheNode;

/// LRU partition with ghost tracking.
#[derive(Debug)]
pub struct RecencyPartition<K, V> {
    nodes: SlotArena<CacheNode<K, V>>,
    main: IntrusiveList,
    ghost: IntrusiveList,
    main_index: FxHashMap<K, SlotId>,
    ghost_index: FxHashMap<K, SlotId>,
    capacity: usize,
    ghost_capacity: usize,
    transform_threshold: u64,
}

impl<K, V> RecencyPartition<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a partition holding at most `capacity` live entries and
    /// `capacity` ghost keys.
    pub fn new(capacity: usize, transform_threshold: u64) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity.saturating_mul(2)),
            main: IntrusiveList::new(),
            ghost: IntrusiveList::new(),
            main_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ghost_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            ghost_capacity: capacity,
            transform_threshold,
        }
    }

    /// Inserts or updates `key`.
    ///
    /// Returns `true` when an existing entry's access count reached the
    /// transform threshold. New entries always return `false`. With a
    /// capacity of zero the call is a no-op.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if let Some(&id) = self.main_index.get(&key) {
            let promote = self.touch(id);
            if let Some(node) = self.nodes.get_mut(id) {
                node.set_value(value);
            }
            return promote;
        }

        self.insert_new(key, value);
        false
    }

    /// Looks up `key` in the main list.
    ///
    /// On a hit the entry moves to MRU and its access count is bumped; the
    /// returned flag tells whether it reached the transform threshold.
    pub fn get(&mut self, key: &K) -> Option<(V, bool)>
    where
        V: Clone,
    {
        let id = *self.main_index.get(key)?;
        let promote = self.touch(id);
        let value = self.nodes.get(id)?.value().clone();
        Some((value, promote))
    }

    /// Removes `key` from the ghost list and returns its last value.
    ///
    /// Never looks at the main list.
    pub fn check_ghost(&mut self, key: &K) -> Option<V> {
        let id = self.ghost_index.remove(key)?;
        self.ghost.unlink(&mut self.nodes, id);
        self.nodes.remove(id).map(|node| node.into_parts().1)
    }

    /// Returns `true` if `key` is live in the main list.
    pub fn exists_in_main(&self, key: &K) -> bool {
        self.main_index.contains_key(key)
    }

    pub fn increase_capacity(&mut self) {
        self.capacity += 1;
    }

    /// Shrinks the main list by one slot, evicting the LRU entry first if
    /// the list is full. Returns `false` (and changes nothing) at capacity 0.
    pub fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.main.len() >= self.capacity {
            self.evict_least_recent();
        }
        self.capacity -= 1;
        true
    }

    /// Deletes `key` from the main list without recording a ghost.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.main_index.remove(key)?;
        self.main.unlink(&mut self.nodes, id);
        self.nodes.remove(id).map(|node| node.into_parts().1)
    }

    /// Returns the value of a live entry without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.main_index.get(key)?;
        self.nodes.get(id).map(|node| node.value())
    }

    /// Returns the access count of a live entry.
    pub fn access_count(&self, key: &K) -> Option<u64> {
        let id = *self.main_index.get(key)?;
        self.nodes.get(id).map(|node| node.access_count())
    }

    pub fn contains_ghost(&self, key: &K) -> bool {
        self.ghost_index.contains_key(key)
    }

    /// Live keys from MRU to LRU.
    pub fn main_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.main
            .iter(&self.nodes)
            .filter_map(|id| self.nodes.get(id).map(|node| node.key()))
    }

    /// Ghost keys from newest to oldest.
    pub fn ghost_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.ghost
            .iter(&self.nodes)
            .filter_map(|id| self.nodes.get(id).map(|node| node.key()))
    }

    pub fn len(&self) -> usize {
        self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
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

    pub fn transform_threshold(&self) -> u64 {
        self.transform_threshold
    }

    /// Drops every live and ghost entry. Capacity is left untouched.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.main.clear();
        self.ghost.clear();
        self.main_index.clear();
        self.ghost_index.clear();
    }

    fn touch(&mut self, id: SlotId) -> bool {
        self.main.move_to_front(&mut self.nodes, id);
        match self.nodes.get_mut(id) {
            Some(node) => node.increment_access_count() >= self.transform_threshold,
            None => false,
        }
    }

    fn insert_new(&mut self, key: K, value: V) {
        // A direct put of a ghosted key revives it; the stale ghost goes away.
        if let Some(stale) = self.ghost_index.remove(&key) {
            self.ghost.unlink(&mut self.nodes, stale);
            self.nodes.remove(stale);
        }

        if self.main.len() >= self.capacity {
            self.evict_least_recent();
        }

        let id = self.nodes.insert(CacheNode::new(key.clone(), value));
        self.main.push_front(&mut self.nodes, id);
        self.main_index.insert(key, id);
    }

    fn evict_least_recent(&mut self) {
        let Some(id) = self.main.pop_back(&mut self.nodes) else {
            return;
        };
        let Some(key) = self.nodes.get(id).map(|node| node.key().clone()) else {
            return;
        };
        self.main_index.remove(&key);

        if self.ghost_capacity == 0 {
            self.nodes.remove(id);
            trace!(slot = id.index(), "recency eviction dropped (no ghost capacity)");
            return;
        }

        if self.ghost.len() >= self.ghost_capacity {
            self.drop_oldest_ghost();
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.reset_access_count();
        }
        self.ghost.push_front(&mut self.nodes, id);
        self.ghost_index.insert(key, id);
        trace!(
            slot = id.index(),
            ghost_len = self.ghost.len(),
            "recency eviction moved entry to ghost list"
        );
    }

    fn drop_oldest_ghost(&mut self) {
        let Some(id) = self.ghost.pop_back(&mut self.nodes) else {
            return;
        };
        if let Some(node) = self.nodes.remove(id) {
            self.ghost_index.remove(node.key());
        }
        trace!(slot = id.index(), "recency ghost overflow dropped oldest key");
    }

    /// Verifies list structure, index agreement, and size bounds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.main.check_invariants(&self.nodes)?;
        self.ghost.check_invariants(&self.nodes)?;

        if self.main.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "recency main holds {} entries, capacity is {}",
                self.main.len(),
                self.capacity
            )));
        }
        if self.ghost.len() > self.ghost_capacity {
            return Err(InvariantError::new(format!(
                "recency ghost holds {} keys, ghost capacity is {}",
                self.ghost.len(),
                self.ghost_capacity
            )));
        }
        if self.main_index.len() != self.main.len() || self.ghost_index.len() != self.ghost.len() {
            return Err(InvariantError::new("recency index size disagrees with list"));
        }
        if self.nodes.len() != self.main.len() + self.ghost.len() {
            return Err(InvariantError::new(format!(
                "recency arena holds {} nodes, lists link {}",
                self.nodes.len(),
                self.main.len() + self.ghost.len()
            )));
        }

        for id in self.main.iter(&self.nodes) {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| InvariantError::new("recency main links a free slot"))?;
            if self.main_index.get(node.key()) != Some(&id) {
                return Err(InvariantError::new("recency main node missing from index"));
            }
            if self.ghost_index.contains_key(node.key()) {
                return Err(InvariantError::new("key is both live and ghosted"));
            }
        }
        for id in self.ghost.iter(&self.nodes) {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| InvariantError::new("recency ghost links a free slot"))?;
            if self.ghost_index.get(node.key()) != Some(&id) {
                return Err(InvariantError::new("recency ghost node missing from index"));
            }
            if node.access_count() != 1 {
                return Err(InvariantError::new(format!(
                    "ghost node has access count {}",
                    node.access_count()
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("recency partition invariant violated: {err}");
        }
    }
}
