//! Arena node shared by both ARC partitions.

use crate::ds::intrusive_list::Linked;
use crate::ds::slot_arena::SlotId;

/// A cached key/value pair plus its access counter.
///
/// A node is linked into exactly one list at a time: recency main, recency
/// ghost, one frequency bucket, or frequency ghost. Link fields and the
/// counter reset are only reachable from inside `policy::arc`.
#[derive(Debug)]
pub struct CacheNode<K, V> {
    pub(super) prev: Option<SlotId>,
    pub(super) next: Option<SlotId>,
    access_count: u64,
    key: K,
    value: V,
}

impl<K, V> CacheNode<K, V> {
    /// Creates an unlinked node with an access count of 1.
    pub fn new(key: K, value: V) -> Self {
        Self {
            prev: None,
            next: None,
            access_count: 1,
            key,
            value,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Replaces the value and returns the previous one.
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Bumps the access counter and returns the new count.
    pub fn increment_access_count(&mut self) -> u64 {
        self.access_count = self.access_count.saturating_add(1);
        self.access_count
    }

    /// Called when the node moves into a ghost list.
    pub(super) fn reset_access_count(&mut self) {
        self.access_count = 1;
    }

    pub(super) fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> Linked for CacheNode<K, V> {
    #[inline]
    fn prev(&self) -> Option<SlotId> {
        self.prev
    }

    #[inline]
    fn next(&self) -> Option<SlotId> {
        self.next
    }

    #[inline]
    fn set_prev(&mut self, prev: Option<SlotId>) {
        self.prev = prev;
    }

    #[inline]
    fn set_next(&mut self, next: Option<SlotId>) {
        self.next = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_starts_unlinked_with_count_one() {
        let node = CacheNode::new("k", 1);
        assert_eq!(node.key(), &"k");
        assert_eq!(node.value(), &1);
        assert_eq!(node.access_count(), 1);
        assert!(node.prev.is_none());
        assert!(node.next.is_none());
    }

    #[test]
    fn node_set_value_and_counter() {
        let mut node = CacheNode::new("k", 1);
        assert_eq!(node.set_value(2), 1);
        assert_eq!(node.increment_access_count(), 2);
        assert_eq!(node.increment_access_count(), 3);
        node.reset_access_count();
        assert_eq!(node.access_count(), 1);
        assert_eq!(node.into_parts(), ("k", 2));
    }
}
