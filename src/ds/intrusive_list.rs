//! Intrusive doubly linked list over a `SlotArena`.
//!
//! The list itself is only a header (`head`, `tail`, `len`). The `prev`/`next`
//! links live inside the arena nodes via the [`Linked`] trait, which lets
//! several lists share one arena and lets a node be relinked from one list to
//! another without being reallocated.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node>)                      lists (headers only)
//!   ┌────────┬─────────────────────────────┐
//!   │ id_0   │ { A, prev: None, next: 2 }  │     main:  head=0  tail=2  len=2
//!   │ id_1   │ { B, prev: None, next: None}│     ghost: head=1  tail=1  len=1
//!   │ id_2   │ { C, prev: 0,    next: None}│
//!   └────────┴─────────────────────────────┘
//!
//!   main:  [id_0] ◄──► [id_2]
//!   ghost: [id_1]
//! ```
//!
//! ## Operations
//! - `push_front` / `push_back`: O(1)
//! - `pop_front` / `pop_back`: O(1), returns the detached id (slot stays live)
//! - `unlink` / `move_to_front`: O(1)
//!
//! Membership is not recorded on the node, so callers must only pass ids that
//! belong to the list they call. Freeing the slot is the caller's job.
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Access to the link fields embedded in an arena node.
pub trait Linked {
    fn prev(&self) -> Option<SlotId>;
    fn next(&self) -> Option<SlotId>;
    fn set_prev(&mut self, prev: Option<SlotId>);
    fn set_next(&mut self, next: Option<SlotId>);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// List header linking `Linked` nodes stored in an external `SlotArena`.
pub struct IntrusiveList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl IntrusiveList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the id at the front of the list.
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the id at the back of the list.
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    /// Links `id` at the front.
    pub fn push_front<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        let old_head = self.head;
        match arena.get_mut(id) {
            Some(node) => {
                node.set_prev(None);
                node.set_next(old_head);
            },
            None => return,
        }
        match old_head.and_then(|h| arena.get_mut(h)) {
            Some(head_node) => head_node.set_prev(Some(id)),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    /// Links `id` at the back.
    pub fn push_back<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        let old_tail = self.tail;
        match arena.get_mut(id) {
            Some(node) => {
                node.set_next(None);
                node.set_prev(old_tail);
            },
            None => return,
        }
        match old_tail.and_then(|t| arena.get_mut(t)) {
            Some(tail_node) => tail_node.set_next(Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Detaches `id` from the list; returns `false` if the slot is not live.
    pub fn unlink<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        let (prev, next) = match arena.get(id) {
            Some(node) => (node.prev(), node.next()),
            None => return false,
        };

        match prev.and_then(|p| arena.get_mut(p)) {
            Some(prev_node) => prev_node.set_next(next),
            None => self.head = next,
        }
        match next.and_then(|n| arena.get_mut(n)) {
            Some(next_node) => next_node.set_prev(prev),
            None => self.tail = prev,
        }
        if let Some(node) = arena.get_mut(id) {
            node.set_prev(None);
            node.set_next(None);
        }
        self.len -= 1;
        true
    }

    /// Detaches and returns the front id.
    pub fn pop_front<T: Linked>(&mut self, arena: &mut SlotArena<T>) -> Option<SlotId> {
        let id = self.head?;
        self.unlink(arena, id).then_some(id)
    }

    /// Detaches and returns the back id.
    pub fn pop_back<T: Linked>(&mut self, arena: &mut SlotArena<T>) -> Option<SlotId> {
        let id = self.tail?;
        self.unlink(arena, id).then_some(id)
    }

    /// Moves a linked node to the front.
    pub fn move_to_front<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        if self.unlink(arena, id) {
            self.push_front(arena, id);
        }
    }

    /// Forgets every link. Nodes stay in the arena.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates ids from front to back.
    pub fn iter<'a, T: Linked>(&self, arena: &'a SlotArena<T>) -> IntrusiveListIter<'a, T> {
        IntrusiveListIter {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Walks the list and verifies link symmetry, length, and head/tail.
    pub fn check_invariants<T: Linked>(&self, arena: &SlotArena<T>) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || self.len != 0 {
                return Err(InvariantError::new(format!(
                    "empty list has head={:?} tail={:?} len={}",
                    self.head, self.tail, self.len
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("linked slot {} is free", id.index())))?;
            if node.prev() != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    id.index(),
                    node.prev(),
                    prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new(format!(
                    "walked past recorded length {} (cycle?)",
                    self.len
                )));
            }
            prev = Some(id);
            current = node.next();
        }

        if prev != self.tail {
            return Err(InvariantError::new(format!(
                "tail is {:?} but walk ended at {:?}",
                self.tail, prev
            )));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "walked {} nodes but len is {}",
                count, self.len
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants<T: Linked>(&self, arena: &SlotArena<T>) {
        if let Err(err) = self.check_invariants(arena) {
            panic!("intrusive list invariant violated: {err}");
        }
    }
}

/// Iterator over ids from front to back.
pub struct IntrusiveListIter<'a, T> {
    arena: &'a SlotArena<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T: Linked> Iterator for IntrusiveListIter<'a, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.current?;
        let node = self.arena.get(id)?;
        self.current = node.next();
        self.remaining -= 1;
        Some(id)
    }
}
