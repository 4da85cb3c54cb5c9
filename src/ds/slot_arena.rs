//! Node arena addressed by stable integer handles.
//!
//! Every slot is either occupied or vacant. Vacant slots form a singly linked
//! free chain threaded through the slots themselves, so freeing and reusing a
//! slot is O(1) and needs no side vector.
//!
//! ```text
//!   slots:  [ Occ(A) | Vac(→3) | Occ(C) | Vac(end) ]
//!   free_head = 1
//!
//!   insert(E) → takes slot 1, free_head = 3
//!   remove(0) → slot 0 becomes Vac(→3), free_head = 0
//! ```
//!
//! A [`SlotId`] names one slot. It stays valid until that slot is removed;
//! afterwards the index may be handed out again.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Arena owning the nodes of one partition.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocates room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            occupied: 0,
        }
    }

    /// Stores `value` and returns its handle; vacant slots are reused first.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        if let Some(idx) = self.free_head
            && let Some(slot) = self.slots.get_mut(idx)
        {
            if let Slot::Vacant { next_free } = *slot {
                self.free_head = next_free;
            }
            *slot = Slot::Occupied(value);
            return SlotId(idx);
        }
        self.slots.push(Slot::Occupied(value));
        SlotId(self.slots.len() - 1)
    }

    /// Vacates the slot and hands back its value; `None` if already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacated = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(slot, vacated) {
            Slot::Occupied(value) => {
                self.free_head = Some(id.0);
                self.occupied -= 1;
                Some(value)
            },
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Occupied plus vacant slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops every node and forgets all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.occupied = 0;
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| match slot {
            Slot::Occupied(value) => Some((SlotId(idx), value)),
            Slot::Vacant { .. } => None,
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
