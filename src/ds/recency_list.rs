//! Sentinel-bounded doubly linked list over a [`SlotArena`].
//!
//! Maintains most-recent-to-least-recent order for the cache core. Two
//! permanent sentinel slots bound the list:
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!
//!   [head] ◄──► [id_a] ◄──► [id_b] ◄──► [id_c] ◄──► [tail]
//!   sentinel     MRU                     LRU        sentinel
//! ```
//!
//! Because every live node always has a real predecessor and successor, the
//! relink primitives (`unlink`, `push_front`, `move_to_front`) touch exactly
//! four links with no end-of-list branches. The sentinels are allocated once
//! at construction, hold no value, and are never unlinked, freed, or handed
//! out to callers.
//!
//! ## Operations
//! - `push_front(value)`: new node at the MRU position, O(1)
//! - `move_to_front(id)`: unlink + relink at MRU, O(1)
//! - `least_recent()` / `pop_back()`: eviction candidate access, O(1)
//! - `remove(id)`: unlink + free the slot, O(1)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    // None only in the two sentinel slots.
    value: Option<T>,
    prev: SlotId,
    next: SlotId,
}

/// Doubly linked MRU→LRU list with sentinel-bounded ends.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: SlotId,
    tail: SlotId,
}

impl<T> RecencyList<T> {
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with slots reserved for `capacity` live nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = SlotArena::with_capacity(capacity + 2);
        let head = arena.insert(Node {
            value: None,
            prev: SlotId(0),
            next: SlotId(0),
        });
        let tail = arena.insert(Node {
            value: None,
            prev: head,
            next: head,
        });
        // head.prev and tail.next point back at the sentinel itself; those
        // links are never followed.
        if let Some(node) = arena.get_mut(head) {
            node.prev = head;
            node.next = tail;
        }
        if let Some(node) = arena.get_mut(tail) {
            node.prev = head;
            node.next = tail;
        }
        Self { arena, head, tail }
    }

    /// Number of live nodes (sentinels excluded).
    pub fn len(&self) -> usize {
        self.arena.len() - 2
    }

    /// Returns `true` if the list holds only the sentinels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` is a live node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        id != self.head && id != self.tail && self.arena.contains(id)
    }

    /// Handle of the most recently used node.
    pub fn most_recent(&self) -> Option<SlotId> {
        let first = self.node(self.head).next;
        (first != self.tail).then_some(first)
    }

    /// Handle of the least recently used node, i.e. the eviction candidate.
    pub fn least_recent(&self) -> Option<SlotId> {
        let last = self.node(self.tail).prev;
        (last != self.head).then_some(last)
    }

    /// Shared access to the value at `id`.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    /// Mutable access to the value at `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Inserts a new node at the MRU position and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let head = self.head;
        let id = self.arena.insert(Node {
            value: Some(value),
            prev: head,
            next: head,
        });
        self.attach_front(id);
        id
    }

    /// Relocates an existing node to the MRU position.
    ///
    /// Returns `false` if `id` is not a live node. The relocation is the
    /// uniform unlink-then-relink pair, so a node that is already at the
    /// front ends up where it started.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.unlink(id);
        self.attach_front(id);
        true
    }

    /// Unlinks `id` and frees its slot, returning the value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);
        match self.arena.remove(id)?.value {
            Some(value) => Some(value),
            None => unreachable!("sentinels are never removed"),
        }
    }

    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.least_recent()?;
        self.remove(id)
    }

    /// Removes every live node, keeping the sentinels linked to each other.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    /// Iterates values from most recent to least recent.
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.node(self.head).next,
        }
    }

    /// Iterates node handles from most recent to least recent.
    pub fn iter_ids(&self) -> RecencyIdIter<'_, T> {
        RecencyIdIter {
            list: self,
            current: self.node(self.head).next,
        }
    }

    /// Verifies link symmetry, sentinel integrity, and the node count.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0usize;
        let mut prev = self.head;
        let mut current = self.node(self.head).next;

        while current != self.tail {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| InvariantError::new("list links into a vacant slot"))?;
            if node.value.is_none() {
                return Err(InvariantError::new("sentinel linked as an interior node"));
            }
            if node.prev != prev {
                return Err(InvariantError::new("back-link does not match forward walk"));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = current;
            current = node.next;
        }

        if self.node(self.tail).prev != prev {
            return Err(InvariantError::new("tail back-link does not match forward walk"));
        }
        if count != self.len() {
            return Err(InvariantError::new("walk count differs from arena occupancy"));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("recency list invariant violated: {err}");
        }
    }

    fn node(&self, id: SlotId) -> &Node<T> {
        self.arena.get(id).expect("sentinel or live node missing from arena")
    }

    /// Splices `id` out of the chain. The slot itself stays allocated.
    fn unlink(&mut self, id: SlotId) {
        debug_assert!(id != self.head && id != self.tail);
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };
        if let Some(prev_node) = self.arena.get_mut(prev) {
            prev_node.next = next;
        }
        if let Some(next_node) = self.arena.get_mut(next) {
            next_node.prev = prev;
        }
    }

    /// Links an unlinked `id` immediately after the head sentinel.
    fn attach_front(&mut self, id: SlotId) {
        let head = self.head;
        let first = self.node(head).next;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = head;
            node.next = first;
        }
        if let Some(head_node) = self.arena.get_mut(head) {
            head_node.next = id;
        }
        if let Some(first_node) = self.arena.get_mut(first) {
            first_node.prev = id;
        }
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values, front (MRU) to back (LRU).
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: SlotId,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.list.tail {
            return None;
        }
        let node = self.list.arena.get(self.current)?;
        self.current = node.next;
        node.value.as_ref()
    }
}

/// Iterator over node handles, front (MRU) to back (LRU).
pub struct RecencyIdIter<'a, T> {
    list: &'a RecencyList<T>,
    current: SlotId,
}

impl<'a, T> Iterator for RecencyIdIter<'a, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.list.tail {
            return None;
        }
        let id = self.current;
        self.current = self.list.arena.get(id)?.next;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_candidates() {
        let list: RecencyList<i32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.most_recent(), None);
        assert_eq!(list.least_recent(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn push_front_orders_mru_first() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.len(), 3);
        assert_eq!(list.most_recent(), Some(c));
        assert_eq!(list.least_recent(), Some(a));
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec!["c", "b", "a"]);
        assert!(list.contains(b));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_reorders() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert!(list.move_to_front(a));
        let ids: Vec<_> = list.iter_ids().collect();
        assert_eq!(ids, vec![a, c, b]);
        assert_eq!(list.least_recent(), Some(b));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_of_front_is_a_no_op() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);

        assert!(list.move_to_front(b));
        let ids: Vec<_> = list.iter_ids().collect();
        assert_eq!(ids, vec![b, a]);
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec!["c", "a"]);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.most_recent(), Some(a));
        assert_eq!(list.least_recent(), Some(a));

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.remove(a), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_back_takes_least_recent() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn freed_slots_are_reused_by_new_nodes() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.remove(a);
        let b = list.push_front(2);
        assert_eq!(a, b);
        assert_eq!(list.get(b), Some(&2));
        list.debug_validate_invariants();
    }

    #[test]
    fn get_mut_updates_value_in_place() {
        let mut list = RecencyList::new();
        let id = list.push_front(10);
        *list.get_mut(id).unwrap() = 20;
        assert_eq!(list.get(id), Some(&20));
    }

    #[test]
    fn clear_keeps_sentinels_usable() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.least_recent(), None);
        let id = list.push_front(3);
        assert_eq!(list.most_recent(), Some(id));
        list.debug_validate_invariants();
    }

    #[test]
    fn check_invariants_passes_after_churn() {
        let mut list = RecencyList::new();
        let mut ids = Vec::new();
        for i in 0..16 {
            ids.push(list.push_front(i));
        }
        for id in ids.iter().step_by(3) {
            list.move_to_front(*id);
        }
        for id in ids.iter().step_by(4) {
            list.remove(*id);
        }
        assert!(list.check_invariants().is_ok());
    }
}
