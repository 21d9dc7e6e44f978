//! Recency ordering for the LRU cache
//!
//! Doubly-linked list whose nodes live in a slab of slots and link to each
//! other by slot index. Head is the most recently used entry, tail the least.
//!
//! ```text
//!   slots
//!   ┌──────┬─────┬──────────────────────────────────────┐
//!   │ slot │ gen │ node                                 │
//!   ├──────┼─────┼──────────────────────────────────────┤
//!   │ 0    │ 0   │ { value: A, prev: None, next: 2 }    │
//!   │ 1    │ 3   │ <free>                               │
//!   │ 2    │ 1   │ { value: B, prev: 0, next: None }    │
//!   └──────┴─────┴──────────────────────────────────────┘
//!
//!   head ─► [0] ◄──► [2] ◄── tail       free_list: [1]
//! ```
//!
//! A [`Locator`] names a slot together with the generation it was issued
//! under. Removing an entry bumps its slot's generation, so a locator kept
//! past removal resolves to nothing instead of to whatever reuses the slot.

/// Stable handle to one entry's position in a [`RecencyList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locator {
    slot: usize,
    generation: u64,
}

impl Locator {
    /// Sentinel for "no such position"
    pub const NONE: Locator = Locator {
        slot: usize::MAX,
        generation: 0,
    };

    /// Returns `true` for the [`Locator::NONE`] sentinel
    pub fn is_none(&self) -> bool {
        self.slot == usize::MAX
    }

    /// Returns `true` unless this is the sentinel
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl Default for Locator {
    fn default() -> Self {
        Locator::NONE
    }
}

struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// Entries in strict recency order with O(1) structural edits
pub struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of entries in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `loc` still resolves to a live entry
    pub fn contains(&self, loc: Locator) -> bool {
        self.resolve(loc).is_some()
    }

    /// Insert at head and return a handle to the new position
    pub fn push_front(&mut self, value: T) -> Locator {
        let node = Node {
            value,
            prev: None,
            next: self.head,
        };

        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx].node = Some(node);
                idx
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(head_idx) => self.node_mut(head_idx).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;

        Locator {
            slot: idx,
            generation: self.slots[idx].generation,
        }
    }

    /// Remove the entry at `loc`, invalidating the locator
    pub fn remove(&mut self, loc: Locator) -> Option<T> {
        let idx = self.resolve(loc)?;
        Some(self.remove_slot(idx))
    }

    /// Relocate the entry at `loc` to head without moving its payload
    ///
    /// Returns the locator of the entry (now the head), or `None` if `loc`
    /// is stale or the sentinel.
    pub fn move_to_front(&mut self, loc: Locator) -> Option<Locator> {
        let idx = self.resolve(loc)?;
        if self.head != Some(idx) {
            self.unlink(idx);
            self.link_front(idx);
        }
        Some(loc)
    }

    /// Most recently used entry
    pub fn front(&self) -> Option<&T> {
        self.head.map(|idx| &self.node(idx).value)
    }

    /// Least recently used entry
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|idx| &self.node(idx).value)
    }

    /// Remove and return the least recently used entry
    pub fn pop_back(&mut self) -> Option<T> {
        let idx = self.tail?;
        Some(self.remove_slot(idx))
    }

    /// Entry at `loc`, if the locator is still live
    pub fn get(&self, loc: Locator) -> Option<&T> {
        self.resolve(loc).map(|idx| &self.node(idx).value)
    }

    /// Mutable entry at `loc`, if the locator is still live
    pub fn get_mut(&mut self, loc: Locator) -> Option<&mut T> {
        let idx = self.resolve(loc)?;
        Some(&mut self.node_mut(idx).value)
    }

    /// Iterate from most to least recently used
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Drop every entry
    ///
    /// Outstanding locators stay invalid even after their slots are reused.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(idx);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    #[cfg(any(test, debug_assertions))]
    /// Panics if links, head/tail or the length counter disagree.
    pub fn debug_validate_invariants(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut current = self.head;

        while let Some(idx) = current {
            let node = self.slots[idx]
                .node
                .as_ref()
                .expect("linked slot must be occupied");
            assert_eq!(node.prev, prev, "prev link mismatch at slot {}", idx);
            count += 1;
            assert!(count <= self.len, "cycle detected in recency list");
            prev = Some(idx);
            current = node.next;
        }

        assert_eq!(self.tail, prev, "tail does not match last node");
        assert_eq!(count, self.len, "length counter mismatch");
        assert_eq!(
            self.len + self.free_list.len(),
            self.slots.len(),
            "free list does not cover all empty slots"
        );
    }

    fn resolve(&self, loc: Locator) -> Option<usize> {
        let slot = self.slots.get(loc.slot)?;
        if slot.generation == loc.generation && slot.node.is_some() {
            Some(loc.slot)
        } else {
            None
        }
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match &self.slots[idx].node {
            Some(node) => node,
            None => unreachable!("slot {} is linked but empty", idx),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.slots[idx].node {
            Some(node) => node,
            None => unreachable!("slot {} is linked but empty", idx),
        }
    }

    fn remove_slot(&mut self, idx: usize) -> T {
        self.unlink(idx);
        let slot = &mut self.slots[idx];
        let node = match slot.node.take() {
            Some(node) => node,
            None => unreachable!("slot {} is linked but empty", idx),
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(idx);
        self.len -= 1;
        node.value
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.node_mut(prev_idx).next = next,
            None => self.head = next,
        }

        match next {
            Some(next_idx) => self.node_mut(next_idx).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => self.node_mut(head_idx).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a [`RecencyList`], most recently used first
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = self.list.node(idx);
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_front_orders_mru_first() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(order(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.len(), 3);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        // Tail to head
        assert_eq!(list.move_to_front(a), Some(a));
        assert_eq!(order(&list), vec!["a", "c", "b"]);

        // Middle to head
        assert_eq!(list.move_to_front(c), Some(c));
        assert_eq!(order(&list), vec!["c", "a", "b"]);

        // Already head
        assert_eq!(list.move_to_front(c), Some(c));
        assert_eq!(order(&list), vec!["c", "a", "b"]);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(order(&list), vec![3, 1]);
        assert_eq!(list.remove(c), Some(3));
        assert_eq!(list.remove(a), Some(1));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_pop_back() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_stale_locator_after_slot_reuse() {
        let mut list = RecencyList::new();
        let old = list.push_front(10);
        assert_eq!(list.remove(old), Some(10));

        // Reuses the freed slot
        let new = list.push_front(20);
        assert_ne!(old, new);
        assert!(!list.contains(old));
        assert_eq!(list.get(old), None);
        assert_eq!(list.remove(old), None);
        assert_eq!(list.move_to_front(old), None);
        assert_eq!(list.get(new), Some(&20));
    }

    #[test]
    fn test_sentinel_never_resolves() {
        let mut list = RecencyList::new();
        list.push_front(1);

        assert!(Locator::NONE.is_none());
        assert!(Locator::default().is_none());
        assert_eq!(list.get(Locator::NONE), None);
        assert_eq!(list.move_to_front(Locator::NONE), None);
        assert_eq!(list.remove(Locator::NONE), None);
    }

    #[test]
    fn test_get_mut() {
        let mut list = RecencyList::new();
        let loc = list.push_front(String::from("a"));
        list.get_mut(loc).unwrap().push('b');
        assert_eq!(list.get(loc).map(String::as_str), Some("ab"));
    }

    #[test]
    fn test_clear_invalidates_locators() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front(1);
        list.push_front(2);
        list.clear();

        assert!(list.is_empty());
        assert!(!list.contains(a));
        list.debug_validate_invariants();

        let b = list.push_front(3);
        assert!(!list.contains(a));
        assert_eq!(list.get(b), Some(&3));
        assert_eq!(order(&list), vec![3]);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_iter_exact_size() {
        let mut list = RecencyList::new();
        for i in 0..5 {
            list.push_front(i);
        }
        assert_eq!(list.iter().len(), 5);
    }
}
