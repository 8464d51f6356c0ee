//! Recency list for resident blocks
//!
//! Arena of slots linked by prev/next indices, plus an address index into
//! the arena. Head is the MRU block, tail is the LRU block.

use std::collections::HashMap;
use ahash::RandomState;

use crate::event::Block;

/// Slot in the recency arena
#[derive(Debug)]
struct Slot {
    block: Block,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Access-ordered sequence of blocks with O(1) lookup, promote and evict
#[derive(Debug)]
pub(crate) struct RecencyList {
    index: HashMap<i64, usize, RandomState>,
    slots: Vec<Option<Slot>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
}

impl RecencyList {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
        }
    }

    /// Slot holding `address`, if resident
    pub(crate) fn locate(&self, address: i64) -> Option<usize> {
        self.index.get(&address).copied()
    }

    pub(crate) fn block(&self, idx: usize) -> Option<&Block> {
        self.slots.get(idx)?.as_ref().map(|slot| &slot.block)
    }

    /// Promote `address` to MRU if resident, returning its value
    pub(crate) fn touch(&mut self, address: i64) -> Option<i64> {
        let idx = self.locate(address)?;
        let value = self.block(idx)?.value;
        self.promote(idx);
        Some(value)
    }

    /// Insert a block at the MRU position.
    ///
    /// The caller guarantees `block.address` is not already resident.
    pub(crate) fn push_front(&mut self, block: Block) -> usize {
        debug_assert!(!self.index.contains_key(&block.address));

        let address = block.address;
        let idx = self.alloc_slot();
        self.slots[idx] = Some(Slot {
            block,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.slots[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.index.insert(address, idx);
        idx
    }

    /// Move the slot to the MRU position
    pub(crate) fn promote(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(slot) = &mut self.slots[idx] {
            slot.prev = None;
            slot.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.slots[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    /// Remove and return the LRU block
    pub(crate) fn pop_back(&mut self) -> Option<Block> {
        let tail_idx = self.tail?;
        self.unlink(tail_idx);
        let slot = self.slots[tail_idx].take()?;
        self.index.remove(&slot.block.address);
        self.free_list.push(tail_idx);
        Some(slot.block)
    }

    /// Block at the LRU position
    pub(crate) fn back(&self) -> Option<&Block> {
        self.block(self.tail?)
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate MRU to LRU
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx] {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_slot) = &mut self.slots[prev_idx] {
                    prev_slot.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_slot) = &mut self.slots[next_idx] {
                    next_slot.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(None);
            idx
        }
    }
}

/// Borrowing iterator over resident blocks, MRU first
#[derive(Debug)]
pub struct Iter<'a> {
    list: &'a RecencyList,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let slot = self.list.slots[idx].as_ref()?;
        self.cursor = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&slot.block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(list: &RecencyList) -> Vec<i64> {
        list.iter().map(|b| b.address).collect()
    }

    #[test]
    fn test_push_front_orders_mru_first() {
        let mut list = RecencyList::with_capacity(3);

        list.push_front(Block::new(1, 10));
        list.push_front(Block::new(2, 20));
        list.push_front(Block::new(3, 30));

        assert_eq!(addresses(&list), vec![3, 2, 1]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.back().map(|b| b.address), Some(1));
    }

    #[test]
    fn test_promote_middle_and_tail() {
        let mut list = RecencyList::with_capacity(3);

        let a = list.push_front(Block::new(1, 10));
        let b = list.push_front(Block::new(2, 20));
        list.push_front(Block::new(3, 30));

        list.promote(b);
        assert_eq!(addresses(&list), vec![2, 3, 1]);

        list.promote(a);
        assert_eq!(addresses(&list), vec![1, 2, 3]);
        assert_eq!(list.back().map(|b| b.address), Some(3));
    }

    #[test]
    fn test_touch() {
        let mut list = RecencyList::with_capacity(3);

        list.push_front(Block::new(1, 10));
        list.push_front(Block::new(2, 20));

        assert_eq!(list.touch(1), Some(10));
        assert_eq!(addresses(&list), vec![1, 2]);
        assert_eq!(list.touch(3), None);
        assert_eq!(addresses(&list), vec![1, 2]);
    }

    #[test]
    fn test_promote_head_is_noop() {
        let mut list = RecencyList::with_capacity(2);

        list.push_front(Block::new(1, 10));
        let head = list.push_front(Block::new(2, 20));
        list.promote(head);

        assert_eq!(addresses(&list), vec![2, 1]);
    }

    #[test]
    fn test_pop_back_removes_from_index() {
        let mut list = RecencyList::with_capacity(2);

        list.push_front(Block::new(1, 10));
        list.push_front(Block::new(2, 20));

        assert_eq!(list.pop_back(), Some(Block::new(1, 10)));
        assert_eq!(list.locate(1), None);
        assert!(list.locate(2).is_some());
        assert_eq!(addresses(&list), vec![2]);

        assert_eq!(list.pop_back(), Some(Block::new(2, 20)));
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = RecencyList::with_capacity(1);

        let first = list.push_front(Block::new(1, 10));
        list.pop_back();
        let second = list.push_front(Block::new(2, 20));

        assert_eq!(first, second);
        assert_eq!(list.slots.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::with_capacity(3);

        list.push_front(Block::new(1, 10));
        list.push_front(Block::new(2, 20));
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
        assert!(list.back().is_none());
    }

    #[test]
    fn test_iter_len() {
        let mut list = RecencyList::with_capacity(3);

        list.push_front(Block::new(1, 10));
        list.push_front(Block::new(2, 20));

        assert_eq!(list.iter().len(), 2);
    }
}
