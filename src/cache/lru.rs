//! LRU Recency Module
//!
//! Arena-backed doubly linked list ordering cache entries by recency.
//!
//! Entries live in a `Vec` of slots addressed by stable indices; freed
//! slots are recycled through a free list. The hash index in the store maps
//! keys to these indices, so no entry is ever referenced by pointer.

use crate::cache::CacheEntry;

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug)]
pub struct RecencyList<V> {
    /// Entry arena, `None` marks a free slot
    slots: Vec<Option<CacheEntry<V>>>,
    /// Recycled slot indices
    free: Vec<usize>,
    /// Most recently used slot
    head: Option<usize>,
    /// Least recently used slot
    tail: Option<usize>,
    /// Number of linked entries
    len: usize,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Stores an entry at the most recently used end and returns its slot.
    pub fn push_front(&mut self, entry: CacheEntry<V>) -> usize {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the entry in `idx` as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || self.get(idx).is_none() {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Unlinks and returns the entry in `idx`, freeing its slot.
    pub fn remove(&mut self, idx: usize) -> Option<CacheEntry<V>> {
        self.get(idx)?;
        self.unlink(idx);
        let entry = self.slots.get_mut(idx).and_then(Option::take)?;
        self.free.push(idx);
        self.len -= 1;
        Some(entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<CacheEntry<V>> {
        let idx = self.tail?;
        self.remove(idx)
    }

    /// Returns the entry in `idx`, if the slot is occupied.
    pub fn get(&self, idx: usize) -> Option<&CacheEntry<V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Mutable access to the entry in `idx`, without changing recency.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut CacheEntry<V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    // == Iteration ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(entry) = self.get_mut(idx) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(head) = self.get_mut(h) {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.get(idx) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };
        match prev {
            Some(p) => {
                if let Some(entry) = self.get_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(entry) = self.get_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
        if let Some(entry) = self.get_mut(idx) {
            entry.prev = None;
            entry.next = None;
        }
    }
}

// == Iterator ==
/// Most-recent-first iterator over a [`RecencyList`].
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a CacheEntry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        Some(entry)
    }
}
