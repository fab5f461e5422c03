//! Doubly-linked store over an index arena.
//!
//! # Implementation details
//! - **Node table**: every node lives in one growable `Vec`; `prev`/`next` links are
//!   slot numbers of type `I` rather than pointers, with `I::NONE` as the null link.
//! - **Free-list**: vacated slots are threaded through their `next` link starting at
//!   `free_head` and are reused before the table grows, so pushes and pops stay
//!   *O*(1) and never move existing nodes.
//! - **Teardown**: `clear` and `Drop` walk the chain from `head` and release each
//!   element individually before the table itself is dropped.

use core::fmt;
use core::iter;
use core::mem;

use tracing::{debug, trace};

use super::DequeStore;
use crate::config::DequeConfig;
use crate::error::{DequeError, Operation, Result};
use crate::utils::index_type::IndexType;

struct Node<T, I> {
    /// `None` while the slot is on the free-list.
    element: Option<T>,
    prev: I,
    next: I,
}

/// A double-ended queue backed by a doubly linked chain of arena nodes.
///
/// # Invariants
/// * `head` and `tail` are `NONE` iff `len == 0`.
/// * Following `next` from `head` visits exactly `len` occupied slots and ends at
///   `tail`; `nodes[n.next].prev == n` for every non-tail node, and symmetrically
///   for `prev`.
/// * `nodes[head].prev` and `nodes[tail].next` are `NONE`.
/// * Every slot not on the chain is vacant and reachable from `free_head`.
pub struct LinkedStore<T, I: IndexType = u32> {
    nodes: Vec<Node<T, I>>,
    free_head: I,
    head: I,
    tail: I,
    len: usize,
}

impl<T, I: IndexType> LinkedStore<T, I> {
    /// Creates an empty store. No node slots are allocated until the first push.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_head: I::NONE,
            head: I::NONE,
            tail: I::NONE,
            len: 0,
        }
    }

    /// Creates an empty store with room for `capacity` nodes before the table grows.
    ///
    /// The reservation is capped at the number of slots `I` can address.
    ///
    /// # Panics
    /// If the node table cannot be allocated. See [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(store) => store,
            Err(err) => super::exhausted(err),
        }
    }

    /// Fallible counterpart of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let requested = capacity.min(I::MAX_SLOTS);
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(requested)
            .map_err(|_| DequeError::ResourceExhausted { requested })?;
        Ok(Self {
            nodes,
            free_head: I::NONE,
            head: I::NONE,
            tail: I::NONE,
            len: 0,
        })
    }

    /// Creates an empty store sized from `config`.
    pub fn from_config(config: &DequeConfig) -> Self {
        Self::with_capacity(config.effective_capacity())
    }

    /// Returns the number of elements currently in the store.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the store contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of node slots in the table, live and free.
    #[inline]
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    fn node(&self, idx: I) -> &Node<T, I> {
        &self.nodes[idx.as_usize()]
    }

    #[inline(always)]
    fn node_mut(&mut self, idx: I) -> &mut Node<T, I> {
        &mut self.nodes[idx.as_usize()]
    }

    /// Element of an occupied slot.
    fn occupied(&self, idx: I) -> &T {
        match &self.node(idx).element {
            Some(element) => element,
            None => unreachable!("linked store slot {idx:?} is vacant"),
        }
    }

    fn occupied_mut(&mut self, idx: I) -> &mut T {
        match &mut self.node_mut(idx).element {
            Some(element) => element,
            None => unreachable!("linked store slot {idx:?} is vacant"),
        }
    }

    /// Takes a slot for `item`, preferring the free-list over growing the table.
    /// The returned node is unlinked.
    fn allocate(&mut self, item: T) -> Result<I> {
        if !self.free_head.is_none() {
            let idx = self.free_head;
            let node = self.node_mut(idx);
            let next_free = node.next;
            node.element = Some(item);
            node.prev = I::NONE;
            node.next = I::NONE;
            self.free_head = next_free;
            return Ok(idx);
        }

        let slot = self.nodes.len();
        let idx = I::from_usize(slot).ok_or(DequeError::ResourceExhausted {
            requested: slot + 1,
        })?;
        if self.nodes.len() == self.nodes.capacity() {
            let old_capacity = self.nodes.capacity();
            self.nodes
                .try_reserve(1)
                .map_err(|_| DequeError::ResourceExhausted {
                    requested: slot + 1,
                })?;
            debug!(
                old_capacity,
                new_capacity = self.nodes.capacity(),
                len = self.len,
                "grew linked store node table"
            );
        }
        self.nodes.push(Node {
            element: Some(item),
            prev: I::NONE,
            next: I::NONE,
        });
        Ok(idx)
    }

    /// Vacates an unlinked slot, returning its element and threading it onto the
    /// free-list.
    fn release(&mut self, idx: I) -> T {
        let free_head = self.free_head;
        let node = self.node_mut(idx);
        let element = node.element.take();
        node.prev = I::NONE;
        node.next = free_head;
        self.free_head = idx;
        match element {
            Some(element) => element,
            None => unreachable!("linked store slot {idx:?} released twice"),
        }
    }

    /// Prepends `item`.
    pub fn try_push_front(&mut self, item: T) -> Result<()> {
        let idx = self.allocate(item)?;
        if self.head.is_none() {
            self.tail = idx;
        } else {
            let old_head = self.head;
            self.node_mut(idx).next = old_head;
            self.node_mut(old_head).prev = idx;
        }
        self.head = idx;
        self.len += 1;
        Ok(())
    }

    /// Appends `item`.
    pub fn try_push_back(&mut self, item: T) -> Result<()> {
        let idx = self.allocate(item)?;
        if self.tail.is_none() {
            self.head = idx;
        } else {
            let old_tail = self.tail;
            self.node_mut(idx).prev = old_tail;
            self.node_mut(old_tail).next = idx;
        }
        self.tail = idx;
        self.len += 1;
        Ok(())
    }

    /// Prepends `item`.
    ///
    /// # Panics
    /// If the node table is full for index type `I` or cannot grow.
    #[inline]
    pub fn push_front(&mut self, item: T) {
        if let Err(err) = self.try_push_front(item) {
            super::exhausted(err);
        }
    }

    /// Appends `item`.
    ///
    /// # Panics
    /// If the node table is full for index type `I` or cannot grow.
    #[inline]
    pub fn push_back(&mut self, item: T) {
        if let Err(err) = self.try_push_back(item) {
            super::exhausted(err);
        }
    }

    /// Removes and returns the front element.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.head.is_none() {
            return Err(DequeError::Empty(Operation::PopFront));
        }
        let idx = self.head;
        let next = self.node(idx).next;
        if next.is_none() {
            self.head = I::NONE;
            self.tail = I::NONE;
        } else {
            self.node_mut(next).prev = I::NONE;
            self.head = next;
        }
        self.len -= 1;
        Ok(self.release(idx))
    }

    /// Removes and returns the back element.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.tail.is_none() {
            return Err(DequeError::Empty(Operation::PopBack));
        }
        let idx = self.tail;
        let prev = self.node(idx).prev;
        if prev.is_none() {
            self.head = I::NONE;
            self.tail = I::NONE;
        } else {
            self.node_mut(prev).next = I::NONE;
            self.tail = prev;
        }
        self.len -= 1;
        Ok(self.release(idx))
    }

    /// Returns a shared reference to the front element.
    #[inline]
    pub fn front(&self) -> Result<&T> {
        if self.head.is_none() {
            return Err(DequeError::Empty(Operation::Front));
        }
        Ok(self.occupied(self.head))
    }

    /// Returns a shared reference to the back element.
    #[inline]
    pub fn back(&self) -> Result<&T> {
        if self.tail.is_none() {
            return Err(DequeError::Empty(Operation::Back));
        }
        Ok(self.occupied(self.tail))
    }

    /// Returns an exclusive reference to the front element.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.head.is_none() {
            return Err(DequeError::Empty(Operation::Front));
        }
        let head = self.head;
        Ok(self.occupied_mut(head))
    }

    /// Returns an exclusive reference to the back element.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.tail.is_none() {
            return Err(DequeError::Empty(Operation::Back));
        }
        let tail = self.tail;
        Ok(self.occupied_mut(tail))
    }

    /// Releases every node, front to back, then drops the node table.
    pub fn clear(&mut self) {
        let mut cursor = mem::replace(&mut self.head, I::NONE);
        let released = mem::replace(&mut self.len, 0);
        self.tail = I::NONE;
        self.free_head = I::NONE;
        while !cursor.is_none() {
            let node = self.node_mut(cursor);
            cursor = node.next;
            drop(node.element.take());
        }
        self.nodes.clear();
        if released > 0 {
            trace!(released, "cleared linked store");
        }
    }

    /// Moves the contents out, leaving `self` empty with no allocated nodes.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Front-to-back walk over the chain.
    pub(crate) fn walk(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.head;
        iter::from_fn(move || {
            if cursor.is_none() {
                return None;
            }
            let idx = cursor;
            cursor = self.node(idx).next;
            Some(self.occupied(idx))
        })
    }

    /// Panics if any link or free-list invariant is broken.
    #[cfg(test)]
    fn assert_links_consistent(&self) {
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);

        let mut seen = 0;
        let mut prev = I::NONE;
        let mut cursor = self.head;
        while !cursor.is_none() {
            let node = self.node(cursor);
            assert!(node.element.is_some(), "linked slot {cursor:?} is vacant");
            assert_eq!(node.prev, prev, "back link of {cursor:?}");
            prev = cursor;
            cursor = node.next;
            seen += 1;
            assert!(seen <= self.len, "chain is longer than len");
        }
        assert_eq!(seen, self.len);
        assert_eq!(prev, self.tail);

        let mut free = 0;
        let mut cursor = self.free_head;
        while !cursor.is_none() {
            assert!(self.node(cursor).element.is_none(), "free slot {cursor:?} is occupied");
            cursor = self.node(cursor).next;
            free += 1;
            assert!(free <= self.nodes.len(), "free-list cycles");
        }
        assert_eq!(seen + free, self.nodes.len());
    }
}

impl<T, I: IndexType> DequeStore<T> for LinkedStore<T, I> {
    fn len(&self) -> usize {
        self.len
    }
    fn try_push_front(&mut self, item: T) -> Result<()> {
        self.try_push_front(item)
    }
    fn try_push_back(&mut self, item: T) -> Result<()> {
        self.try_push_back(item)
    }
    fn pop_front(&mut self) -> Result<T> {
        self.pop_front()
    }
    fn pop_back(&mut self) -> Result<T> {
        self.pop_back()
    }
    fn front(&self) -> Result<&T> {
        self.front()
    }
    fn back(&self) -> Result<&T> {
        self.back()
    }
    fn front_mut(&mut self) -> Result<&mut T> {
        self.front_mut()
    }
    fn back_mut(&mut self) -> Result<&mut T> {
        self.back_mut()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T, I: IndexType> Drop for LinkedStore<T, I> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone, I: IndexType> Clone for LinkedStore<T, I> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        for element in self.walk() {
            copy.push_back(element.clone());
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for element in source.walk() {
            self.push_back(element.clone());
        }
    }
}

impl<T, I: IndexType> Default for LinkedStore<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, I: IndexType> fmt::Debug for LinkedStore<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.walk()).finish()
    }
}

impl<T: PartialEq, I: IndexType> PartialEq for LinkedStore<T, I> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.walk().eq(other.walk())
    }
}
impl<T: Eq, I: IndexType> Eq for LinkedStore<T, I> {}

impl<T, I: IndexType> Extend<T> for LinkedStore<T, I> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, I: IndexType> FromIterator<T> for LinkedStore<T, I> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
