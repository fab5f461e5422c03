//! Growable ring-buffer store.
//!
//! Elements live in a contiguous region of `capacity` slots. The occupied slots are
//! exactly the `len` positions starting at `head` and wrapping modulo `capacity`;
//! `tail` is the physical slot of the last element. When a push would exceed the
//! region, a region of twice the size is reserved, the live elements are moved into
//! it in front-to-back order starting at slot 0, and the old region is released.
//! Pushes at either end are therefore amortized *O*(1).
//!
//! # Index conventions
//! * An empty store always sits at the canonical `head == tail == 0`.
//! * The first element pushed into an empty store lands in slot 0 regardless of the
//!   end it was pushed at.
//! * After that, `push_front` retreats `head` (wrapping) before writing and
//!   `push_back` advances `tail` (wrapping) before writing.
//! * Draining the last element resets both indices to 0 so that repeated
//!   fill/drain cycles never drift.

use core::fmt;
use core::mem::{self, MaybeUninit};

use tracing::{debug, trace};

use super::DequeStore;
use crate::config::{DEFAULT_INITIAL_CAPACITY, DequeConfig, MIN_CAPACITY};
use crate::error::{DequeError, Operation, Result};

/// A double-ended queue backed by a circular array with doubling growth.
///
/// # Safety invariants
/// * `slots.len() == capacity` and `capacity >= MIN_CAPACITY`.
/// * `len <= capacity`.
/// * The slots at `(head + i) % capacity` for `i in 0..len` are initialized; every
///   other slot is uninitialized.
/// * `len == 0` implies `head == 0 && tail == 0`.
/// * `len > 0` implies `tail == (head + len - 1) % capacity`.
pub struct BufferStore<T> {
    slots: Vec<MaybeUninit<T>>,
    head: usize,
    tail: usize,
    len: usize,
    capacity: usize,
}

impl<T> BufferStore<T> {
    /// Creates an empty store with the default initial capacity of
    /// [`DEFAULT_INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty store whose region holds `capacity` slots.
    ///
    /// A `capacity` of 0 is clamped to [`MIN_CAPACITY`].
    ///
    /// # Panics
    /// If the region cannot be allocated. See [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(store) => store,
            Err(err) => super::exhausted(err),
        }
    }

    /// Fallible counterpart of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let capacity = capacity.max(MIN_CAPACITY);
        Ok(Self {
            slots: allocate_region(capacity)?,
            head: 0,
            tail: 0,
            len: 0,
            capacity,
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

    /// Returns the number of slots in the current region.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    fn next_index(&self, idx: usize) -> usize {
        if idx + 1 == self.capacity { 0 } else { idx + 1 }
    }

    #[inline(always)]
    fn prev_index(&self, idx: usize) -> usize {
        if idx == 0 { self.capacity - 1 } else { idx - 1 }
    }

    /// Maps a logical position (0 = front) to a physical slot.
    #[inline(always)]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.capacity
    }

    /// Shared reference to the element at logical `index`.
    ///
    /// Callers must guarantee `index < self.len`.
    #[inline(always)]
    fn slot(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: logical positions below `len` are initialized.
        unsafe { self.slots[self.physical(index)].assume_init_ref() }
    }

    /// Front-to-back walk over the live elements.
    pub(crate) fn walk(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |i| self.slot(i))
    }

    /// Prepends `item`, growing the region if it is full.
    pub fn try_push_front(&mut self, item: T) -> Result<()> {
        if self.len == self.capacity {
            self.grow()?;
        }
        if self.len > 0 {
            self.head = self.prev_index(self.head);
        }
        self.slots[self.head].write(item);
        self.len += 1;
        Ok(())
    }

    /// Appends `item`, growing the region if it is full.
    pub fn try_push_back(&mut self, item: T) -> Result<()> {
        if self.len == self.capacity {
            self.grow()?;
        }
        if self.len > 0 {
            self.tail = self.next_index(self.tail);
        }
        self.slots[self.tail].write(item);
        self.len += 1;
        Ok(())
    }

    /// Prepends `item`.
    ///
    /// # Panics
    /// If the region cannot grow.
    #[inline]
    pub fn push_front(&mut self, item: T) {
        if let Err(err) = self.try_push_front(item) {
            super::exhausted(err);
        }
    }

    /// Appends `item`.
    ///
    /// # Panics
    /// If the region cannot grow.
    #[inline]
    pub fn push_back(&mut self, item: T) {
        if let Err(err) = self.try_push_back(item) {
            super::exhausted(err);
        }
    }

    /// Removes and returns the front element.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(DequeError::Empty(Operation::PopFront));
        }
        // SAFETY: `head` holds the initialized front element; it is treated as
        // uninitialized from here on because `head` moves past it or resets.
        let item = unsafe { self.slots[self.head].assume_init_read() };
        self.len -= 1;
        if self.len == 0 {
            self.reset_indices();
        } else {
            self.head = self.next_index(self.head);
        }
        Ok(item)
    }

    /// Removes and returns the back element.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(DequeError::Empty(Operation::PopBack));
        }
        // SAFETY: `tail` holds the initialized back element; see `pop_front`.
        let item = unsafe { self.slots[self.tail].assume_init_read() };
        self.len -= 1;
        if self.len == 0 {
            self.reset_indices();
        } else {
            self.tail = self.prev_index(self.tail);
        }
        Ok(item)
    }

    /// Returns a shared reference to the front element.
    #[inline]
    pub fn front(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(DequeError::Empty(Operation::Front));
        }
        // SAFETY: non-empty, so `head` is initialized.
        Ok(unsafe { self.slots[self.head].assume_init_ref() })
    }

    /// Returns a shared reference to the back element.
    #[inline]
    pub fn back(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(DequeError::Empty(Operation::Back));
        }
        // SAFETY: non-empty, so `tail` is initialized.
        Ok(unsafe { self.slots[self.tail].assume_init_ref() })
    }

    /// Returns an exclusive reference to the front element.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.len == 0 {
            return Err(DequeError::Empty(Operation::Front));
        }
        // SAFETY: non-empty, so `head` is initialized.
        Ok(unsafe { self.slots[self.head].assume_init_mut() })
    }

    /// Returns an exclusive reference to the back element.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.len == 0 {
            return Err(DequeError::Empty(Operation::Back));
        }
        // SAFETY: non-empty, so `tail` is initialized.
        Ok(unsafe { self.slots[self.tail].assume_init_mut() })
    }

    /// Drops every element. The region keeps its current capacity.
    pub fn clear(&mut self) {
        let (head, len) = (self.head, self.len);
        // Forget the elements before dropping them so a panicking destructor
        // leaks the remainder instead of double-dropping on unwind.
        self.len = 0;
        self.reset_indices();
        for i in 0..len {
            let idx = (head + i) % self.capacity;
            // SAFETY: slot was live before the reset above and is dropped once.
            unsafe { self.slots[idx].assume_init_drop() };
        }
        if len > 0 {
            trace!(released = len, "cleared buffer store");
        }
    }

    /// Moves the contents out, leaving `self` empty with a fresh default region.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    #[inline(always)]
    fn reset_indices(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Doubles the region, compacting the live elements to slots `0..len`.
    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<()> {
        let requested = self
            .capacity
            .checked_mul(2)
            .ok_or(DequeError::ResourceExhausted {
                requested: usize::MAX,
            })?;
        let mut region = allocate_region(requested)?;
        for (i, dest) in region.iter_mut().take(self.len).enumerate() {
            let from = self.physical(i);
            // SAFETY: each live slot is read exactly once; the old region is
            // then discarded without running destructors.
            dest.write(unsafe { self.slots[from].assume_init_read() });
        }
        let old_capacity = self.capacity;
        self.slots = region;
        self.capacity = requested;
        self.head = 0;
        self.tail = self.len.saturating_sub(1);
        debug!(
            old_capacity,
            new_capacity = requested,
            len = self.len,
            "grew buffer store"
        );
        Ok(())
    }
}

/// Reserves `capacity` uninitialized slots, surfacing allocation failure.
fn allocate_region<T>(capacity: usize) -> Result<Vec<MaybeUninit<T>>> {
    let mut region = Vec::new();
    region
        .try_reserve_exact(capacity)
        .map_err(|_| DequeError::ResourceExhausted {
            requested: capacity,
        })?;
    region.resize_with(capacity, MaybeUninit::uninit);
    Ok(region)
}

impl<T> DequeStore<T> for BufferStore<T> {
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

impl<T> Drop for BufferStore<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for BufferStore<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity);
        copy.extend(self.walk().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.walk().cloned());
    }
}

impl<T> Default for BufferStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BufferStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.walk()).finish()
    }
}

impl<T: PartialEq> PartialEq for BufferStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.walk().eq(other.walk())
    }
}
impl<T: Eq> Eq for BufferStore<T> {}

impl<T> Extend<T> for BufferStore<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for BufferStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tracing_test::traced_test;

    fn drain_front<T>(store: &mut BufferStore<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(item) = store.pop_front() {
            out.push(item);
        }
        out
    }

    // ─── basic ops ────────────────────────────────────────────────────────────
    #[test]
    fn test_buffer_ops_scenario() {
        let mut d = BufferStore::new();
        d.push_back(10);
        d.push_back(20);
        d.push_back(30);
        d.push_front(0);
        d.push_front(-10);
        assert_eq!(d.len(), 5);
        assert_eq!(d.front(), Ok(&-10));
        assert_eq!(d.back(), Ok(&30));
        assert_eq!(d.pop_front(), Ok(-10));
        assert_eq!(d.pop_back(), Ok(30));
        assert_eq!(d.len(), 3);
        assert_eq!(drain_front(&mut d), vec![0, 10, 20]);
    }

    #[test]
    fn test_buffer_ops_first_push_front_lands_at_zero() {
        let mut d: BufferStore<i32> = BufferStore::with_capacity(4);
        d.push_front(7);
        assert_eq!((d.head, d.tail), (0, 0));
        assert_eq!(d.front(), Ok(&7));
        assert_eq!(d.back(), Ok(&7));
        d.push_front(6);
        assert_eq!(d.head, 3);
        assert_eq!(d.back(), Ok(&7));
    }

    #[test]
    fn test_buffer_ops_empty_access_fails() {
        let mut d: BufferStore<i32> = BufferStore::new();
        assert_eq!(d.front(), Err(DequeError::Empty(Operation::Front)));
        assert_eq!(d.back(), Err(DequeError::Empty(Operation::Back)));
        assert_eq!(d.pop_front(), Err(DequeError::Empty(Operation::PopFront)));
        assert_eq!(d.pop_back(), Err(DequeError::Empty(Operation::PopBack)));
        assert!(d.front_mut().is_err());
        assert_eq!(d.len(), 0);
        assert_eq!((d.head, d.tail), (0, 0));
    }

    #[test]
    fn test_buffer_ops_drained_resets_indices() {
        let mut d = BufferStore::with_capacity(4);
        d.push_back(1);
        d.push_back(2);
        d.push_front(0);
        assert_eq!(d.pop_back(), Ok(2));
        assert_eq!(d.pop_front(), Ok(0));
        assert_eq!(d.pop_front(), Ok(1));
        assert_eq!((d.head, d.tail, d.len), (0, 0, 0));
        assert!(d.pop_back().is_err());
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn test_buffer_ops_mut_access() {
        let mut d: BufferStore<i32> = [1, 2, 3].into_iter().collect();
        *d.front_mut().unwrap() += 10;
        *d.back_mut().unwrap() *= 10;
        assert_eq!(drain_front(&mut d), vec![11, 2, 30]);
    }

    // ─── wrap-around ──────────────────────────────────────────────────────────
    #[test]
    fn test_buffer_wrap_ring() {
        let mut d = BufferStore::with_capacity(4);
        d.push_back(1);
        d.push_back(2);
        d.pop_front().unwrap();
        d.push_back(3);
        d.push_back(4);
        d.push_back(5); // tail wraps to slot 0
        assert_eq!(d.capacity(), 4);
        assert_eq!(d.tail, 0);
        assert_eq!(drain_front(&mut d), vec![2, 3, 4, 5]);
    }

    // ─── growth ───────────────────────────────────────────────────────────────
    #[test]
    fn test_buffer_growth_preserves_order() {
        let mut d = BufferStore::with_capacity(3);
        for i in 0..10 {
            d.push_back(i);
        }
        assert_eq!(d.capacity(), 12);
        assert_eq!(drain_front(&mut d), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_buffer_growth_wrapped_region() {
        let mut d = BufferStore::with_capacity(4);
        d.push_back(2);
        d.push_back(3);
        d.push_front(1);
        d.push_front(0); // head wrapped to slot 2
        d.push_back(4); // forces growth from a wrapped layout
        assert_eq!(d.capacity(), 8);
        assert_eq!((d.head, d.tail), (0, 4));
        d.push_front(-1);
        assert_eq!(drain_front(&mut d), vec![-1, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_buffer_growth_minimum_capacity() {
        let mut d = BufferStore::with_capacity(0);
        assert_eq!(d.capacity(), MIN_CAPACITY);
        d.push_front("b".to_string());
        d.push_front("a".to_string());
        d.push_back("c".to_string());
        assert_eq!(d.capacity(), 4);
        assert_eq!(drain_front(&mut d), vec!["a", "b", "c"]);
    }

    #[traced_test]
    #[test]
    fn test_buffer_growth_logged() {
        let mut d = BufferStore::with_capacity(1);
        d.push_back(1);
        d.push_back(2);
        assert!(logs_contain("grew buffer store"));
        assert!(logs_contain("new_capacity=2"));
    }

    // ─── ownership ────────────────────────────────────────────────────────────
    #[test]
    fn test_buffer_clear_drops_elements() {
        let marker = Rc::new(());
        let mut d = BufferStore::with_capacity(2);
        for _ in 0..5 {
            d.push_front(Rc::clone(&marker));
        }
        assert_eq!(Rc::strong_count(&marker), 6);
        d.clear();
        assert_eq!(Rc::strong_count(&marker), 1);
        assert!(d.is_empty());
        assert_eq!(d.capacity(), 8);
        d.push_back(Rc::clone(&marker));
        drop(d);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_buffer_pop_hands_out_ownership() {
        let marker = Rc::new(());
        let mut d = BufferStore::new();
        d.push_back(Rc::clone(&marker));
        d.push_back(Rc::clone(&marker));
        let popped = d.pop_back().unwrap();
        drop(d);
        assert_eq!(Rc::strong_count(&marker), 2);
        drop(popped);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_buffer_clone_is_deep() {
        let mut original: BufferStore<String> =
            ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        let mut copy = original.clone();
        copy.push_back("w".to_string());
        copy.pop_front().unwrap();
        copy.front_mut().unwrap().push('!');
        assert_eq!(original.len(), 3);
        assert_eq!(drain_front(&mut original), vec!["x", "y", "z"]);
        assert_eq!(drain_front(&mut copy), vec!["y!", "z", "w"]);
    }

    #[test]
    fn test_buffer_clone_from() {
        let source: BufferStore<i32> = (0..5).collect();
        let mut dest: BufferStore<i32> = (100..120).collect();
        dest.clone_from(&source);
        assert_eq!(dest, source);
        assert_eq!(dest.len(), 5);
    }

    #[test]
    fn test_buffer_take_leaves_empty() {
        let mut source: BufferStore<i32> = (1..=4).collect();
        let mut moved = source.take();
        assert!(source.is_empty());
        assert_eq!((source.head, source.tail), (0, 0));
        assert_eq!(source.front(), Err(DequeError::Empty(Operation::Front)));
        assert_eq!(drain_front(&mut moved), vec![1, 2, 3, 4]);
        source.push_back(9);
        assert_eq!(source.back(), Ok(&9));
    }

    #[test]
    fn test_buffer_traits_debug_and_eq() {
        let mut a = BufferStore::with_capacity(2);
        a.push_back(2);
        a.push_front(1);
        a.push_back(3);
        let b: BufferStore<i32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), "[1, 2, 3]");
    }

    #[test]
    fn test_buffer_from_config() {
        let cfg = DequeConfig::default().with_initial_capacity(0);
        let d: BufferStore<u8> = BufferStore::from_config(&cfg);
        assert_eq!(d.capacity(), 1);
    }

    #[test]
    fn test_buffer_exhaustion_reported() {
        let err = BufferStore::<u64>::try_with_capacity(usize::MAX).unwrap_err();
        assert!(err.is_exhausted());
    }

    #[test]
    fn test_buffer_any_store_dispatch() {
        let mut d: BufferStore<i32> = BufferStore::new();
        let any: &mut dyn DequeStore<i32> = &mut d;
        any.push_back(10);
        any.push_front(5);
        assert_eq!(any.len(), 2);
        assert_eq!(any.front(), Ok(&5));
        assert_eq!(any.pop_back(), Ok(10));
        any.clear();
        assert!(any.is_empty());
    }
}
