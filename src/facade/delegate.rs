//! Delegation facade: a deque that embeds one store value and forwards to it
//! statically.

use core::fmt;
use core::marker::PhantomData;

use crate::config::DequeConfig;
use crate::error::Result;
use crate::stores::DequeStore;
use crate::stores::buffer::BufferStore;
use crate::stores::linked::LinkedStore;

/// A deque holding exactly one store `S` and forwarding every call to it.
///
/// The store type is a generic parameter, so each call compiles down to a direct
/// call into `S`; there is no vtable and no runtime match.
///
/// ```rust
/// use dual_deque::{BufferDeque, LinkedDeque};
///
/// let mut a: BufferDeque<&str> = BufferDeque::new();
/// let mut b: LinkedDeque<&str> = LinkedDeque::new();
/// for d in [&mut a as &mut dyn dual_deque::DequeStore<&str>, &mut b] {
///     d.push_back("tail");
///     d.push_front("head");
/// }
/// assert_eq!(a.pop_front(), b.pop_front());
/// assert_eq!(a.back(), Ok(&"tail"));
/// ```
pub struct DelegateDeque<T, S = BufferStore<T>> {
    store: S,
    _marker: PhantomData<T>,
}

/// Delegation facade over a [`BufferStore`].
pub type BufferDeque<T> = DelegateDeque<T, BufferStore<T>>;

/// Delegation facade over a [`LinkedStore`].
pub type LinkedDeque<T> = DelegateDeque<T, LinkedStore<T>>;

impl<T, S: DequeStore<T>> DelegateDeque<T, S> {
    /// Creates an empty deque over a default store.
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::with_store(S::default())
    }

    /// Wraps an existing store.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Returns the embedded store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Borrows the backing store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the number of elements in the deque.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the deque contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Prepends an element, or returns [`DequeError::ResourceExhausted`](crate::DequeError::ResourceExhausted) if storage cannot grow.
    #[inline(always)]
    pub fn try_push_front(&mut self, item: T) -> Result<()> {
        self.store.try_push_front(item)
    }

    /// Appends an element, or returns [`DequeError::ResourceExhausted`](crate::DequeError::ResourceExhausted) if storage cannot grow.
    #[inline(always)]
    pub fn try_push_back(&mut self, item: T) -> Result<()> {
        self.store.try_push_back(item)
    }

    /// Prepends an element. Panics if storage cannot grow.
    #[inline(always)]
    pub fn push_front(&mut self, item: T) {
        self.store.push_front(item);
    }

    /// Appends an element. Panics if storage cannot grow.
    #[inline(always)]
    pub fn push_back(&mut self, item: T) {
        self.store.push_back(item);
    }

    /// Removes and returns the first element.
    #[inline(always)]
    pub fn pop_front(&mut self) -> Result<T> {
        self.store.pop_front()
    }

    /// Removes and returns the last element.
    #[inline(always)]
    pub fn pop_back(&mut self) -> Result<T> {
        self.store.pop_back()
    }

    /// Returns a reference to the first element.
    #[inline(always)]
    pub fn front(&self) -> Result<&T> {
        self.store.front()
    }

    /// Returns a reference to the last element.
    #[inline(always)]
    pub fn back(&self) -> Result<&T> {
        self.store.back()
    }

    /// Returns a mutable reference to the first element.
    #[inline(always)]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.store.front_mut()
    }

    /// Returns a mutable reference to the last element.
    #[inline(always)]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.store.back_mut()
    }

    /// Drops every element, leaving the deque empty.
    #[inline]
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Moves the contents out, leaving `self` over a fresh default store.
    pub fn take(&mut self) -> Self
    where
        S: Default,
    {
        Self::with_store(core::mem::take(&mut self.store))
    }
}

impl<T> DelegateDeque<T, BufferStore<T>> {
    /// Creates an empty deque whose buffer region starts at `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_store(BufferStore::with_capacity(capacity))
    }

    /// Creates an empty deque sized from `config`.
    pub fn from_config(config: &DequeConfig) -> Self {
        Self::with_store(BufferStore::from_config(config))
    }

    /// Returns the number of slots in the buffer region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }
}

impl<T> DelegateDeque<T, LinkedStore<T>> {
    /// Creates an empty deque with `capacity` node slots reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_store(LinkedStore::with_capacity(capacity))
    }

    /// Creates an empty deque sized from `config`.
    pub fn from_config(config: &DequeConfig) -> Self {
        Self::with_store(LinkedStore::from_config(config))
    }
}

impl<T, S: DequeStore<T>> DequeStore<T> for DelegateDeque<T, S> {
    fn len(&self) -> usize {
        self.store.len()
    }
    fn try_push_front(&mut self, item: T) -> Result<()> {
        self.store.try_push_front(item)
    }
    fn try_push_back(&mut self, item: T) -> Result<()> {
        self.store.try_push_back(item)
    }
    fn pop_front(&mut self) -> Result<T> {
        self.store.pop_front()
    }
    fn pop_back(&mut self) -> Result<T> {
        self.store.pop_back()
    }
    fn front(&self) -> Result<&T> {
        self.store.front()
    }
    fn back(&self) -> Result<&T> {
        self.store.back()
    }
    fn front_mut(&mut self) -> Result<&mut T> {
        self.store.front_mut()
    }
    fn back_mut(&mut self) -> Result<&mut T> {
        self.store.back_mut()
    }
    fn clear(&mut self) {
        self.store.clear();
    }
}

impl<T, S: Clone> Clone for DelegateDeque<T, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.store.clone_from(&source.store);
    }
}

impl<T, S: DequeStore<T> + Default> Default for DelegateDeque<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: fmt::Debug> fmt::Debug for DelegateDeque<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.store, f)
    }
}

impl<T, S: PartialEq> PartialEq for DelegateDeque<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}
impl<T, S: Eq> Eq for DelegateDeque<T, S> {}

impl<T, S: DequeStore<T>> Extend<T> for DelegateDeque<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.store.push_back(item);
        }
    }
}

impl<T, S: DequeStore<T> + Default> FromIterator<T> for DelegateDeque<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}
