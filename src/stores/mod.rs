//! Backing stores and the capability they share.

pub mod buffer;
pub mod linked;

use tracing::warn;

use crate::error::{DequeError, Result};

// ─── DequeStore ───────────────────────────────────────────────────────────────

/// An object-safe abstraction over the deque operation set.
///
/// Implemented by [`BufferStore`](buffer::BufferStore) and
/// [`LinkedStore`](linked::LinkedStore) so that code can drive a deque through
/// `&mut dyn DequeStore<T>` without knowing which store is underneath, and so that
/// [`DelegateDeque`](crate::DelegateDeque) can forward to either one statically.
pub trait DequeStore<T> {
    /// Returns the number of elements in the store.
    fn len(&self) -> usize;
    /// Returns `true` if the store contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Prepends an element, reporting storage exhaustion instead of panicking.
    fn try_push_front(&mut self, item: T) -> Result<()>;
    /// Appends an element, reporting storage exhaustion instead of panicking.
    fn try_push_back(&mut self, item: T) -> Result<()>;
    /// Prepends an element.
    ///
    /// # Panics
    /// If the backing storage cannot grow.
    fn push_front(&mut self, item: T) {
        if let Err(err) = self.try_push_front(item) {
            exhausted(err);
        }
    }
    /// Appends an element.
    ///
    /// # Panics
    /// If the backing storage cannot grow.
    fn push_back(&mut self, item: T) {
        if let Err(err) = self.try_push_back(item) {
            exhausted(err);
        }
    }
    /// Removes and returns the front element.
    fn pop_front(&mut self) -> Result<T>;
    /// Removes and returns the back element.
    fn pop_back(&mut self) -> Result<T>;
    /// Returns a shared reference to the front element.
    fn front(&self) -> Result<&T>;
    /// Returns a shared reference to the back element.
    fn back(&self) -> Result<&T>;
    /// Returns an exclusive reference to the front element.
    fn front_mut(&mut self) -> Result<&mut T>;
    /// Returns an exclusive reference to the back element.
    fn back_mut(&mut self) -> Result<&mut T>;
    /// Drops every element.
    fn clear(&mut self);
}

/// Growth failure is unrecoverable for the infallible push path.
#[cold]
#[inline(never)]
pub(crate) fn exhausted(err: DequeError) -> ! {
    warn!(error = %err, "deque push failed, storage exhausted");
    panic!("{err}");
}
