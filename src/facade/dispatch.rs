//! Capability-dispatch facade: one deque type whose store is chosen at runtime
//! from the closed set of stores and resolved by matching on every call.

use core::fmt;

use crate::config::{DequeConfig, StoreKind};
use crate::error::Result;
use crate::stores::DequeStore;
use crate::stores::buffer::BufferStore;
use crate::stores::linked::LinkedStore;

/// Tagged union over the two stores. Private so the variant cannot be swapped
/// from outside once a [`DispatchDeque`] is built.
#[derive(Clone)]
enum AnyStore<T> {
    Buffer(BufferStore<T>),
    Linked(LinkedStore<T>),
}

/// A deque bound at construction to either a [`BufferStore`] or a [`LinkedStore`].
///
/// Every operation matches on the bound variant and forwards to it, so the concrete
/// store is resolved at the point of each call. The variant never changes for the
/// lifetime of the value; [`kind`](Self::kind) reports it.
///
/// ```rust
/// use dual_deque::{DispatchDeque, StoreKind};
///
/// let mut d = DispatchDeque::new(StoreKind::Linked);
/// d.push_back(1);
/// d.push_front(0);
/// assert_eq!(d.kind(), StoreKind::Linked);
/// assert_eq!(d.pop_back(), Ok(1));
/// assert_eq!(d.front(), Ok(&0));
/// ```
#[derive(Clone)]
pub struct DispatchDeque<T> {
    store: AnyStore<T>,
}

impl<T> DispatchDeque<T> {
    /// Creates an empty deque over a default-sized store of `kind`.
    pub fn new(kind: StoreKind) -> Self {
        Self::from_config(&DequeConfig::new(kind))
    }

    /// Creates an empty deque over the store named by `config`.
    pub fn from_config(config: &DequeConfig) -> Self {
        let store = match config.store {
            StoreKind::Buffer => AnyStore::Buffer(BufferStore::from_config(config)),
            StoreKind::Linked => AnyStore::Linked(LinkedStore::from_config(config)),
        };
        Self { store }
    }

    /// Which store this deque is bound to.
    #[inline]
    pub fn kind(&self) -> StoreKind {
        match &self.store {
            AnyStore::Buffer(_) => StoreKind::Buffer,
            AnyStore::Linked(_) => StoreKind::Linked,
        }
    }

    /// Returns the number of elements in the deque.
    pub fn len(&self) -> usize {
        match &self.store {
            AnyStore::Buffer(s) => s.len(),
            AnyStore::Linked(s) => s.len(),
        }
    }

    /// Returns `true` if the deque contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prepends an element, or returns [`DequeError::ResourceExhausted`](crate::DequeError::ResourceExhausted) if storage cannot grow.
    pub fn try_push_front(&mut self, item: T) -> Result<()> {
        match &mut self.store {
            AnyStore::Buffer(s) => s.try_push_front(item),
            AnyStore::Linked(s) => s.try_push_front(item),
        }
    }

    /// Appends an element, or returns [`DequeError::ResourceExhausted`](crate::DequeError::ResourceExhausted) if storage cannot grow.
    pub fn try_push_back(&mut self, item: T) -> Result<()> {
        match &mut self.store {
            AnyStore::Buffer(s) => s.try_push_back(item),
            AnyStore::Linked(s) => s.try_push_back(item),
        }
    }

    /// Prepends an element. Panics if storage cannot grow.
    pub fn push_front(&mut self, item: T) {
        match &mut self.store {
            AnyStore::Buffer(s) => s.push_front(item),
            AnyStore::Linked(s) => s.push_front(item),
        }
    }

    /// Appends an element. Panics if storage cannot grow.
    pub fn push_back(&mut self, item: T) {
        match &mut self.store {
            AnyStore::Buffer(s) => s.push_back(item),
            AnyStore::Linked(s) => s.push_back(item),
        }
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Result<T> {
        match &mut self.store {
            AnyStore::Buffer(s) => s.pop_front(),
            AnyStore::Linked(s) => s.pop_front(),
        }
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Result<T> {
        match &mut self.store {
            AnyStore::Buffer(s) => s.pop_back(),
            AnyStore::Linked(s) => s.pop_back(),
        }
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Result<&T> {
        match &self.store {
            AnyStore::Buffer(s) => s.front(),
            AnyStore::Linked(s) => s.front(),
        }
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Result<&T> {
        match &self.store {
            AnyStore::Buffer(s) => s.back(),
            AnyStore::Linked(s) => s.back(),
        }
    }

    /// Returns a mutable reference to the first element.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        match &mut self.store {
            AnyStore::Buffer(s) => s.front_mut(),
            AnyStore::Linked(s) => s.front_mut(),
        }
    }

    /// Returns a mutable reference to the last element.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        match &mut self.store {
            AnyStore::Buffer(s) => s.back_mut(),
            AnyStore::Linked(s) => s.back_mut(),
        }
    }

    /// Drops every element, leaving the deque empty.
    pub fn clear(&mut self) {
        match &mut self.store {
            AnyStore::Buffer(s) => s.clear(),
            AnyStore::Linked(s) => s.clear(),
        }
    }

    /// Moves the contents out. `self` is left empty and still bound to the same
    /// kind of store.
    pub fn take(&mut self) -> Self {
        let store = match &mut self.store {
            AnyStore::Buffer(s) => AnyStore::Buffer(s.take()),
            AnyStore::Linked(s) => AnyStore::Linked(s.take()),
        };
        Self { store }
    }
}

impl<T> DequeStore<T> for DispatchDeque<T> {
    fn len(&self) -> usize {
        self.len()
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

impl<T> From<BufferStore<T>> for DispatchDeque<T> {
    fn from(store: BufferStore<T>) -> Self {
        Self {
            store: AnyStore::Buffer(store),
        }
    }
}

impl<T> From<LinkedStore<T>> for DispatchDeque<T> {
    fn from(store: LinkedStore<T>) -> Self {
        Self {
            store: AnyStore::Linked(store),
        }
    }
}

impl<T> Default for DispatchDeque<T> {
    fn default() -> Self {
        Self::new(StoreKind::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for DispatchDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.store {
            AnyStore::Buffer(s) => fmt::Debug::fmt(s, f),
            AnyStore::Linked(s) => fmt::Debug::fmt(s, f),
        }
    }
}

/// Element-wise, front to back. Deques over different stores compare equal when
/// they hold the same sequence.
impl<T: PartialEq> PartialEq for DispatchDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        match (&self.store, &other.store) {
            (AnyStore::Buffer(a), AnyStore::Buffer(b)) => a.walk().eq(b.walk()),
            (AnyStore::Buffer(a), AnyStore::Linked(b)) => a.walk().eq(b.walk()),
            (AnyStore::Linked(a), AnyStore::Buffer(b)) => a.walk().eq(b.walk()),
            (AnyStore::Linked(a), AnyStore::Linked(b)) => a.walk().eq(b.walk()),
        }
    }
}
impl<T: Eq> Eq for DispatchDeque<T> {}

impl<T> Extend<T> for DispatchDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match &mut self.store {
            AnyStore::Buffer(s) => s.extend(iter),
            AnyStore::Linked(s) => s.extend(iter),
        }
    }
}

/// Collects into the default (buffer) store.
impl<T> FromIterator<T> for DispatchDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::default();
        deque.extend(iter);
        deque
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DequeError, Operation};

    const KINDS: [StoreKind; 2] = [StoreKind::Buffer, StoreKind::Linked];

    fn drain_front<T>(d: &mut DispatchDeque<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(x) = d.pop_front() {
            out.push(x);
        }
        out
    }

    #[test]
    fn test_dispatch_scenario() {
        for kind in KINDS {
            let mut d = DispatchDeque::new(kind);
            d.push_back(10);
            d.push_back(20);
            d.push_back(30);
            d.push_front(0);
            d.push_front(-10);
            assert_eq!(d.front(), Ok(&-10), "{kind}");
            assert_eq!(d.back(), Ok(&30), "{kind}");
            assert_eq!(d.len(), 5, "{kind}");
            assert_eq!(d.pop_front(), Ok(-10), "{kind}");
            assert_eq!(d.pop_back(), Ok(30), "{kind}");
            assert_eq!(d.len(), 3, "{kind}");
            assert_eq!(format!("{d:?}"), "[0, 10, 20]", "{kind}");
        }
    }

    #[test]
    fn test_dispatch_kind_is_fixed() {
        for kind in KINDS {
            let mut d: DispatchDeque<String> = DispatchDeque::new(kind);
            assert_eq!(d.kind(), kind);
            d.push_back("a".to_string());
            d.clear();
            assert_eq!(d.kind(), kind);
            let moved = d.take();
            assert_eq!(moved.kind(), kind);
            assert_eq!(d.kind(), kind);
        }
    }

    #[test]
    fn test_dispatch_empty_access_fails() {
        for kind in KINDS {
            let mut d: DispatchDeque<i32> = DispatchDeque::new(kind);
            d.push_back(1);
            d.pop_back().unwrap();
            assert_eq!(d.front(), Err(DequeError::Empty(Operation::Front)));
            assert_eq!(d.back(), Err(DequeError::Empty(Operation::Back)));
            assert_eq!(d.pop_front(), Err(DequeError::Empty(Operation::PopFront)));
            assert_eq!(d.pop_back(), Err(DequeError::Empty(Operation::PopBack)));
            assert_eq!(d.len(), 0);
        }
    }

    #[test]
    fn test_dispatch_from_config_growth() {
        let cfg = DequeConfig::new(StoreKind::Buffer).with_initial_capacity(2);
        let mut d = DispatchDeque::from_config(&cfg);
        for i in 0..10 {
            d.push_back(i);
        }
        assert_eq!(drain_front(&mut d), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_dispatch_clone_is_deep() {
        for kind in KINDS {
            let mut original = DispatchDeque::new(kind);
            original.extend([1, 2, 3]);
            let mut copy = original.clone();
            copy.pop_front().unwrap();
            copy.push_back(4);
            *copy.front_mut().unwrap() = 20;
            assert_eq!(drain_front(&mut original), vec![1, 2, 3]);
            assert_eq!(drain_front(&mut copy), vec![20, 3, 4]);
        }
    }

    #[test]
    fn test_dispatch_take_leaves_empty() {
        for kind in KINDS {
            let mut source = DispatchDeque::new(kind);
            source.extend(["x", "y"]);
            let mut moved = source.take();
            assert!(source.is_empty());
            assert!(source.front().is_err());
            assert_eq!(drain_front(&mut moved), vec!["x", "y"]);
        }
    }

    #[test]
    fn test_dispatch_eq_across_kinds() {
        let mut a = DispatchDeque::new(StoreKind::Buffer);
        let mut b = DispatchDeque::new(StoreKind::Linked);
        a.extend([1, 2, 3]);
        b.push_back(2);
        b.push_back(3);
        assert_ne!(a, b);
        b.push_front(1);
        assert_eq!(a, b);
        let c: DispatchDeque<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(c.kind(), StoreKind::Buffer);
        assert_eq!(c, b);
    }

    #[test]
    fn test_dispatch_from_store() {
        let linked: LinkedStore<i32> = (0..3).collect();
        let d = DispatchDeque::from(linked);
        assert_eq!(d.kind(), StoreKind::Linked);
        assert_eq!(d.back(), Ok(&2));

        let buffer: BufferStore<i32> = (0..3).collect();
        let d: DispatchDeque<i32> = buffer.into();
        assert_eq!(d.kind(), StoreKind::Buffer);
        assert_eq!(d.front(), Ok(&0));
    }
}
