//! # Dual Deque
//!
//! Double-ended queues with two interchangeable backing stores and two ways of
//! wiring the public surface to them.
//!
//! ## Stores
//!
//! * [`BufferStore`]: a circular array. When a push finds the region full, the region
//!   is doubled and the live elements are compacted to its start. Push and pop at
//!   either end are amortized *O*(1).
//! * [`LinkedStore`]: a doubly linked chain whose nodes live in an index arena.
//!   Links are compact integers ([`IndexType`]), freed slots are recycled through a
//!   free-list, and push/pop at either end are *O*(1) without ever moving a node.
//!
//! Both implement the object-safe [`DequeStore`] capability.
//!
//! ## Facades
//!
//! * [`DispatchDeque`]: the store is chosen at runtime with a [`StoreKind`] and bound
//!   for the life of the value; each call matches on it.
//! * [`DelegateDeque`] (aliases [`BufferDeque`], [`LinkedDeque`]): the store is a type
//!   parameter; each call forwards statically.
//!
//! For the same sequence of calls, every combination returns the same values and
//! the same errors.
//!
//! ## Errors
//!
//! `front`, `back`, `pop_front` and `pop_back` on an empty deque return
//! [`DequeError::Empty`] and leave the deque untouched. Storage that cannot grow is
//! reported as [`DequeError::ResourceExhausted`] by the `try_push_*` methods; the
//! plain `push_*` methods panic on it.
//!
//! ## Examples
//!
//! ```rust
//! use dual_deque::{BufferDeque, DequeError, DispatchDeque, Operation, StoreKind};
//!
//! let mut d: BufferDeque<i32> = BufferDeque::with_capacity(2);
//! d.push_back(10);
//! d.push_back(20);
//! d.push_back(30); // grows the region
//! d.push_front(0);
//! d.push_front(-10);
//!
//! assert_eq!(d.len(), 5);
//! assert_eq!(d.front(), Ok(&-10));
//! assert_eq!(d.back(), Ok(&30));
//! assert_eq!(d.pop_front(), Ok(-10));
//! assert_eq!(d.pop_back(), Ok(30));
//! assert_eq!(format!("{d:?}"), "[0, 10, 20]");
//!
//! let mut empty: DispatchDeque<String> = DispatchDeque::new(StoreKind::Linked);
//! assert_eq!(empty.pop_back(), Err(DequeError::Empty(Operation::PopBack)));
//! assert!(empty.is_empty());
//! ```
//!
//! ## Thread safety
//!
//! None of the types synchronize internally. They are `Send`/`Sync` exactly when the
//! element type is; sharing one deque between threads needs external locking.

// --- Module Declarations ---

pub mod config;
pub mod error;
pub mod facade;
pub mod stores;
pub mod utils;

// --- Re-exports ---

pub use config::{DequeConfig, ParseStoreKindError, StoreKind};
pub use error::{DequeError, Operation, Result};
pub use facade::{BufferDeque, DelegateDeque, DispatchDeque, LinkedDeque};
pub use stores::DequeStore;
pub use stores::buffer::BufferStore;
pub use stores::linked::LinkedStore;
pub use utils::index_type::IndexType;
