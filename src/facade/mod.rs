//! The public deque surface, wired to a store in one of two ways.
//!
//! * [`DispatchDeque`]: the store is picked at runtime from [`StoreKind`](crate::StoreKind)
//!   and every call is resolved by matching on it.
//! * [`DelegateDeque`]: the store is a type parameter and every call forwards to it
//!   statically.
//!
//! Both produce the same results and the same errors for the same sequence of calls.

pub mod delegate;
pub mod dispatch;

pub use delegate::{BufferDeque, DelegateDeque, LinkedDeque};
pub use dispatch::DispatchDeque;
