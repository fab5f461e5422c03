//! Error type shared by every store and facade.

use thiserror::Error;

/// Result alias defaulting to [`DequeError`].
pub type Result<T, E = DequeError> = core::result::Result<T, E>;

/// The boundary operation that was attempted on an empty deque.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    /// `front` or `front_mut`.
    Front,
    /// `back` or `back_mut`.
    Back,
    PopFront,
    PopBack,
}

impl Operation {
    /// The method name, as it appears in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Front => "front",
            Operation::Back => "back",
            Operation::PopFront => "pop_front",
            Operation::PopBack => "pop_back",
        }
    }
}

/// Failures surfaced by deque operations.
///
/// [`DequeError::Empty`] is always recoverable: the call that produced it left the
/// deque untouched. [`DequeError::ResourceExhausted`] means the backing storage
/// could not grow; the infallible `push_*` methods treat it as fatal.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DequeError {
    #[error("cannot call `{}` on an empty deque", .0.name())]
    Empty(Operation),
    #[error("backing storage cannot grow to {requested} slots")]
    ResourceExhausted { requested: usize },
}

impl DequeError {
    #[inline]
    pub fn is_empty_error(&self) -> bool {
        matches!(self, DequeError::Empty(_))
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, DequeError::ResourceExhausted { .. })
    }
}
