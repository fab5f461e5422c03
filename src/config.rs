//! Construction-time configuration: which store backs a deque and how large the
//! buffer region starts.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Initial region size used by [`BufferStore::new`](crate::BufferStore::new).
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Smallest region a buffer store will ever allocate. Requests below this are
/// clamped up so that doubling always makes progress.
pub const MIN_CAPACITY: usize = 1;

/// The closed set of backing stores.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum StoreKind {
    /// Circular array, see [`BufferStore`](crate::BufferStore).
    #[default]
    Buffer,
    /// Index-linked arena, see [`LinkedStore`](crate::LinkedStore).
    Linked,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreKind::Buffer => "buffer",
            StoreKind::Linked => "linked",
        })
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown store kind `{0}`, expected `buffer` or `linked`")]
pub struct ParseStoreKindError(pub String);

impl FromStr for StoreKind {
    type Err = ParseStoreKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("buffer") {
            Ok(StoreKind::Buffer)
        } else if trimmed.eq_ignore_ascii_case("linked") {
            Ok(StoreKind::Linked)
        } else {
            Err(ParseStoreKindError(s.to_owned()))
        }
    }
}

/// Settings consumed by [`DispatchDeque::from_config`](crate::DispatchDeque::from_config)
/// and the stores' `with_capacity` constructors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DequeConfig {
    pub store: StoreKind,
    /// Requested starting capacity. Values below [`MIN_CAPACITY`] are raised to it.
    pub initial_capacity: usize,
}

impl DequeConfig {
    /// Config for `store` with the default initial capacity.
    pub const fn new(store: StoreKind) -> Self {
        Self {
            store,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }

    /// Replaces the store kind.
    pub const fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    /// Replaces the requested initial capacity.
    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// The capacity a buffer store will actually allocate for this config.
    #[inline]
    pub const fn effective_capacity(&self) -> usize {
        if self.initial_capacity < MIN_CAPACITY {
            MIN_CAPACITY
        } else {
            self.initial_capacity
        }
    }
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self::new(StoreKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let cfg = DequeConfig::default();
        assert_eq!(cfg.store, StoreKind::Buffer);
        assert_eq!(cfg.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(cfg.effective_capacity(), 10);
    }

    #[test]
    fn test_config_zero_capacity_clamped() {
        let cfg = DequeConfig::default().with_initial_capacity(0);
        assert_eq!(cfg.initial_capacity, 0);
        assert_eq!(cfg.effective_capacity(), MIN_CAPACITY);
    }

    #[test]
    fn test_config_builder() {
        let cfg = DequeConfig::new(StoreKind::Buffer)
            .with_store(StoreKind::Linked)
            .with_initial_capacity(3);
        assert_eq!(cfg.store, StoreKind::Linked);
        assert_eq!(cfg.effective_capacity(), 3);
    }

    #[test]
    fn test_store_kind_parse() {
        assert_eq!("buffer".parse::<StoreKind>(), Ok(StoreKind::Buffer));
        assert_eq!(" Linked ".parse::<StoreKind>(), Ok(StoreKind::Linked));
        let err = "ring".parse::<StoreKind>().unwrap_err();
        assert_eq!(err, ParseStoreKindError("ring".to_owned()));
        assert_eq!(StoreKind::Linked.to_string(), "linked");
        assert_eq!(StoreKind::Buffer.to_string().parse::<StoreKind>(), Ok(StoreKind::Buffer));
    }
}
