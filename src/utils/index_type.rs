//! Compact link types for index-based node arenas.

use core::hash::Hash;
use std::fmt::Debug;

/// An unsigned integer type used as a **node index** in place of a pointer.
///
/// Nodes reference their neighbours by slot number in a table, so links cost as
/// few bytes as the chosen type and the arena has no ownership cycles. The largest
/// value of the type is reserved as the null link, which caps the number of
/// addressable slots at [`MAX_SLOTS`](IndexType::MAX_SLOTS).
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value indicating "no node" (analogous to a null pointer).
    const NONE: Self;

    /// Number of distinct slots this type can address.
    const MAX_SLOTS: usize;

    /// Converts this index to a `usize` for table access.
    fn as_usize(self) -> usize;

    /// Converts a slot number to this type, or `None` if it is not addressable.
    fn from_usize(i: usize) -> Option<Self>;

    /// Returns true if this is the null link.
    #[inline(always)]
    fn is_none(self) -> bool {
        self == Self::NONE
    }
}

macro_rules! impl_index_type {
    ($($ty:ty),* $(,)?) => {$(
        impl IndexType for $ty {
            const NONE: Self = <$ty>::MAX;
            const MAX_SLOTS: usize = <$ty>::MAX as usize;
            #[inline(always)]
            fn as_usize(self) -> usize {
                self as usize
            }
            #[inline(always)]
            fn from_usize(i: usize) -> Option<Self> {
                if i < Self::MAX_SLOTS {
                    Some(i as $ty)
                } else {
                    None
                }
            }
        }
    )*};
}

impl_index_type!(u8, u16, u32, usize);
