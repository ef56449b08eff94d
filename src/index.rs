//! Index trait for arena links.
//!
//! The [`Index`] trait abstracts over the integer types used to link nodes
//! inside an arena. It provides a sentinel value (`NONE`) and conversion
//! to/from `usize`, so chains can use plain integers where a pointer-based
//! list would use `Option<NonNull<Node>>`.

/// Trait for index types used as arena links.
///
/// Provides a sentinel value (`NONE`) and conversion to/from `usize`.
/// Implemented for common unsigned integer types.
///
/// # Example
///
/// ```
/// use braid::Index;
///
/// // u32 is an Index with NONE = u32::MAX
/// let idx: u32 = 7;
/// assert!(!idx.is_none());
/// assert!(u32::NONE.is_none());
/// ```
pub trait Index: Copy + Eq {
    /// Sentinel value representing "no index" / "end of chain".
    ///
    /// For integer types this is `MAX` (e.g., `u32::MAX`).
    const NONE: Self;

    /// Creates an index from a `usize` value.
    fn from_usize(val: usize) -> Self;

    /// Returns the index as a `usize`.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl Index for u8 {
    const NONE: Self = u8::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val as u8
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}

impl Index for u16 {
    const NONE: Self = u16::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val as u16
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}

impl Index for u32 {
    const NONE: Self = u32::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val as u32
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}

impl Index for usize {
    const NONE: Self = usize::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self
    }
}
