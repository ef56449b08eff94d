//! Storage trait and arena for slab-like containers with stable indices.
//!
//! Storage provides insert/remove/get operations where indices remain valid
//! until explicitly removed. This is what lets chain-based structures use
//! indices instead of pointers: a node's `next` field is just an index into
//! the same storage.
//!
//! [`Arena`] is the built-in backend: a vec of slots with an intrusive free
//! list, so removed slots are reused by later inserts. Growth goes through
//! `Vec::try_reserve`, which means an out-of-memory condition surfaces as
//! [`AllocError`] instead of aborting the process.

use crate::Index;

use core::fmt;
use std::collections::TryReserveError;
use std::mem;

/// Storage could not be obtained for a new element.
///
/// Returned by every fallible insertion path. Never retried internally;
/// the container is left exactly as it was before the failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocation failed")
    }
}

impl std::error::Error for AllocError {}

impl From<TryReserveError> for AllocError {
    fn from(_: TryReserveError) -> Self {
        AllocError
    }
}

/// Slab-like storage with stable indices.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable indices**: an index remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
///
/// # Implementations
///
/// - [`Arena<T>`] - vec-of-slots with free list (in this crate)
/// - `slab::Slab<T>` - growable slab (feature `slab`)
pub trait Storage<T> {
    /// Index type for this storage.
    type Index: Index;

    /// Inserts a value, returning its stable index.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if storage cannot be obtained.
    fn try_insert(&mut self, value: T) -> Result<Self::Index, AllocError>;

    /// Removes and returns the value at `index`, if present.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Returns a reference to the value at `index`, if present.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if present.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Arena - vec of slots, intrusive free list, fallible growth
// =============================================================================

#[derive(Debug)]
enum Slot<T, Idx> {
    Occupied(T),
    Vacant(Idx),
}

/// Growable slab storage with LIFO slot reuse.
///
/// Slots live in a single `Vec`. Vacant slots are threaded into a free list
/// through their own storage, so insertion after removal never grows the vec.
/// When the vec does grow, the reservation is fallible.
///
/// # Example
///
/// ```
/// use braid::{Arena, Storage};
///
/// let mut arena: Arena<u64> = Arena::new();
///
/// let idx = arena.try_insert(42).unwrap();
/// assert_eq!(arena.get(idx), Some(&42));
///
/// assert_eq!(arena.remove(idx), Some(42));
/// assert_eq!(arena.get(idx), None);
/// ```
#[derive(Debug)]
pub struct Arena<T, Idx: Index = u32> {
    slots: Vec<Slot<T, Idx>>,
    free_head: Idx,
    len: usize,
}

impl<T, Idx: Index> Arena<T, Idx> {
    /// Creates an empty arena. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: Idx::NONE,
            len: 0,
        }
    }

    /// Creates an arena with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the backing allocation fails.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self {
            slots,
            free_head: Idx::NONE,
            len: 0,
        })
    }

    /// Returns the number of slots the arena holds without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value, returning its stable index.
    ///
    /// Reuses the most recently vacated slot when one exists; otherwise
    /// grows the slot vec by one.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growth fails or the index space of `Idx`
    /// is exhausted.
    pub fn try_insert(&mut self, value: T) -> Result<Idx, AllocError> {
        let idx = if self.free_head.is_some() {
            let idx = self.free_head;
            match mem::replace(&mut self.slots[idx.as_usize()], Slot::Occupied(value)) {
                Slot::Vacant(next_free) => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("free list points at occupied slot"),
            }
            idx
        } else {
            // NONE is the sentinel, so it can never be handed out as an index.
            if self.slots.len() >= Idx::NONE.as_usize() {
                return Err(AllocError);
            }
            self.slots.try_reserve(1)?;
            let idx = Idx::from_usize(self.slots.len());
            self.slots.push(Slot::Occupied(value));
            idx
        };
        self.len += 1;
        Ok(idx)
    }

    /// Removes and returns the value at `index`, if present.
    ///
    /// The slot is pushed onto the free list for reuse.
    pub fn remove(&mut self, index: Idx) -> Option<T> {
        let slot = self.slots.get_mut(index.as_usize())?;
        if matches!(slot, Slot::Vacant(_)) {
            return None;
        }
        match mem::replace(slot, Slot::Vacant(self.free_head)) {
            Slot::Occupied(value) => {
                self.free_head = index;
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns a reference to the value at `index`, if present.
    #[inline]
    pub fn get(&self, index: Idx) -> Option<&T> {
        match self.slots.get(index.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value at `index`, if present.
    #[inline]
    pub fn get_mut(&mut self, index: Idx) -> Option<&mut T> {
        match self.slots.get_mut(index.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Removes all elements, dropping every stored value.
    ///
    /// Indices handed out before the call are invalidated.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = Idx::NONE;
        self.len = 0;
    }
}

impl<T, Idx: Index> Default for Arena<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Idx: Index> Storage<T> for Arena<T, Idx> {
    type Index = Idx;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Idx, AllocError> {
        Arena::try_insert(self, value)
    }

    #[inline]
    fn remove(&mut self, index: Idx) -> Option<T> {
        Arena::remove(self, index)
    }

    #[inline]
    fn get(&self, index: Idx) -> Option<&T> {
        Arena::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: Idx) -> Option<&mut T> {
        Arena::get_mut(self, index)
    }

    #[inline]
    fn len(&self) -> usize {
        Arena::len(self)
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, AllocError> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let arena: Arena<u64> = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.capacity(), 0);
    }

    #[test]
    fn try_with_capacity_reserves() {
        let arena: Arena<u64> = Arena::try_with_capacity(100).unwrap();
        assert!(arena.capacity() >= 100);
        assert!(arena.is_empty());
    }

    #[test]
    fn insert_get_remove() {
        let mut arena: Arena<u64> = Arena::new();

        let idx = arena.try_insert(42).unwrap();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(idx), Some(&42));

        assert_eq!(arena.remove(idx), Some(42));
        assert_eq!(arena.get(idx), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn get_mut() {
        let mut arena: Arena<u64> = Arena::new();

        let idx = arena.try_insert(10).unwrap();
        *arena.get_mut(idx).unwrap() = 20;

        assert_eq!(arena.get(idx), Some(&20));
    }

    #[test]
    fn slot_reuse_is_lifo() {
        let mut arena: Arena<u64> = Arena::new();

        let k0 = arena.try_insert(0).unwrap();
        let _k1 = arena.try_insert(1).unwrap();

        arena.remove(k0);

        let k2 = arena.try_insert(2).unwrap();
        assert_eq!(k2, k0);
    }

    #[test]
    fn remove_nonexistent() {
        let mut arena: Arena<u64> = Arena::new();

        let idx = arena.try_insert(42).unwrap();
        arena.remove(idx);

        // Double remove returns None
        assert_eq!(arena.remove(idx), None);

        // Out-of-bounds index returns None
        assert_eq!(arena.remove(1000), None);
    }

    #[test]
    fn sentinel_is_never_a_valid_index() {
        let arena: Arena<u64> = Arena::new();
        assert_eq!(arena.get(u32::NONE), None);
    }

    #[test]
    fn interleaved_insert_remove() {
        let mut arena: Arena<u64> = Arena::new();

        let mut indices = Vec::new();
        for i in 0..64 {
            indices.push(arena.try_insert(i).unwrap());
        }
        for idx in indices.iter().step_by(2) {
            arena.remove(*idx);
        }
        assert_eq!(arena.len(), 32);

        // Vacated slots are reused before the vec grows
        let cap = arena.capacity();
        for i in 0..32 {
            arena.try_insert(100 + i).unwrap();
        }
        assert_eq!(arena.capacity(), cap);
        assert_eq!(arena.len(), 64);
    }

    #[test]
    fn clear_drops_values() {
        use std::rc::Rc;

        let value = Rc::new(());
        let mut arena: Arena<Rc<()>> = Arena::new();
        arena.try_insert(value.clone()).unwrap();
        arena.try_insert(value.clone()).unwrap();

        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(Rc::strong_count(&value), 1);
    }

    #[test]
    fn index_space_exhaustion_is_recoverable() {
        // u8 reserves 255 as NONE, so 255 slots exhaust the index space
        let mut arena: Arena<u64, u8> = Arena::new();
        for i in 0..255u64 {
            arena.try_insert(i).unwrap();
        }

        assert_eq!(arena.try_insert(255), Err(AllocError));
        assert_eq!(arena.len(), 255);
        assert_eq!(arena.get(0), Some(&0));
        assert_eq!(arena.get(254), Some(&254));

        // Freeing a slot makes insertion possible again
        assert_eq!(arena.remove(7), Some(7));
        let idx = arena.try_insert(999).unwrap();
        assert_eq!(idx, 7);
        assert_eq!(arena.len(), 255);
    }

    #[test]
    fn small_index_type() {
        let mut arena: Arena<u64, u16> = Arena::new();

        let idx = arena.try_insert(42).unwrap();
        assert_eq!(arena.get(idx), Some(&42));
    }

    #[cfg(feature = "slab")]
    mod slab_tests {
        use super::*;

        #[test]
        fn insert_get_remove() {
            let mut storage = slab::Slab::new();

            let idx = Storage::try_insert(&mut storage, 42).unwrap();
            assert_eq!(Storage::get(&storage, idx), Some(&42));

            assert_eq!(Storage::remove(&mut storage, idx), Some(42));
            assert_eq!(Storage::get(&storage, idx), None);
        }
    }
}
