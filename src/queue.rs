//! Singly-linked string queue over arena storage.
//!
//! Nodes live in storage and link to their successor by index. The queue
//! tracks head, tail, and a stored length, so size queries never traverse.
//! Reversal and sorting relink the existing nodes in place; neither ever
//! allocates or releases a node.
//!
//! # Storage Invariant
//!
//! The queue owns its storage, so every node reachable from `head` belongs
//! to this queue exclusively. Chains never share nodes and never cycle.
//!
//! # Example
//!
//! ```
//! use braid::StrQueue;
//!
//! let mut queue = StrQueue::new();
//!
//! queue.push_back("banana").unwrap();
//! queue.push_back("apple").unwrap();
//! queue.push_front("cherry").unwrap();
//!
//! let order: Vec<_> = queue.iter().collect();
//! assert_eq!(order, ["cherry", "banana", "apple"]);
//!
//! queue.sort();
//! let order: Vec<_> = queue.iter().collect();
//! assert_eq!(order, ["apple", "banana", "cherry"]);
//!
//! queue.reverse();
//! assert_eq!(queue.pop_front().as_deref(), Some("cherry"));
//! ```

use crate::{AllocError, Arena, Index, Storage};

/// A node in the chain: one owned text value and the index of its successor.
///
/// Users interact with `&str` through the queue's accessor methods; the node
/// structure is an implementation detail exposed only for storage bounds.
#[derive(Debug)]
pub struct Node<Idx: Index = u32> {
    value: Box<str>,
    next: Idx,
}

/// A singly-linked string queue over storage.
///
/// Supports insertion at either end, removal at the head, O(1) size query,
/// in-place reversal, and in-place stable merge sort. The chain is linked
/// through indices into the owned storage backend.
///
/// # Type Parameters
///
/// - `S`: Storage type (e.g., [`Arena<Node>`])
/// - `Idx`: Index type (default `u32`)
///
/// Use the [`StrQueue`] alias unless you need a different backend.
#[derive(Debug)]
pub struct Queue<S, Idx: Index = u32>
where
    S: Storage<Node<Idx>, Index = Idx>,
{
    storage: S,
    head: Idx,
    tail: Idx,
    len: usize,
}

/// String queue backed by the built-in [`Arena`].
pub type StrQueue = Queue<Arena<Node<u32>, u32>, u32>;

/// String queue backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabQueue = Queue<slab::Slab<Node<usize>>, usize>;

impl<S, Idx: Index> Queue<S, Idx>
where
    S: Storage<Node<Idx>, Index = Idx>,
{
    /// Creates an empty queue. Does not allocate.
    #[inline]
    pub fn new() -> Self
    where
        S: Default,
    {
        Self {
            storage: S::default(),
            head: Idx::NONE,
            tail: Idx::NONE,
            len: 0,
        }
    }

    /// Returns the number of elements in the queue.
    ///
    /// Reads the stored counter; never traverses the chain.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the front value, or `None` if the queue is empty.
    #[inline]
    pub fn front(&self) -> Option<&str> {
        self.storage.get(self.head).map(|node| &*node.value)
    }

    /// Returns the back value, or `None` if the queue is empty.
    #[inline]
    pub fn back(&self) -> Option<&str> {
        self.storage.get(self.tail).map(|node| &*node.value)
    }

    /// Inserts a copy of `value` at the head of the queue.
    ///
    /// The text is copied into storage sized exactly to its bytes. If the
    /// queue was empty, the new node becomes the tail as well.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if either the value copy or the node slot
    /// cannot be allocated. On failure the queue is unchanged; no partial
    /// node is ever linked in.
    pub fn push_front(&mut self, value: &str) -> Result<(), AllocError> {
        let node = Node {
            value: copy_value(value)?,
            next: self.head,
        };
        let idx = self.storage.try_insert(node)?;

        if self.tail.is_none() {
            self.tail = idx;
        }
        self.head = idx;
        self.len += 1;
        Ok(())
    }

    /// Inserts a copy of `value` at the tail of the queue.
    ///
    /// Same copy and failure contract as [`push_front`](Self::push_front).
    pub fn push_back(&mut self, value: &str) -> Result<(), AllocError> {
        let node = Node {
            value: copy_value(value)?,
            next: Idx::NONE,
        };
        let idx = self.storage.try_insert(node)?;

        if self.tail.is_some() {
            Self::node_mut(&mut self.storage, self.tail).next = idx;
        } else {
            self.head = idx;
        }
        self.tail = idx;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the front value.
    ///
    /// Returns `None` if the queue is empty. When the last element is
    /// removed, the tail is cleared as well.
    pub fn pop_front(&mut self) -> Option<Box<str>> {
        if self.head.is_none() {
            return None;
        }

        let node = self
            .storage
            .remove(self.head)
            .expect("queue head points at vacant slot");
        self.head = node.next;
        if self.head.is_none() {
            self.tail = Idx::NONE;
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Removes the front value, copying it into `out` as a C-style string.
    ///
    /// Copies at most `out.len() - 1` bytes and writes a NUL terminator
    /// after them. A value longer than the buffer is truncated silently;
    /// truncation is part of the contract, not an error.
    ///
    /// Returns `false` on an empty queue, leaving `out` untouched.
    ///
    /// `out` must have length at least 1 (caller contract).
    pub fn pop_front_into(&mut self, out: &mut [u8]) -> bool {
        debug_assert!(!out.is_empty(), "output buffer must hold the terminator");

        let Some(value) = self.pop_front() else {
            return false;
        };

        let n = value.len().min(out.len().saturating_sub(1));
        out[..n].copy_from_slice(&value.as_bytes()[..n]);
        out[n] = 0;
        true
    }

    /// Removes all elements, releasing every node and its value.
    pub fn clear(&mut self) {
        let mut idx = self.head;
        while idx.is_some() {
            let node = self
                .storage
                .remove(idx)
                .expect("queue link points at vacant slot");
            idx = node.next;
        }
        self.head = Idx::NONE;
        self.tail = Idx::NONE;
        self.len = 0;
    }

    /// Returns an iterator over the values, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, S, Idx> {
        Iter {
            storage: &self.storage,
            current: self.head,
        }
    }

    /// Reverses the chain in place.
    ///
    /// No effect on an empty or single-element queue. Walks the chain once,
    /// redirecting each node's `next` at its predecessor with three cursors
    /// advancing in lockstep. Does not allocate or release any node.
    /// O(n) time, O(1) extra space.
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }

        let mut prev = Idx::NONE;
        let mut current = self.head;
        while current.is_some() {
            let node = Self::node_mut(&mut self.storage, current);
            let next = node.next;
            node.next = prev;
            prev = current;
            current = next;
        }

        // Former head keeps next = NONE from the first relink above.
        self.tail = self.head;
        self.head = prev;
    }

    /// Sorts the values ascending in lexicographic byte order, in place.
    ///
    /// No effect on an empty or single-element queue. Stable: elements with
    /// equal values keep their relative order. Rearranges existing nodes
    /// only; neither nodes nor values are reallocated.
    ///
    /// Recursive merge sort on the chain: split at the midpoint with
    /// slow/fast cursors, sort each half, merge. O(n log n) time, O(log n)
    /// recursion depth, O(1) space per merge.
    pub fn sort(&mut self) {
        if self.len < 2 {
            return;
        }

        self.head = Self::sort_chain(&mut self.storage, self.head);

        // The recursion does not track the tail; recompute it by walking
        // to the end of the sorted chain.
        let mut idx = self.head;
        loop {
            let next = Self::node(&self.storage, idx).next;
            if next.is_none() {
                break;
            }
            idx = next;
        }
        self.tail = idx;
    }

    // ========================================================================
    // Chain algorithms (index relinking only, no alloc/free)
    // ========================================================================

    /// Sorts the chain starting at `head`, returning the new head.
    ///
    /// Base case: a chain of length 0 or 1 is returned unchanged.
    fn sort_chain(storage: &mut S, head: Idx) -> Idx {
        if head.is_none() || Self::node(storage, head).next.is_none() {
            return head;
        }

        let back = Self::split_chain(storage, head);
        let front = Self::sort_chain(storage, head);
        let back = Self::sort_chain(storage, back);
        Self::merge_chains(storage, front, back)
    }

    /// Splits the chain at its midpoint, returning the head of the back half.
    ///
    /// Slow/fast cursor walk: fast advances two steps per iteration, slow
    /// one. The front half keeps ceil(n/2) nodes and its new tail is severed
    /// to `NONE`. The chain must have length >= 2.
    fn split_chain(storage: &mut S, head: Idx) -> Idx {
        let mut slow = head;
        let mut fast = Self::node(storage, head).next;

        while fast.is_some() {
            fast = Self::node(storage, fast).next;
            if fast.is_some() {
                slow = Self::node(storage, slow).next;
                fast = Self::node(storage, fast).next;
            }
        }

        let slow = Self::node_mut(storage, slow);
        let back = slow.next;
        slow.next = Idx::NONE;
        back
    }

    /// Merges two individually sorted chains into one, returning its head.
    ///
    /// Repeatedly takes the lesser front node; on equal values the node from
    /// `a` goes first, which keeps the sort stable. Once either chain runs
    /// out, the remainder of the other is spliced on.
    fn merge_chains(storage: &mut S, mut a: Idx, mut b: Idx) -> Idx {
        if a.is_none() {
            return b;
        }
        if b.is_none() {
            return a;
        }

        let head = if Self::takes_first(storage, a, b) {
            let idx = a;
            a = Self::node(storage, a).next;
            idx
        } else {
            let idx = b;
            b = Self::node(storage, b).next;
            idx
        };

        let mut tail = head;
        while a.is_some() && b.is_some() {
            let idx = if Self::takes_first(storage, a, b) {
                let idx = a;
                a = Self::node(storage, a).next;
                idx
            } else {
                let idx = b;
                b = Self::node(storage, b).next;
                idx
            };
            Self::node_mut(storage, tail).next = idx;
            tail = idx;
        }

        let rest = if a.is_some() { a } else { b };
        Self::node_mut(storage, tail).next = rest;
        head
    }

    /// `true` if the front of `a` goes before the front of `b`.
    ///
    /// `<=` so that equal keys are taken from `a`, preserving stability.
    #[inline]
    fn takes_first(storage: &S, a: Idx, b: Idx) -> bool {
        Self::node(storage, a).value <= Self::node(storage, b).value
    }

    #[inline]
    fn node(storage: &S, idx: Idx) -> &Node<Idx> {
        storage.get(idx).expect("chain link points at vacant slot")
    }

    #[inline]
    fn node_mut(storage: &mut S, idx: Idx) -> &mut Node<Idx> {
        storage.get_mut(idx).expect("chain link points at vacant slot")
    }
}

impl<Idx: Index> Queue<Arena<Node<Idx>, Idx>, Idx> {
    /// Creates an empty queue with arena capacity for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the arena allocation fails.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            storage: Arena::try_with_capacity(capacity)?,
            head: Idx::NONE,
            tail: Idx::NONE,
            len: 0,
        })
    }
}

impl<S, Idx: Index> Default for Queue<S, Idx>
where
    S: Storage<Node<Idx>, Index = Idx> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `value` into an exactly-sized owned allocation.
fn copy_value(value: &str) -> Result<Box<str>, AllocError> {
    let mut copy = String::new();
    copy.try_reserve_exact(value.len())?;
    copy.push_str(value);
    Ok(copy.into_boxed_str())
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over queue values, front to back.
pub struct Iter<'a, S, Idx: Index>
where
    S: Storage<Node<Idx>, Index = Idx>,
{
    storage: &'a S,
    current: Idx,
}

impl<'a, S, Idx: Index + 'a> Iterator for Iter<'a, S, Idx>
where
    S: Storage<Node<Idx>, Index = Idx>,
{
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.storage.get(self.current)?;
        self.current = node.next;
        Some(&node.value)
    }
}
