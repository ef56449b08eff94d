//! Arena-backed singly-linked string queue.
//!
//! A mutable FIFO/LIFO container for text values with head/tail insertion,
//! head removal, O(1) size query, in-place reversal, and in-place stable
//! merge sort. The key design decision: separate storage from structure.
//!
//! # Design Philosophy
//!
//! A pointer-based singly-linked list in Rust forces a choice between
//! `Option<Box<Node>>` chains (recursive destructors, awkward relinking
//! during sort) and raw pointers (unsafe everywhere). This crate inverts
//! the model:
//!
//! ```text
//! Arena (slab)  - owns the nodes, provides stable indices
//! Queue         - coordinates indices, threads `next` links through them
//! ```
//!
//! Benefits:
//! - **Safe relinking**: reversal and merge sort rewrite integer links;
//!   no two owners of a node ever coexist mid-algorithm
//! - **Flat destruction**: dropping the arena drops every node without
//!   recursing down the chain
//! - **Recoverable allocation failure**: arena growth goes through
//!   `try_reserve`, so out-of-memory surfaces as [`AllocError`] instead
//!   of aborting
//! - **Slot reuse**: removed slots are reused by later insertions
//!
//! # Quick Start
//!
//! ```
//! use braid::StrQueue;
//!
//! let mut queue = StrQueue::new();
//!
//! queue.push_back("banana")?;
//! queue.push_back("apple")?;
//! queue.push_front("cherry")?;
//! assert_eq!(queue.len(), 3);
//!
//! queue.sort();
//! assert_eq!(queue.pop_front().as_deref(), Some("apple"));
//!
//! queue.reverse();
//! assert_eq!(queue.pop_front().as_deref(), Some("cherry"));
//! # Ok::<(), braid::AllocError>(())
//! ```
//!
//! # Bounded removal
//!
//! [`StrQueue::pop_front_into`] copies the removed value into a caller
//! buffer as a C-style string, truncating silently when the value does not
//! fit. This mirrors the bounded-copy contract of C string queues:
//!
//! ```
//! use braid::StrQueue;
//!
//! let mut queue = StrQueue::new();
//! queue.push_back("hello world").unwrap();
//!
//! let mut buf = [0u8; 6];
//! assert!(queue.pop_front_into(&mut buf));
//! assert_eq!(&buf, b"hello\0");
//! ```
//!
//! # Storage Options
//!
//! | Storage | Growth | Insert failure | Use Case |
//! |---------|--------|----------------|----------|
//! | [`Arena`] | `try_reserve` | [`AllocError`] | Default choice |
//! | `slab::Slab` | May reallocate | Infallible | Existing slab pools |
//!
//! Enable the `slab` feature (default) for the `slab::Slab` backend and the
//! [`SlabQueue`] alias.
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

pub mod index;
pub mod queue;
pub mod storage;

pub use index::Index;
pub use queue::{Iter, Node, Queue, StrQueue};
pub use storage::{AllocError, Arena, Storage};

#[cfg(feature = "slab")]
pub use queue::SlabQueue;
