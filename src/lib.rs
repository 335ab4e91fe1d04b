//! Ordered map and set collections built on an unbalanced binary search tree.
//!
//! This crate provides [`BSTreeMap`] and [`BSTreeSet`]. Both are backed by a
//! plain binary search tree whose nodes carry parent links, which gives them
//! bidirectional [cursors](bstree_map::Cursor) that step to the in-order
//! successor or predecessor without keeping a stack.
//!
//! # Example
//!
//! ```
//! use bstree::BSTreeMap;
//!
//! let mut scores = BSTreeMap::new();
//! scores.insert("Carol", 92);
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//!
//! // Plain insert never overwrites.
//! let (_, inserted) = scores.insert("Bob", 0);
//! assert!(!inserted);
//! assert_eq!(scores.at(&"Bob"), Ok(&85));
//!
//! // Cursors walk both ways; `end()` sits between the maximum and the minimum.
//! let mut cursor = scores.end();
//! cursor.move_prev();
//! assert_eq!(cursor.key(), Some(&"Carol"));
//! cursor.move_next();
//! assert!(cursor.is_end());
//!
//! // Merging moves only keys the target does not have yet.
//! let mut late = BSTreeMap::from([("Alice", 1), ("Dave", 77)]);
//! scores.merge(&mut late);
//! assert_eq!(scores.len(), 4);
//! assert_eq!(late.keys().collect::<Vec<_>>(), [&"Alice"]);
//! ```
//!
//! # Implementation
//!
//! The tree is deliberately **not** self-balancing: its shape is fixed by the
//! insertion order, so operations cost O(depth), which is O(n) for sorted
//! input. Nodes live in an arena and refer to each other by handle, so a parent
//! link can never dangle, and every traversal (search, stepping, copying) is
//! iterative, so degenerate trees cannot overflow the call stack.
//!
//! - **`no_std` compatible** - Only requires `alloc`.
//! - **Stable positions** - Removing an entry relinks its neighbours instead of
//!   moving keys between nodes, so every other entry keeps its position.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: `IterMut`/`ValuesMut` need a little unsafe code to hand out disjoint `&mut V`s.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod bstree_map;
pub mod bstree_set;

pub use bstree_map::BSTreeMap;
pub use bstree_set::BSTreeSet;
pub use error::Error;
