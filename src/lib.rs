//! An ordered map on a binary search tree that is rebalanced on demand.
//!
//! This crate provides [`BstMap`], an ordered map whose API follows the standard library's
//! `BTreeMap` where it can, backed by a plain (unbalanced) binary search tree:
//!
//! - [`insert`](BstMap::insert) only ever adds a leaf, so its cost depends on the tree's shape
//! - [`balance`](BstMap::balance) rebuilds the tree from its sorted contents in one explicit
//!   pass, restoring logarithmic lookups after a degenerate load such as sorted input
//! - [`find`](BstMap::find) returns a [`Cursor`] that walks the map in key order through
//!   parent links, with the *end* cursor signalling a miss
//! - `map[&key]` auto-inserts a default value when used mutably, while
//!   [`try_get`](BstMap::try_get) fails with [`Error::KeyNotFound`] instead
//!
//! # Example
//!
//! ```
//! use bst_map::{BstMap, Error};
//!
//! let mut tree = BstMap::new();
//! for key in [50, 20, 10, 60, 160, 360] {
//!     tree.insert(key, key);
//! }
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, [10, 20, 50, 60, 160, 360]);
//!
//! // Ascending inserts produce a linked list...
//! tree.clear();
//! for key in 0..=10 {
//!     tree.insert(key, key);
//! }
//! assert_eq!(tree.height(), 11);
//! assert_eq!(tree.find(&5).value(), Some(&5));
//!
//! // ...which `balance` turns back into a shallow tree.
//! tree.balance();
//! assert_eq!(tree.height(), 4);
//!
//! assert_eq!(tree.find(&99), tree.cursor_end());
//! assert_eq!(tree.try_get(&99), Err(Error::KeyNotFound));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Configurable ordering** - Any [`Compare`] implementation, closures included
//! - **No recursion** - Insertion, copying and rebalancing run in loops, so skewed trees cannot
//!   overflow the stack
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index. Every node owns its children and
//! keeps a non-owning index of its parent, which is what lets cursors and iterators find the
//! in-order successor without a stack.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: `IterMut` needs a little unsafe code to hand out disjoint `&mut V`.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod raw;

pub mod bst_map;

pub use bst_map::{BstMap, Cursor, CursorMut};
pub use compare::{Compare, Natural};
pub use error::{Error, Result};
