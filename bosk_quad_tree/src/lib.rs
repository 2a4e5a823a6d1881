// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bosk Quad Tree: a Kurbo-native quad tree index over axis-aligned shapes.
//!
//! Bosk Quad Tree is a reusable building block for collision broad-phases,
//! picking, and visibility sets over dynamic 2D content.
//!
//! - Acquire shapes (axis-aligned bounding rects) and get back stable,
//!   generational [`ShapeId`]s; move and release them at any time.
//! - Query by rectangle or by center and radius.
//! - The index stays consistent across changes without a full rebuild on
//!   every mutation.
//!
//! The tree partitions the indexed region into quarters: a leaf splits once
//! it holds more than [`MAX_SHAPES`] shapes, down to at most [`MAX_LEVELS`]
//! levels. A shape that straddles a quarter boundary stays at the interior
//! quad, so every shape occupies exactly one quad and query results never
//! need deduplication.
//!
//! Construction is lazy. Acquiring a shape outside the indexed region grows
//! the region and discards the tree; the next query rebuilds it from the
//! pending shape list. Within the region, acquires and releases update the
//! built tree incrementally.
//!
//! # Example
//!
//! ```rust
//! use bosk_quad_tree::QuadTree;
//! use kurbo::Rect;
//!
//! let mut tree = QuadTree::new();
//! let a = tree.acquire(Rect::new(0.0, 0.0, 1.0, 1.0));
//! let b = tree.acquire(Rect::new(5.0, 5.0, 6.0, 6.0));
//!
//! // Only `a` is near the origin.
//! assert_eq!(tree.find(Rect::new(0.0, 0.0, 2.0, 2.0)), [a]);
//!
//! // The overall bounds cover everything acquired so far.
//! let everything = tree.find(tree.bounds());
//! assert_eq!(everything.len(), 2);
//! assert!(everything.contains(&b));
//!
//! tree.release(a);
//! assert!(tree.find(Rect::new(0.0, 0.0, 2.0, 2.0)).is_empty());
//! ```
//!
//! ## Radius queries are approximate
//!
//! [`QuadTree::find_around`] filters rectangle-query candidates by the
//! distance from the query center to each shape's nearest *corner*, not to
//! the nearest point of its boundary. A shape whose nearest point lies on an
//! edge can be missed even though a true circle test would accept it. This
//! matches the behavior rectangle callers already depend on; see
//! [`geom::intersects_circle`].
//!
//! ## Single-writer
//!
//! The index carries no internal synchronization, and even queries mutate
//! cached state (the lazy build), which is why [`QuadTree::find`] takes
//! `&mut self`. Wrap the index in a lock if it must be shared across
//! threads.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geom;
mod index;
mod shape;
mod tree;

pub use index::QuadTree;
pub use shape::{Shape, ShapeId};
pub use tree::{MAX_LEVELS, MAX_SHAPES};
