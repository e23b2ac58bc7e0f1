// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenecull Partition: rebuild-on-demand 2D space partitions for view culling.
//!
//! A [`PartitionSet`] holds a flat list of boxed objects and a spatial tree over
//! them. The tree is never edited in place. Adding, moving or removing an object
//! marks it stale, and the next [`PartitionSet::rebuild`] (or
//! [`PartitionSet::select_in`], which rebuilds when needed) tears it down and
//! partitions the objects from scratch.
//!
//! - [`BspSet`] uses [`Bsp`]: split at the mean center along the axis where
//!   centers spread the most.
//! - [`QtStorage`] uses [`QuadTree`]: split into quadrants around the centroid,
//!   or in two along one axis when the quadrants do not separate anything.
//! - [`FlatSet`] uses [`FlatVec`]: no tree, for tiny sets and as a baseline.
//!
//! Boxes that straddle a split line are kept in a separate child rather than
//! duplicated, so after every rebuild each object sits in exactly one leaf, and a
//! selection returns exactly the objects whose bounds intersect the query.
//!
//! # Example
//!
//! ```rust
//! use scenecull_partition::{Aabb2D, BspSet, PartitionConfig};
//!
//! let mut set: BspSet<f64, &str> = BspSet::new();
//! set.add(Aabb2D::new(0.0, 0.0, 10.0, 10.0), "left");
//! set.add(Aabb2D::new(90.0, 0.0, 100.0, 10.0), "right");
//!
//! // The first selection builds the tree.
//! let visible = set.select_in(Aabb2D::new(80.0, 0.0, 120.0, 20.0)).unwrap();
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].1, "right");
//!
//! // Nearest object to a point, measured to box edges.
//! let (_, name) = set.nearest_to(40.0, 5.0).unwrap();
//! assert_eq!(name, "left");
//! ```
//!
//! Limits on the tree shape are set through [`PartitionConfig`]:
//!
//! ```rust
//! use scenecull_partition::{Aabb2D, PartitionConfig, QtStorage};
//!
//! let config = PartitionConfig::default().with_leaf_capacity(8).with_max_depth(16);
//! let boxes = (0..100_i64).map(|i| (Aabb2D::<i64>::from_xywh(i * 10, (i % 7) * 10, 5, 5), i));
//! let set = QtStorage::from_items(boxes, config).unwrap();
//! assert!(set.stats().largest_leaf <= 8);
//! assert_eq!(set.query_point(12, 12).count(), 1);
//! ```
//!
//! ### Float semantics
//!
//! NaN coordinates and inverted boxes are rejected by [`PartitionSet::rebuild`] with
//! [`PartitionError::InvalidBounds`]. Means and variances use widened accumulators
//! (`f32`→`f64`, `i64`→`i128`).

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod set;
pub mod types;

#[cfg(test)]
mod testing;

pub use backend::{Backend, Item, TreeStats};
pub use backends::bsp::{Bsp, BspF32, BspF64, BspI64};
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::{QuadTree, QuadTreeF32, QuadTreeF64, QuadTreeI64, RootKind};
pub use config::PartitionConfig;
pub use error::PartitionError;
pub use set::{BspSet, FlatSet, Key, PartitionSet, QtStorage};
pub use types::{Aabb2D, Axis, Scalar, Side};
