// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial partitioning implementations.

use alloc::boxed::Box;

use crate::config::PartitionConfig;
use crate::types::{Aabb2D, Scalar};

/// A slot number paired with the box it was built from.
pub type Item<T> = (usize, Aabb2D<T>);

/// Shape summary of a built tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total nodes, branches and leaves.
    pub nodes: usize,
    /// Leaf buckets.
    pub leaves: usize,
    /// Deepest leaf (root = 0).
    pub depth: usize,
    /// Item count of the fullest leaf.
    pub largest_leaf: usize,
}

/// Spatial backend abstraction used by [`PartitionSet`](crate::PartitionSet).
///
/// Backends are rebuilt wholesale: there is no incremental insert or delete.
/// Every item passed to [`build`](Backend::build) must end up in exactly one leaf.
pub trait Backend<T: Scalar> {
    /// Replace any existing tree with one partitioning `items`.
    ///
    /// Item boxes are assumed valid (see [`Aabb2D::is_valid`]).
    fn build(&mut self, items: &[Item<T>], config: &PartitionConfig);

    /// Tear the tree down.
    fn clear(&mut self);

    /// Query slots whose AABB intersects the rectangle.
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Query slots whose AABB contains the point.
    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = usize> + 'a> {
        self.query_rect(Aabb2D::new(x, y, x, y))
    }

    /// Iterate the leaf buckets.
    fn leaves<'a>(&'a self) -> Box<dyn Iterator<Item = &'a [Item<T>]> + 'a>;

    /// Summarize the current tree.
    fn stats(&self) -> TreeStats;
}
