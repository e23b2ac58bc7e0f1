// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::{Backend, Item, TreeStats};
use crate::config::PartitionConfig;
use crate::types::{Aabb2D, Scalar};

/// Flat vector backend: the whole set is one leaf.
pub struct FlatVec<T: Scalar> {
    items: Vec<Item<T>>,
}

impl<T: Scalar> Default for FlatVec<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Scalar> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> Backend<T> for FlatVec<T> {
    fn build(&mut self, items: &[Item<T>], _config: &PartitionConfig) {
        self.items.clear();
        self.items.extend_from_slice(items);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.items
                .iter()
                .filter(move |(_, a)| a.intersects(&rect))
                .map(|(s, _)| *s),
        )
    }

    fn leaves<'a>(&'a self) -> Box<dyn Iterator<Item = &'a [Item<T>]> + 'a> {
        if self.items.is_empty() {
            Box::new(core::iter::empty())
        } else {
            Box::new(core::iter::once(self.items.as_slice()))
        }
    }

    fn stats(&self) -> TreeStats {
        if self.items.is_empty() {
            return TreeStats::default();
        }
        TreeStats {
            nodes: 1,
            leaves: 1,
            depth: 0,
            largest_leaf: self.items.len(),
        }
    }
}
