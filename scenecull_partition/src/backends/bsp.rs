// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary space partition over object centers, generic over scalar `T: Scalar`.
//!
//! Each split picks the axis whose item centers have the larger variance and cuts
//! at the mean center on that axis. Items that touch or cross the cut go to a
//! third "straddle" child instead of being duplicated.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::{Backend, Item, TreeStats};
use crate::config::PartitionConfig;
use crate::types::{Aabb2D, Axis, Scalar, Side};

/// BSP backend splitting along the highest-variance axis.
pub struct Bsp<T: Scalar> {
    root: Option<NodeIdx>,
    arena: Vec<Node<T>>,
}

enum Node<T: Scalar> {
    Leaf(Vec<Item<T>>),
    Branch {
        axis: Axis,
        pos: T,
        low: Option<NodeIdx>,
        high: Option<NodeIdx>,
        straddle: Option<NodeIdx>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

struct Split<T: Scalar> {
    axis: Axis,
    pos: T,
    low: Vec<Item<T>>,
    high: Vec<Item<T>>,
    straddle: Vec<Item<T>>,
}

impl<T: Scalar> Default for Bsp<T> {
    fn default() -> Self {
        Self {
            root: None,
            arena: Vec::new(),
        }
    }
}

impl<T: Scalar> Bsp<T> {
    /// Axis and position of the root split, if the root is a branch.
    pub fn root_split(&self) -> Option<(Axis, T)> {
        match self.arena.get(self.root?.get())? {
            Node::Branch { axis, pos, .. } => Some((*axis, *pos)),
            Node::Leaf(_) => None,
        }
    }

    fn push_leaf(&mut self, items: Vec<Item<T>>) -> Option<NodeIdx> {
        if items.is_empty() {
            return None;
        }
        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(Node::Leaf(items));
        Some(idx)
    }

    /// Choose a cut for `items`, or `None` when every item would land in one bucket.
    fn split(items: &[Item<T>]) -> Option<Split<T>> {
        let n = items.len();
        let centers: Vec<(T, T)> = items.iter().map(|(_, a)| a.center()).collect();

        let zero = T::acc_from_usize(0);
        let (sum_x, sum_y) = centers.iter().fold((zero, zero), |(sx, sy), &(cx, cy)| {
            (sx + T::widen(cx), sy + T::widen(cy))
        });
        let mean_x = T::mean(sum_x, n);
        let mean_y = T::mean(sum_y, n);

        let (wx, wy) = (T::widen(mean_x), T::widen(mean_y));
        let (var_x, var_y) = centers.iter().fold((zero, zero), |(vx, vy), &(cx, cy)| {
            let dx = T::widen(cx) - wx;
            let dy = T::widen(cy) - wy;
            (T::acc_add_sq(vx, dx), T::acc_add_sq(vy, dy))
        });

        let axis = if var_x > var_y { Axis::X } else { Axis::Y };
        let pos = axis.pick(mean_x, mean_y);

        let mut low = Vec::new();
        let mut high = Vec::new();
        let mut straddle = Vec::new();
        for item in items {
            match item.1.side(axis, pos) {
                Side::Low => low.push(*item),
                Side::High => high.push(*item),
                Side::Straddle => straddle.push(*item),
            }
        }

        if low.len() == n || high.len() == n || straddle.len() == n {
            return None;
        }
        Some(Split {
            axis,
            pos,
            low,
            high,
            straddle,
        })
    }
}

impl<T: Scalar> Backend<T> for Bsp<T> {
    fn build(&mut self, items: &[Item<T>], config: &PartitionConfig) {
        self.clear();
        self.root = self.push_leaf(items.to_vec());
        let Some(root) = self.root else {
            return;
        };

        let mut stack = vec![(root, 0_usize)];
        while let Some((idx, depth)) = stack.pop() {
            let Node::Leaf(bucket) = &self.arena[idx.get()] else {
                debug_assert!(false, "only leaves are queued for splitting");
                continue;
            };
            if !config.may_split(bucket.len(), depth) {
                continue;
            }
            let Some(split) = Self::split(bucket) else {
                continue;
            };
            log::trace!(
                "bsp split at depth {depth}: {:?} @ {:?} -> {}/{}/{}",
                split.axis,
                split.pos,
                split.low.len(),
                split.high.len(),
                split.straddle.len()
            );

            let low = self.push_leaf(split.low);
            let high = self.push_leaf(split.high);
            let straddle = self.push_leaf(split.straddle);
            for child in [low, high, straddle].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
            self.arena[idx.get()] = Node::Branch {
                axis: split.axis,
                pos: split.pos,
                low,
                high,
                straddle,
            };
        }
    }

    fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return Box::new(out.into_iter());
        };
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            match &self.arena[i.get()] {
                Node::Leaf(items) => {
                    for (s, b) in items {
                        if b.intersects(&rect) {
                            out.push(*s);
                        }
                    }
                }
                Node::Branch {
                    axis,
                    pos,
                    low,
                    high,
                    straddle,
                } => {
                    let side = rect.side(*axis, *pos);
                    if side.reaches(Side::Low) {
                        stack.extend(*low);
                    }
                    if side.reaches(Side::High) {
                        stack.extend(*high);
                    }
                    stack.extend(*straddle);
                }
            }
        }
        Box::new(out.into_iter())
    }

    fn leaves<'a>(&'a self) -> Box<dyn Iterator<Item = &'a [Item<T>]> + 'a> {
        Box::new(self.arena.iter().filter_map(|n| match n {
            Node::Leaf(items) => Some(items.as_slice()),
            Node::Branch { .. } => None,
        }))
    }

    fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let Some(root) = self.root else {
            return stats;
        };
        let mut stack = vec![(root, 0_usize)];
        while let Some((i, depth)) = stack.pop() {
            stats.nodes += 1;
            match &self.arena[i.get()] {
                Node::Leaf(items) => {
                    stats.leaves += 1;
                    stats.depth = stats.depth.max(depth);
                    stats.largest_leaf = stats.largest_leaf.max(items.len());
                }
                Node::Branch {
                    low,
                    high,
                    straddle,
                    ..
                } => {
                    for child in [*low, *high, *straddle].into_iter().flatten() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        stats
    }
}

impl<T: Scalar> Debug for Bsp<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bsp")
            .field("arena_nodes", &self.arena.len())
            .field("has_root", &self.root.is_some())
            .field("root_split", &self.root_split())
            .finish_non_exhaustive()
    }
}

/// Convenience type aliases for common scalar choices.
/// BSP with f32 coordinates and f64 metrics.
pub type BspF32 = Bsp<f32>;

/// BSP with f64 coordinates and f64 metrics.
pub type BspF64 = Bsp<f64>;

/// BSP with i64 coordinates and i128 metrics.
pub type BspI64 = Bsp<i64>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_partition_invariants, random_boxes};

    fn built(items: &[Item<f64>], config: PartitionConfig) -> Bsp<f64> {
        let mut b = Bsp::default();
        b.build(items, &config);
        b
    }

    #[test]
    fn empty_input_has_no_tree() {
        let b = built(&[], PartitionConfig::default());
        assert!(b.root.is_none());
        assert_eq!(b.stats(), TreeStats::default());
        assert_eq!(b.query_rect(Aabb2D::new(-1e9, -1e9, 1e9, 1e9)).count(), 0);
        assert_eq!(b.leaves().count(), 0);
    }

    #[test]
    fn splits_along_highest_variance_axis() {
        let b = built(
            &[
                (0, Aabb2D::new(0.0, 0.0, 1.0, 1.0)),
                (1, Aabb2D::new(10.0, 0.0, 11.0, 1.0)),
            ],
            PartitionConfig::default(),
        );
        assert_eq!(b.root_split(), Some((Axis::X, 5.5)));
        let stats = b.stats();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.leaves, 2);
        assert_eq!(stats.depth, 1);

        let left: Vec<_> = b.query_rect(Aabb2D::new(-5.0, -5.0, 5.0, 5.0)).collect();
        assert_eq!(left, vec![0]);
    }

    #[test]
    fn equal_variance_splits_along_y() {
        let b = built(
            &[
                (0, Aabb2D::new(-1.0, -1.0, 1.0, 1.0)),
                (1, Aabb2D::new(9.0, 9.0, 11.0, 11.0)),
            ],
            PartitionConfig::default(),
        );
        assert_eq!(b.root_split(), Some((Axis::Y, 5.0)));
    }

    #[test]
    fn all_straddling_items_stay_in_one_leaf() {
        // Nested boxes share a center, so every one of them crosses the mean.
        let items: Vec<_> = (0..5)
            .map(|i| {
                let r = 1.0 + i as f64;
                (i, Aabb2D::new(-r, -r, r, r))
            })
            .collect();
        let b = built(&items, PartitionConfig::default());
        assert_eq!(b.root_split(), None);
        assert_eq!(b.stats().leaves, 1);
        assert_eq!(b.stats().largest_leaf, 5);
    }

    #[test]
    fn identical_points_do_not_split() {
        let items: Vec<_> = (0..8).map(|i| (i, Aabb2D::new(3.0, 4.0, 3.0, 4.0))).collect();
        let b = built(&items, PartitionConfig::default());
        assert_eq!(b.stats().nodes, 1);
        assert_eq!(b.query_point(3.0, 4.0).count(), 8);
    }

    #[test]
    fn box_touching_the_cut_goes_to_straddle_child() {
        // Centers 0.5, 5.0 and 9.5 give a mean of 5.0 on x; the middle box ends on it.
        let items = [
            (0, Aabb2D::new(0.0, 0.0, 1.0, 1.0)),
            (1, Aabb2D::new(4.0, 0.0, 6.0, 1.0)),
            (2, Aabb2D::new(9.0, 0.0, 10.0, 1.0)),
        ];
        let b = built(&items, PartitionConfig::default());
        assert_eq!(b.root_split(), Some((Axis::X, 5.0)));
        let Some(Node::Branch { straddle, .. }) = b.root.map(|r| &b.arena[r.get()]) else {
            panic!("expected branch root");
        };
        let straddle = straddle.expect("straddle child");
        match &b.arena[straddle.get()] {
            Node::Leaf(items) => {
                let slots: Vec<_> = items.iter().map(|(s, _)| *s).collect();
                assert_eq!(slots, vec![1]);
            }
            Node::Branch { .. } => panic!("single item must stay a leaf"),
        }
        // A query that only touches the cut still sees the straddler.
        let hits: Vec<_> = b.query_rect(Aabb2D::new(5.0, 0.5, 5.0, 0.5)).collect();
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn leaf_capacity_stops_splitting() {
        let items: Vec<_> = (0..4)
            .map(|i| (i, Aabb2D::<f64>::from_xywh(i as f64 * 10.0, 0.0, 1.0, 1.0)))
            .collect();
        let b = built(&items, PartitionConfig::default().with_leaf_capacity(4));
        assert_eq!(b.stats().leaves, 1);
        let b = built(&items, PartitionConfig::default().with_leaf_capacity(2));
        assert!(b.stats().leaves >= 2);
        assert!(b.stats().largest_leaf <= 2);
    }

    #[test]
    fn max_depth_bounds_the_tree() {
        let items: Vec<_> = (0..64)
            .map(|i| (i, Aabb2D::<f64>::from_xywh(i as f64 * 10.0, 0.0, 1.0, 1.0)))
            .collect();
        let b = built(&items, PartitionConfig::default().with_max_depth(2));
        assert!(b.stats().depth <= 2);
        assert_partition_invariants(&b, &items);
    }

    #[test]
    fn rebuild_replaces_previous_tree() {
        let mut b: Bsp<f64> = Bsp::default();
        b.build(&random_boxes(200, 7), &PartitionConfig::default());
        let items = [(0, Aabb2D::new(0.0, 0.0, 1.0, 1.0))];
        b.build(&items, &PartitionConfig::default());
        assert_eq!(b.stats().nodes, 1);
        assert_partition_invariants(&b, &items);
    }

    #[test]
    fn random_f64_scenes_keep_invariants() {
        for seed in 1..6 {
            let items = random_boxes(300, seed);
            let b = built(&items, PartitionConfig::default());
            assert!(b.stats().leaves > 1, "random scenes should split");
            assert_partition_invariants(&b, &items);
        }
    }

    #[test]
    fn i64_and_f32_scenes_keep_invariants() {
        let items: Vec<_> = random_boxes(200, 11)
            .into_iter()
            .map(|(s, a)| {
                #[allow(clippy::cast_possible_truncation, reason = "test data is small")]
                let a = Aabb2D::new(
                    a.min_x as i64 - 500,
                    a.min_y as i64,
                    a.max_x as i64 - 500,
                    a.max_y as i64,
                );
                (s, a)
            })
            .collect();
        let mut b: BspI64 = Bsp::default();
        b.build(&items, &PartitionConfig::default());
        assert_partition_invariants(&b, &items);

        let items: Vec<_> = random_boxes(200, 12)
            .into_iter()
            .map(|(s, a)| {
                #[allow(clippy::cast_possible_truncation, reason = "test data is small")]
                let a = Aabb2D::new(
                    a.min_x as f32,
                    a.min_y as f32,
                    a.max_x as f32,
                    a.max_y as f32,
                );
                (s, a)
            })
            .collect();
        let mut b: BspF32 = Bsp::default();
        b.build(&items, &PartitionConfig::default());
        assert_partition_invariants(&b, &items);
    }

    #[test]
    fn extreme_i64_coordinates_split_without_overflow() {
        let items = [
            (0, Aabb2D::new(i64::MIN, 0, i64::MIN, 0)),
            (1, Aabb2D::new(i64::MAX, 0, i64::MAX, 0)),
            (2, Aabb2D::new(i64::MAX, 1, i64::MAX, 1)),
        ];
        let mut b: BspI64 = Bsp::default();
        b.build(&items, &PartitionConfig::default());
        assert_eq!(b.root_split().map(|(axis, _)| axis), Some(Axis::X));
        assert_eq!(b.stats().largest_leaf, 1);
        assert_partition_invariants(&b, &items);
    }
}
