// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad-tree/binary-tree hybrid around item centroids, generic over scalar `T: Scalar`.
//!
//! Every split is centred on the mean of the item centers. Items are sorted into
//! nine groups: the four quadrants, four groups that straddle exactly one axis,
//! and one group that straddles both.
//!
//! - If at least two quadrants are populated the node becomes a quad branch and
//!   everything that straddles either axis goes to its straddle child.
//! - Otherwise, if one axis separates the items into a non-empty low and high half,
//!   the node becomes a binary branch along that axis. When both axes qualify the
//!   one leaving fewer straddlers wins (x on ties).
//! - Otherwise the node stays a leaf.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::{Backend, Item, TreeStats};
use crate::config::PartitionConfig;
use crate::types::{Aabb2D, Axis, Scalar, Side};

/// Hybrid quad-tree backend.
pub struct QuadTree<T: Scalar> {
    root: Option<NodeIdx>,
    arena: Vec<Node<T>>,
}

/// Quadrant slots, indexed by `2 * x_half + y_half` with 0 = low and 1 = high.
const HALVES: [(Side, Side); 4] = [
    (Side::Low, Side::Low),
    (Side::Low, Side::High),
    (Side::High, Side::Low),
    (Side::High, Side::High),
];

enum Node<T: Scalar> {
    Leaf(Vec<Item<T>>),
    Quad {
        x: T,
        y: T,
        quads: [Option<NodeIdx>; 4],
        straddle: Option<NodeIdx>,
    },
    Binary {
        axis: Axis,
        pos: T,
        low: Option<NodeIdx>,
        high: Option<NodeIdx>,
        straddle: Option<NodeIdx>,
    },
}

/// Kind of the node at the root, for inspection and debugging.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RootKind<T> {
    /// Single leaf holding every item.
    Leaf,
    /// Four-way split around `(x, y)`.
    Quad {
        /// Split position on x.
        x: T,
        /// Split position on y.
        y: T,
    },
    /// Two-way split along one axis.
    Binary {
        /// Splitting axis.
        axis: Axis,
        /// Split position on that axis.
        pos: T,
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

enum Split<T: Scalar> {
    Quad {
        x: T,
        y: T,
        quads: [Vec<Item<T>>; 4],
        straddle: Vec<Item<T>>,
    },
    Binary {
        axis: Axis,
        pos: T,
        low: Vec<Item<T>>,
        high: Vec<Item<T>>,
        straddle: Vec<Item<T>>,
    },
}

impl<T: Scalar> Default for QuadTree<T> {
    fn default() -> Self {
        Self {
            root: None,
            arena: Vec::new(),
        }
    }
}

fn quadrant(x: Side, y: Side) -> Option<usize> {
    HALVES.iter().position(|&h| h == (x, y))
}

impl<T: Scalar> QuadTree<T> {
    /// Shape of the root node; `None` for an empty tree.
    pub fn root_kind(&self) -> Option<RootKind<T>> {
        Some(match self.arena.get(self.root?.get())? {
            Node::Leaf(_) => RootKind::Leaf,
            Node::Quad { x, y, .. } => RootKind::Quad { x: *x, y: *y },
            Node::Binary { axis, pos, .. } => RootKind::Binary {
                axis: *axis,
                pos: *pos,
            },
        })
    }

    fn push_leaf(&mut self, items: Vec<Item<T>>) -> Option<NodeIdx> {
        if items.is_empty() {
            return None;
        }
        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(Node::Leaf(items));
        Some(idx)
    }

    fn split(items: &[Item<T>]) -> Option<Split<T>> {
        let n = items.len();
        let zero = T::acc_from_usize(0);
        let (sum_x, sum_y) = items.iter().fold((zero, zero), |(sx, sy), (_, a)| {
            let (cx, cy) = a.center();
            (sx + T::widen(cx), sy + T::widen(cy))
        });
        let x = T::mean(sum_x, n);
        let y = T::mean(sum_y, n);

        let sides: Vec<(Side, Side)> = items
            .iter()
            .map(|(_, a)| (a.side(Axis::X, x), a.side(Axis::Y, y)))
            .collect();

        let mut quad_counts = [0_usize; 4];
        for &(sx, sy) in &sides {
            if let Some(q) = quadrant(sx, sy) {
                quad_counts[q] += 1;
            }
        }

        if quad_counts.iter().filter(|&&c| c > 0).count() >= 2 {
            let mut quads: [Vec<Item<T>>; 4] = core::array::from_fn(|_| Vec::new());
            let mut straddle = Vec::new();
            for (item, &(sx, sy)) in items.iter().zip(&sides) {
                match quadrant(sx, sy) {
                    Some(q) => quads[q].push(*item),
                    None => straddle.push(*item),
                }
            }
            return Some(Split::Quad {
                x,
                y,
                quads,
                straddle,
            });
        }

        // Low/high/straddle counts per axis.
        let mut counts = [[0_usize; 3]; 2];
        for &(sx, sy) in &sides {
            counts[0][side_slot(sx)] += 1;
            counts[1][side_slot(sy)] += 1;
        }
        let usable = |c: &[usize; 3]| c[0] > 0 && c[1] > 0;
        let axis = match (usable(&counts[0]), usable(&counts[1])) {
            (true, true) if counts[1][2] < counts[0][2] => Axis::Y,
            (true, _) => Axis::X,
            (false, true) => Axis::Y,
            (false, false) => return None,
        };
        let pos = axis.pick(x, y);

        let mut low = Vec::new();
        let mut high = Vec::new();
        let mut straddle = Vec::new();
        for (item, &(sx, sy)) in items.iter().zip(&sides) {
            match axis.pick(sx, sy) {
                Side::Low => low.push(*item),
                Side::High => high.push(*item),
                Side::Straddle => straddle.push(*item),
            }
        }
        Some(Split::Binary {
            axis,
            pos,
            low,
            high,
            straddle,
        })
    }

    fn children(node: &Node<T>) -> impl Iterator<Item = NodeIdx> {
        let slots: [Option<NodeIdx>; 5] = match node {
            Node::Leaf(_) => [None; 5],
            Node::Quad {
                quads, straddle, ..
            } => [quads[0], quads[1], quads[2], quads[3], *straddle],
            Node::Binary {
                low,
                high,
                straddle,
                ..
            } => [*low, *high, *straddle, None, None],
        };
        slots.into_iter().flatten()
    }
}

fn side_slot(s: Side) -> usize {
    match s {
        Side::Low => 0,
        Side::High => 1,
        Side::Straddle => 2,
    }
}

impl<T: Scalar> Backend<T> for QuadTree<T> {
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

            let node = match split {
                Split::Quad {
                    x,
                    y,
                    quads,
                    straddle,
                } => {
                    log::trace!("quad split at depth {depth} around ({x:?}, {y:?})");
                    let quads = quads.map(|q| self.push_leaf(q));
                    Node::Quad {
                        x,
                        y,
                        quads,
                        straddle: self.push_leaf(straddle),
                    }
                }
                Split::Binary {
                    axis,
                    pos,
                    low,
                    high,
                    straddle,
                } => {
                    log::trace!("binary split at depth {depth}: {axis:?} @ {pos:?}");
                    Node::Binary {
                        axis,
                        pos,
                        low: self.push_leaf(low),
                        high: self.push_leaf(high),
                        straddle: self.push_leaf(straddle),
                    }
                }
            };
            stack.extend(Self::children(&node).map(|c| (c, depth + 1)));
            self.arena[idx.get()] = node;
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
                Node::Quad {
                    x,
                    y,
                    quads,
                    straddle,
                } => {
                    let qx = rect.side(Axis::X, *x);
                    let qy = rect.side(Axis::Y, *y);
                    for (child, (hx, hy)) in quads.iter().zip(HALVES) {
                        if qx.reaches(hx) && qy.reaches(hy) {
                            stack.extend(*child);
                        }
                    }
                    stack.extend(*straddle);
                }
                Node::Binary {
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
            _ => None,
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
            let node = &self.arena[i.get()];
            if let Node::Leaf(items) = node {
                stats.leaves += 1;
                stats.depth = stats.depth.max(depth);
                stats.largest_leaf = stats.largest_leaf.max(items.len());
            }
            stack.extend(Self::children(node).map(|c| (c, depth + 1)));
        }
        stats
    }
}

impl<T: Scalar> Debug for QuadTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("arena_nodes", &self.arena.len())
            .field("root", &self.root_kind())
            .finish_non_exhaustive()
    }
}

/// Quad-tree with f32 coordinates and f64 metrics.
pub type QuadTreeF32 = QuadTree<f32>;

/// Quad-tree with f64 coordinates and f64 metrics.
pub type QuadTreeF64 = QuadTree<f64>;

/// Quad-tree with i64 coordinates and i128 metrics.
pub type QuadTreeI64 = QuadTree<i64>;
