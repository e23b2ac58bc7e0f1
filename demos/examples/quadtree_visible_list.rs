// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-window example over a scrolling list of rows using the quad-tree storage.
//!
//! Run:
//! - `cargo run -p scenecull_demos --example quadtree_visible_list`

use scenecull_partition::{Aabb2D, PartitionConfig, PartitionError, QtStorage, RootKind};

const ROW_H: f64 = 20.0;
const WIDTH: f64 = 200.0;

fn main() -> Result<(), PartitionError> {
    env_logger::init();

    let rows = 1000_usize;
    let config = PartitionConfig::default().with_leaf_capacity(8);
    let mut list: QtStorage<f64, usize> = QtStorage::from_items(
        (0..rows).map(|i| {
            let y0 = i as f64 * ROW_H;
            (Aabb2D::new(0.0, y0, WIDTH, y0 + ROW_H), i)
        }),
        config,
    )?;

    // Rows all span the same width, so the root splits on Y only.
    match list.backend().root_kind() {
        Some(RootKind::Binary { axis, pos }) => println!("root: binary on {axis:?} at {pos}"),
        Some(RootKind::Quad { x, y }) => println!("root: quad at ({x}, {y})"),
        Some(RootKind::Leaf) | None => println!("root: leaf"),
    }
    println!("stats: {:?}", list.stats());

    // Simulate a few scroll positions by changing the viewport rectangle.
    for scroll in [0.0, 30.0, 200.0, 600.0] {
        let viewport = Aabb2D::new(0.0, scroll, WIDTH, scroll + 100.0);
        let mut indices: Vec<usize> = list.select_in(viewport)?.iter().map(|(_, i)| *i).collect();
        indices.sort_unstable();
        println!("scroll={scroll:.1} -> visible indices: {indices:?}");
    }
    Ok(())
}
