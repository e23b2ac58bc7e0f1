// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic BSP set usage: add boxes, select a window, inspect the tree.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p scenecull_demos --example bsp_basics`

use scenecull_partition::{Aabb2D, BspSet, PartitionError};

fn main() -> Result<(), PartitionError> {
    env_logger::init();

    let mut set: BspSet<f64, &str> = BspSet::new();
    let tree = set.add(Aabb2D::<f64>::from_xywh(10.0, 10.0, 20.0, 40.0), "tree");
    let _rock = set.add(Aabb2D::<f64>::from_xywh(200.0, 30.0, 15.0, 10.0), "rock");
    let _bird = set.add(Aabb2D::<f64>::from_xywh(120.0, 300.0, 5.0, 5.0), "bird");
    let _road = set.add(Aabb2D::<f64>::from_xywh(0.0, 100.0, 400.0, 20.0), "road");

    // The first selection builds the tree.
    let window = Aabb2D::<f64>::from_xywh(0.0, 0.0, 150.0, 150.0);
    let names: Vec<_> = set.select_in(window)?.iter().map(|(_, n)| *n).collect();
    println!("in {window:?}: {names:?}");
    println!("stats: {:?}", set.stats());

    // Moving an object marks the tree stale; the next selection rebuilds it.
    set.update(tree, Aabb2D::<f64>::from_xywh(300.0, 300.0, 20.0, 40.0));
    println!("stale after move: {}", set.is_stale());
    let names: Vec<_> = set.select_in(window)?.iter().map(|(_, n)| *n).collect();
    println!("in {window:?} after move: {names:?}");

    if let Some((_, name)) = set.nearest_to(190.0, 200.0) {
        println!("nearest to (190, 200): {name}");
    }
    Ok(())
}
