// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two scenes rendering into one view, plus picking and nearest lookup.
//!
//! Run:
//! - `RUST_LOG=scenecull_scene=debug cargo run -p scenecull_demos --example scene_render`

use kurbo::{Point, Rect};
use scenecull_scene::{BspScene, ObjectFlags, QuadScene, QueryFilter, SceneObject, View};

fn main() -> Result<(), scenecull_scene::PartitionError> {
    env_logger::init();

    // Static terrain in a BSP scene, moving sprites in a quad-tree scene.
    let mut terrain = BspScene::new();
    for i in 0..50 {
        let x = f64::from(i) * 64.0;
        terrain.insert(SceneObject::new(Rect::new(x, 400.0, x + 64.0, 464.0)).with_order(-1));
    }
    let mut sprites = QuadScene::new();
    let hero =
        sprites.insert(SceneObject::new(Rect::new(100.0, 360.0, 132.0, 400.0)).with_order(10));
    let coin =
        sprites.insert(SceneObject::new(Rect::new(300.0, 340.0, 316.0, 356.0)).with_order(5));
    let _marker = sprites.insert(
        SceneObject::new(Rect::new(100.0, 360.0, 200.0, 420.0))
            .with_order(20)
            .with_flags(ObjectFlags::PICKABLE),
    );

    let mut view = View::new(Rect::new(0.0, 0.0, 640.0, 480.0));
    for frame in 0..3 {
        view.clear();
        terrain.render(&mut view)?;
        sprites.render(&mut view)?;
        println!(
            "frame {frame}: {} draws, first order {:?}, last order {:?}",
            view.len(),
            view.draw_list().first().map(|r| r.order),
            view.draw_list().last().map(|r| r.order),
        );

        // Scroll right and move the hero along; only the sprite scene goes stale.
        if let Some(mut h) = sprites.get(hero) {
            h.bounds = h.bounds + kurbo::Vec2::new(200.0, 0.0);
            sprites.set_bounds(hero, h.bounds);
        }
        let r = view.rect();
        view.set_rect(r + kurbo::Vec2::new(200.0, 0.0));
    }

    let p = Point::new(110.0, 370.0);
    println!("picked at {p:?}: {:?}", sprites.hit_test(p, QueryFilter::PICKING)?);
    println!("under {p:?} ignoring flags: {:?}", sprites.hit_test(p, QueryFilter::ALL)?);
    println!(
        "nearest sprite to origin: {:?} (coin is {coin:?})",
        sprites.nearest_to(Point::ORIGIN, QueryFilter::PICKING)
    );
    println!("terrain: {terrain:?}");
    Ok(())
}
