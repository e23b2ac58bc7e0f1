// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenecull Scene: Kurbo-native view culling over a rebuildable space partition.
//!
//! A [`Scene`] holds boxed objects with a draw order and visibility/picking flags.
//! Each frame, [`Scene::render`] culls the scene to a [`View`]'s rectangle and
//! queues one [`DrawRequest`] per visible object; [`View::draw_list`] hands them
//! back sorted by order. Several scenes may render into the same view.
//!
//! The spatial work is done by [`scenecull_partition`]. Pick the backend through
//! the scene's type parameter: [`BspScene`] (the default), [`QuadScene`] for the
//! quad-tree hybrid, or [`FlatScene`] for a plain linear scan.
//!
//! ## API overview
//!
//! - [`SceneObject`]: bounds, order and [`ObjectFlags`] of one object.
//! - [`ObjectId`]: generational handle of an object.
//! - [`QueryFilter`]: restricts queries to visible and/or pickable objects.
//!
//! Key operations:
//! - [`Scene::insert`] / [`Scene::remove`] / [`Scene::set_bounds`]
//! - [`Scene::render`] and [`Scene::visible_in`]
//! - [`Scene::hit_test`] and [`Scene::nearest_to`]
//!
//! Moving, adding or removing objects marks the partition stale; the next query
//! rebuilds it. Changing order or flags never does.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use scenecull_scene::{BspScene, ObjectFlags, QueryFilter, SceneObject, View};
//!
//! let mut scene = BspScene::new();
//! let floor = scene.insert(SceneObject::new(Rect::new(0.0, 0.0, 400.0, 400.0)));
//! let crate_ = scene.insert(SceneObject::new(Rect::new(50.0, 50.0, 80.0, 80.0)).with_order(1));
//! let _offscreen = scene.insert(SceneObject::new(Rect::new(900.0, 900.0, 950.0, 950.0)));
//! let _ghost = scene.insert(
//!     SceneObject::new(Rect::new(60.0, 60.0, 70.0, 70.0))
//!         .with_order(2)
//!         .with_flags(ObjectFlags::PICKABLE),
//! );
//!
//! let mut view = View::new(Rect::new(0.0, 0.0, 200.0, 200.0));
//! scene.render(&mut view).unwrap();
//! let ids: Vec<_> = view.draw_list().iter().map(|r| r.id).collect();
//! assert_eq!(ids, vec![floor, crate_]);
//!
//! let hit = scene.hit_test(Point::new(65.0, 65.0), QueryFilter::PICKING).unwrap();
//! assert_eq!(hit, Some(crate_));
//! ```

#![no_std]

extern crate alloc;

mod scene;
mod types;
mod view;

pub use scene::{BspScene, FlatScene, QuadScene, Scene};
pub use types::{ObjectFlags, ObjectId, QueryFilter, SceneObject};
pub use view::{DrawRequest, View};

pub use scenecull_partition::{PartitionConfig, PartitionError, TreeStats};
