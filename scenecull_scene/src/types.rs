// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: object identifiers, flags, and per-object data.

use kurbo::Rect;
use scenecull_partition::Key;

/// Identifier for an object in a [`Scene`](crate::Scene).
///
/// A small, copyable handle made of a slot index and a generation counter.
/// Removing an object frees its slot; a later insert that reuses the slot bumps
/// the generation, so the old id never aliases the new object.
///
/// ### Newer
///
/// An id is newer than another when it has a higher generation, or the same
/// generation and a higher slot. [`Scene::hit_test`](crate::Scene::hit_test)
/// uses this order to break ties between objects with equal draw order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(pub(crate) Key);

impl ObjectId {
    /// Slot index of this id.
    pub const fn slot(self) -> usize {
        self.0.slot()
    }

    pub(crate) const fn is_newer_than(self, other: Self) -> bool {
        let (a, b) = (self.0, other.0);
        a.generation() > b.generation()
            || (a.generation() == b.generation() && a.slot() > b.slot())
    }
}

bitflags::bitflags! {
    /// Object flags controlling rendering and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// Object is visible (drawn by [`Scene::render`](crate::Scene::render)).
        const VISIBLE  = 0b0000_0001;
        /// Object is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Everything the scene knows about one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    /// Axis-aligned bounds in scene space. Stored normalized (`x0 <= x1`, `y0 <= y1`).
    pub bounds: Rect,
    /// Draw order. Higher is drawn later, on top.
    pub order: i32,
    /// Rendering and picking flags.
    pub flags: ObjectFlags,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            order: 0,
            flags: ObjectFlags::default(),
        }
    }
}

impl SceneObject {
    /// An object with default order and flags.
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            order: 0,
            flags: ObjectFlags::VISIBLE.union(ObjectFlags::PICKABLE),
        }
    }

    /// Set the draw order.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set the flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Filters applied by [`Scene::visible_in`](crate::Scene::visible_in),
/// [`Scene::nearest_to`](crate::Scene::nearest_to) and
/// [`Scene::hit_test`](crate::Scene::hit_test).
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider objects marked [`ObjectFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider objects marked [`ObjectFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Accept every object.
    pub const ALL: Self = Self {
        visible_only: false,
        pickable_only: false,
    };

    /// Accept visible and pickable objects, as pointer picking wants.
    pub const PICKING: Self = Self {
        visible_only: true,
        pickable_only: true,
    };

    pub(crate) fn accepts(self, flags: ObjectFlags) -> bool {
        (!self.visible_only || flags.contains(ObjectFlags::VISIBLE))
            && (!self.pickable_only || flags.contains(ObjectFlags::PICKABLE))
    }
}
