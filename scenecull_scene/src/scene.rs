// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `Scene` container and its partition synchronization.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};
use scenecull_partition::{
    Aabb2D, Backend, BspF64, FlatVec, PartitionConfig, PartitionError, PartitionSet,
    QuadTreeF64, TreeStats,
};

use crate::types::{ObjectFlags, ObjectId, QueryFilter, SceneObject};
use crate::view::{DrawRequest, View};

/// Per-object data carried through the partition as payload.
#[derive(Clone, Copy, Debug)]
struct Attrs {
    order: i32,
    flags: ObjectFlags,
}

/// A flat scene of boxed objects culled through a space partition.
///
/// Edits only mark the partition stale. [`render`](Self::render),
/// [`visible_in`](Self::visible_in) and [`hit_test`](Self::hit_test) rebuild it
/// before querying, so results always reflect the current objects.
pub struct Scene<B: Backend<f64> = BspF64> {
    set: PartitionSet<f64, Attrs, B>,
}

/// Scene partitioned by a binary space partition tree.
pub type BspScene = Scene<BspF64>;
/// Scene partitioned by the quad-tree hybrid.
pub type QuadScene = Scene<QuadTreeF64>;
/// Scene without partitioning; every query is a linear scan.
pub type FlatScene = Scene<FlatVec<f64>>;

impl<B: Backend<f64>> Debug for Scene<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.set.len())
            .field("stale", &self.set.is_stale())
            .field("tree", &self.set.stats())
            .finish_non_exhaustive()
    }
}

impl<B: Backend<f64> + Default> Default for Scene<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend<f64> + Default> Scene<B> {
    /// Create an empty scene with the default [`PartitionConfig`].
    pub fn new() -> Self {
        Self {
            set: PartitionSet::new(),
        }
    }

    /// Create an empty scene with explicit partition limits.
    pub fn with_config(config: PartitionConfig) -> Result<Self, PartitionError> {
        Ok(Self {
            set: PartitionSet::with_config(config)?,
        })
    }
}

impl<B: Backend<f64>> Scene<B> {
    /// Add an object and return its id.
    pub fn insert(&mut self, object: SceneObject) -> ObjectId {
        let attrs = Attrs {
            order: object.order,
            flags: object.flags,
        };
        ObjectId(self.set.add(rect_to_aabb(object.bounds), attrs))
    }

    /// Remove an object, returning what it was. Stale ids return `None`.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let object = self.get(id)?;
        self.set.remove(id.0);
        Some(object)
    }

    /// Move or resize an object.
    pub fn set_bounds(&mut self, id: ObjectId, bounds: Rect) {
        self.set.update(id.0, rect_to_aabb(bounds));
    }

    /// Change an object's draw order. The partition is not affected.
    pub fn set_order(&mut self, id: ObjectId, order: i32) {
        if let Some((_, attrs)) = self.set.get(id.0) {
            self.set.set_payload(id.0, Attrs { order, ..attrs });
        }
    }

    /// Change an object's flags. The partition is not affected.
    pub fn set_flags(&mut self, id: ObjectId, flags: ObjectFlags) {
        if let Some((_, attrs)) = self.set.get(id.0) {
            self.set.set_payload(id.0, Attrs { flags, ..attrs });
        }
    }

    /// The object behind `id`, if it is alive.
    pub fn get(&self, id: ObjectId) -> Option<SceneObject> {
        let (aabb, attrs) = self.set.get(id.0)?;
        Some(SceneObject {
            bounds: aabb_to_rect(aabb),
            order: attrs.order,
            flags: attrs.flags,
        })
    }

    /// Whether `id` still refers to a live object.
    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.set.contains(id.0)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// True if the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Iterate over live object ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.set.iter().map(|(k, _)| ObjectId(k))
    }

    /// True if objects moved, appeared or vanished since the last rebuild.
    pub fn is_stale(&self) -> bool {
        self.set.is_stale()
    }

    /// Shape of the current partition.
    pub fn stats(&self) -> TreeStats {
        self.set.stats()
    }

    /// Rebuild the partition from the current objects.
    pub fn rebuild(&mut self) -> Result<(), PartitionError> {
        self.set.rebuild()
    }

    /// Ids of objects whose bounds intersect `rect` and pass `filter`.
    ///
    /// The order follows the partition traversal.
    pub fn visible_in(
        &mut self,
        rect: Rect,
        filter: QueryFilter,
    ) -> Result<Vec<ObjectId>, PartitionError> {
        let selected = self.set.select_in(rect_to_aabb(rect))?;
        Ok(selected
            .iter()
            .filter(|(_, attrs)| filter.accepts(attrs.flags))
            .map(|(k, _)| ObjectId(*k))
            .collect())
    }

    /// Cull the scene to `view` and queue a draw request per visible object.
    ///
    /// Requests are appended to whatever the view already holds. Objects with
    /// equal order are queued by slot. Returns the number of requests added.
    pub fn render(&mut self, view: &mut View) -> Result<usize, PartitionError> {
        let selected = self.set.select_in(rect_to_aabb(view.rect()))?;
        let mut batch: Vec<DrawRequest> = selected
            .iter()
            .filter(|(_, attrs)| attrs.flags.contains(ObjectFlags::VISIBLE))
            .map(|(k, attrs)| DrawRequest {
                id: ObjectId(*k),
                order: attrs.order,
            })
            .collect();
        batch.sort_unstable_by_key(|r| (r.order, r.id.slot()));
        let count = batch.len();
        view.extend(batch);
        log::debug!(
            "rendered {count} of {} objects into {:?}",
            self.set.len(),
            view.rect()
        );
        Ok(count)
    }

    /// The object passing `filter` whose bounds are closest to `point`.
    ///
    /// Objects containing the point are at distance zero; ties go to the lowest slot.
    pub fn nearest_to(&self, point: Point, filter: QueryFilter) -> Option<ObjectId> {
        self.set
            .nearest_to_where(point.x, point.y, |attrs| filter.accepts(attrs.flags))
            .map(|(k, _)| ObjectId(k))
    }

    /// The topmost object passing `filter` whose bounds contain `point`.
    ///
    /// Highest order wins; among equal orders the newer id wins.
    pub fn hit_test(
        &mut self,
        point: Point,
        filter: QueryFilter,
    ) -> Result<Option<ObjectId>, PartitionError> {
        if self.set.is_stale() {
            self.set.rebuild()?;
        }
        let mut best: Option<(ObjectId, i32)> = None;
        for (k, attrs) in self.set.query_point(point.x, point.y) {
            if !filter.accepts(attrs.flags) {
                continue;
            }
            let id = ObjectId(k);
            match best {
                None => best = Some((id, attrs.order)),
                Some((best_id, best_order)) => {
                    if attrs.order > best_order
                        || (attrs.order == best_order && id.is_newer_than(best_id))
                    {
                        best = Some((id, attrs.order));
                    }
                }
            }
        }
        Ok(best.map(|(id, _)| id))
    }

    /// Drop every object.
    pub fn clear(&mut self) {
        self.set.clear();
    }
}

/// Normalize like [`Rect::abs`], but let NaN through so rebuild can reject it.
fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    let (min_x, max_x) = if r.x1 < r.x0 { (r.x1, r.x0) } else { (r.x0, r.x1) };
    let (min_y, max_y) = if r.y1 < r.y0 { (r.y1, r.y0) } else { (r.y0, r.y1) };
    Aabb2D::new(min_x, min_y, max_x, max_y)
}

fn aabb_to_rect(a: Aabb2D<f64>) -> Rect {
    Rect::new(a.min_x, a.min_y, a.max_x, a.max_y)
}
