// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Views: a culling rectangle plus the draw requests collected for it.

use alloc::vec::Vec;
use kurbo::Rect;

use crate::types::ObjectId;

/// One object to draw, as pushed by [`Scene::render`](crate::Scene::render).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRequest {
    /// The object to draw.
    pub id: ObjectId,
    /// Draw order copied from the object at render time.
    pub order: i32,
}

/// A viewport into a scene.
///
/// Several scenes may render into the same view; requests accumulate until
/// [`clear`](Self::clear) and stay sorted by order, earlier requests first on ties.
#[derive(Clone, Debug)]
pub struct View {
    rect: Rect,
    requests: Vec<DrawRequest>,
}

impl View {
    /// A view over `rect` with no requests.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: rect.abs(),
            requests: Vec::new(),
        }
    }

    /// The culling rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move or resize the view. Existing requests are kept.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect.abs();
    }

    /// Queue a draw request, keeping the list ordered.
    pub fn request(&mut self, id: ObjectId, order: i32) {
        let at = self.requests.partition_point(|r| r.order <= order);
        self.requests.insert(at, DrawRequest { id, order });
    }

    /// Append a batch and restore order. The sort is stable, so queued requests
    /// stay ahead of new ones with the same order.
    pub(crate) fn extend(&mut self, batch: impl IntoIterator<Item = DrawRequest>) {
        self.requests.extend(batch);
        self.requests.sort_by_key(|r| r.order);
    }

    /// Requests sorted by order, back to front.
    pub fn draw_list(&self) -> &[DrawRequest] {
        &self.requests
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Drop all requests, typically once per frame.
    pub fn clear(&mut self) {
        self.requests.clear();
    }
}
