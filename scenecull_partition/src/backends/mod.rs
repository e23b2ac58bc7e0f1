// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different partitioning strategies.
//!
//! - `flatvec`: one leaf, linear scans. Reference baseline.
//! - `bsp`: binary split at the mean center along the axis of highest center variance
//!   (aliases: `BspF32`, `BspF64`, `BspI64`).
//! - `quadtree`: four-way split around the centroid, falling back to a binary split
//!   when fewer than two quadrants are populated (aliases: `QuadTreeF32`, `QuadTreeF64`,
//!   `QuadTreeI64`).
//!
//! Straddling objects
//! ------------------
//! Neither tree clips or duplicates boxes. A box that touches or crosses a split line
//! is kept in that branch's straddle child, which every query through the branch
//! visits. Queries therefore never miss an intersecting box, and the exact test at
//! the leaves removes the rest.

pub mod bsp;
pub mod flatvec;
pub mod quadtree;

pub use bsp::{BspF32, BspF64, BspI64};
pub use quadtree::{QuadTreeF32, QuadTreeF64, QuadTreeI64};
