// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by partition sets.

use thiserror::Error;

/// Failure to configure or rebuild a partition.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// [`PartitionConfig::leaf_capacity`](crate::PartitionConfig::leaf_capacity) was zero.
    #[error("leaf capacity must be at least 1")]
    ZeroLeafCapacity,
    /// [`PartitionConfig::max_depth`](crate::PartitionConfig::max_depth) was zero.
    #[error("maximum tree depth must be at least 1")]
    ZeroMaxDepth,
    /// A box had a NaN coordinate or a minimum above its maximum.
    #[error("object in slot {slot} has invalid bounds")]
    InvalidBounds {
        /// Slot of the offending object.
        slot: usize,
    },
}
