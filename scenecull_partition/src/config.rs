// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs shared by the tree backends.

use crate::error::PartitionError;

/// Limits applied while a tree is rebuilt.
///
/// The defaults split until no useful split remains, which is what a
/// rebuild-per-frame culling set usually wants for small to medium scenes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Buckets with this many objects or fewer are kept as leaves.
    pub leaf_capacity: usize,
    /// Depth (root = 0) at which splitting stops.
    pub max_depth: usize,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            leaf_capacity: 1,
            max_depth: 64,
        }
    }
}

impl PartitionConfig {
    /// Return a copy with a different leaf capacity.
    #[must_use]
    pub const fn with_leaf_capacity(mut self, leaf_capacity: usize) -> Self {
        self.leaf_capacity = leaf_capacity;
        self
    }

    /// Return a copy with a different depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that the limits allow at least a root leaf.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.leaf_capacity == 0 {
            return Err(PartitionError::ZeroLeafCapacity);
        }
        if self.max_depth == 0 {
            return Err(PartitionError::ZeroMaxDepth);
        }
        Ok(())
    }

    /// Whether a bucket of `len` objects at `depth` may be split further.
    #[inline]
    pub(crate) fn may_split(&self, len: usize, depth: usize) -> bool {
        len > self.leaf_capacity && depth < self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(PartitionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let c = PartitionConfig::default().with_leaf_capacity(0);
        assert_eq!(c.validate(), Err(PartitionError::ZeroLeafCapacity));
        let c = PartitionConfig::default().with_max_depth(0);
        assert_eq!(c.validate(), Err(PartitionError::ZeroMaxDepth));
    }

    #[test]
    fn split_limits() {
        let c = PartitionConfig::default().with_leaf_capacity(4).with_max_depth(2);
        assert!(!c.may_split(4, 0));
        assert!(c.may_split(5, 1));
        assert!(!c.may_split(5, 2));
    }
}
