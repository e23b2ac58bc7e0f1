// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for backend tests.

use alloc::vec::Vec;

use crate::backend::{Backend, Item};
use crate::types::{Aabb2D, Scalar, max_t, min_t};

/// Xorshift generator; deterministic across platforms.
pub(crate) struct Rng(u64);

impl Rng {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// `count` boxes scattered over a 1000×1000 area, some of them large.
pub(crate) fn random_boxes(count: usize, seed: u64) -> Vec<Item<f64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|slot| {
            let x = (rng.next_u64() % 1000) as f64;
            let y = (rng.next_u64() % 1000) as f64;
            let big = rng.next_u64() % 10 == 0;
            let scale = if big { 300 } else { 30 };
            let w = (rng.next_u64() % scale) as f64;
            let h = (rng.next_u64() % scale) as f64;
            (slot, Aabb2D::<f64>::from_xywh(x, y, w, h))
        })
        .collect()
}

fn sorted(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v
}

fn brute_force<T: Scalar>(items: &[Item<T>], rect: &Aabb2D<T>) -> Vec<usize> {
    sorted(
        items
            .iter()
            .filter(|(_, a)| a.intersects(rect))
            .map(|(s, _)| *s)
            .collect(),
    )
}

/// Check that every item sits in exactly one leaf with its original box, and that
/// rectangle and point queries match a linear scan.
pub(crate) fn assert_partition_invariants<T: Scalar, B: Backend<T>>(
    backend: &B,
    items: &[Item<T>],
) {
    let mut in_leaves: Vec<Item<T>> = backend.leaves().flatten().copied().collect();
    in_leaves.sort_by_key(|(s, _)| *s);
    let mut expected = items.to_vec();
    expected.sort_by_key(|(s, _)| *s);
    assert_eq!(in_leaves, expected, "each item must appear in exactly one leaf");

    let stats = backend.stats();
    assert_eq!(stats.leaves, backend.leaves().count(), "stats must count every leaf");

    let mut queries: Vec<Aabb2D<T>> = items.iter().map(|(_, a)| *a).collect();
    for pair in items.windows(2) {
        let (a, b) = (pair[0].1, pair[1].1);
        queries.push(Aabb2D::new(
            min_t(a.min_x, b.min_x),
            min_t(a.min_y, b.min_y),
            max_t(a.max_x, b.max_x),
            max_t(a.max_y, b.max_y),
        ));
    }
    for q in &queries {
        let got = sorted(backend.query_rect(*q).collect());
        assert_eq!(got, brute_force(items, q), "query {q:?} must match a linear scan");
    }

    for (_, a) in items.iter().take(50) {
        for (x, y) in [(a.min_x, a.min_y), (a.max_x, a.max_y), a.center()] {
            let got = sorted(backend.query_point(x, y).collect());
            let want = brute_force(items, &Aabb2D::new(x, y, x, y));
            assert_eq!(got, want, "point ({x:?}, {y:?}) must match a linear scan");
        }
    }
}
