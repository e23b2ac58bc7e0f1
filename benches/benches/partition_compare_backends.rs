// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use scenecull_partition::{
    Aabb2D, Backend, Bsp, FlatVec, PartitionConfig, PartitionSet, QuadTree, Scalar,
};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn gen_grid_rects_i64(n: usize, cell: i64) -> Vec<Aabb2D<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as i64 * cell;
            let y0 = y as i64 * cell;
            out.push(Aabb2D::<i64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, max_side: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * extent;
        let y0 = rng.next_f64() * extent;
        let w = 1.0 + rng.next_f64() * max_side;
        let h = 1.0 + rng.next_f64() * max_side;
        out.push(Aabb2D::<f64>::from_xywh(x0, y0, w, h));
    }
    out
}

/// Horizontal strips spanning the whole width, the worst case for straddling.
fn gen_banded_rects(
    n_bands: usize,
    per_band: usize,
    band_height: f64,
    width: f64,
) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n_bands * per_band);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    for b in 0..n_bands {
        let y0 = b as f64 * band_height * 2.0;
        for _ in 0..per_band {
            let x0 = rng.next_f64() * width * 0.1;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, width, band_height));
        }
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb2D::<f64>::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn filled<T: Scalar, B: Backend<T> + Default>(
    rects: &[Aabb2D<T>],
    config: PartitionConfig,
) -> PartitionSet<T, u32, B> {
    let mut set = PartitionSet::<T, u32, B>::from_backend(B::default(), config);
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = set.add(r, i as u32);
    }
    set
}

fn bench_rebuild_select<B: Backend<f64> + Default>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(name);
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("rebuild_select_n{n}"), |b| {
            b.iter_batched(
                || filled::<f64, B>(&rects, PartitionConfig::default()),
                |mut set| {
                    let hits = set
                        .select_in(Aabb2D::<f64>::from_xywh(100.0, 100.0, 400.0, 400.0))
                        .map(<[_]>::len)
                        .unwrap_or(0);
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    for (label, rects) in [
        ("random", gen_random_rects(4096, 2000.0, 40.0)),
        ("banded", gen_banded_rects(64, 64, 10.0, 2000.0)),
        ("clustered", gen_clustered_rects(32, 128, 200.0)),
    ] {
        group.bench_function(format!("rebuild_select_{label}"), |b| {
            b.iter_batched(
                || filled::<f64, B>(&rects, PartitionConfig::default()),
                |mut set| {
                    let hits = set
                        .select_in(Aabb2D::<f64>::from_xywh(800.0, 800.0, 400.0, 400.0))
                        .map(<[_]>::len)
                        .unwrap_or(0);
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_flatvec(c: &mut Criterion) {
    bench_rebuild_select::<FlatVec<f64>>(c, "flatvec");
}

fn bench_bsp(c: &mut Criterion) {
    bench_rebuild_select::<Bsp<f64>>(c, "bsp_f64");
}

fn bench_quadtree(c: &mut Criterion) {
    bench_rebuild_select::<QuadTree<f64>>(c, "quadtree_f64");
}

fn bench_leaf_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("bsp_leaf_capacity");
    let rects = gen_random_rects(4096, 2000.0, 40.0);
    for &cap in &[1usize, 4, 16, 64] {
        let config = PartitionConfig::default().with_leaf_capacity(cap);
        group.bench_function(format!("rebuild_cap{cap}"), |b| {
            b.iter_batched(
                || filled::<f64, Bsp<f64>>(&rects, config),
                |mut set| {
                    let _ = set.rebuild();
                    black_box(set.stats());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query_heavy(c: &mut Criterion) {
    let rects = gen_grid_rects_i64(128, 8);
    let queries: Vec<Aabb2D<i64>> = (0..256)
        .map(|q| {
            let x = (q % 64) * 8;
            let y = (q / 64) * 8;
            Aabb2D::<i64>::from_xywh(x, y, 64, 64)
        })
        .collect();
    let mut group = c.benchmark_group("query_heavy_i64");
    group.bench_function("bsp", |b| {
        let mut set = filled::<i64, Bsp<i64>>(&rects, PartitionConfig::default());
        let _ = set.rebuild();
        b.iter(|| {
            let total: usize = queries.iter().map(|q| set.query_rect(*q).count()).sum();
            black_box(total);
        })
    });
    group.bench_function("quadtree", |b| {
        let mut set = filled::<i64, QuadTree<i64>>(&rects, PartitionConfig::default());
        let _ = set.rebuild();
        b.iter(|| {
            let total: usize = queries.iter().map(|q| set.query_rect(*q).count()).sum();
            black_box(total);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_flatvec,
    bench_bsp,
    bench_quadtree,
    bench_leaf_capacity,
    bench_query_heavy
);
criterion_main!(benches);
