// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use scenecull_partition::{Backend, BspF64, FlatVec, QuadTreeF64};
use scenecull_scene::{QueryFilter, Scene, SceneObject, View};

struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn populate<B: Backend<f64>>(scene: &mut Scene<B>, count: usize) {
    let mut rng = Rng(0x5EED_1234_ABCD_0001);
    for i in 0..count {
        let x = rng.next_f64() * 4000.0;
        let y = rng.next_f64() * 4000.0;
        let w = 4.0 + rng.next_f64() * 60.0;
        let h = 4.0 + rng.next_f64() * 60.0;
        scene.insert(SceneObject::new(Rect::new(x, y, x + w, y + h)).with_order((i % 7) as i32));
    }
}

/// A view panning across the scene; objects stay put so only the first frame rebuilds.
fn bench_pan<B: Backend<f64> + Default>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(name);
    group.bench_function("pan_64_frames", |b| {
        let mut scene = Scene::<B>::new();
        populate(&mut scene, 10_000);
        let mut view = View::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        b.iter(|| {
            for f in 0..64 {
                let x = f64::from(f) * 50.0;
                view.set_rect(Rect::new(x, x, x + 800.0, x + 600.0));
                view.clear();
                let _ = scene.render(&mut view);
                black_box(view.draw_list().len());
            }
        })
    });
    group.bench_function("move_one_then_render", |b| {
        b.iter_batched(
            || {
                let mut scene = Scene::<B>::new();
                populate(&mut scene, 10_000);
                let _ = scene.rebuild();
                scene
            },
            |mut scene| {
                let first = scene.ids().next();
                if let Some(id) = first {
                    scene.set_bounds(id, Rect::new(10.0, 10.0, 20.0, 20.0));
                }
                let mut view = View::new(Rect::new(0.0, 0.0, 800.0, 600.0));
                let _ = scene.render(&mut view);
                black_box(view.len());
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("hit_test_grid", |b| {
        let mut scene = Scene::<B>::new();
        populate(&mut scene, 10_000);
        let _ = scene.rebuild();
        b.iter(|| {
            let mut hits = 0usize;
            for i in 0..32 {
                for j in 0..32 {
                    let p = Point::new(f64::from(i) * 125.0, f64::from(j) * 125.0);
                    if let Ok(Some(_)) = scene.hit_test(p, QueryFilter::PICKING) {
                        hits += 1;
                    }
                }
            }
            black_box(hits);
        })
    });
    group.finish();
}

fn bench_scenes(c: &mut Criterion) {
    bench_pan::<FlatVec<f64>>(c, "scene_flat");
    bench_pan::<BspF64>(c, "scene_bsp");
    bench_pan::<QuadTreeF64>(c, "scene_quad");
}

criterion_group!(benches, bench_scenes);
criterion_main!(benches);
