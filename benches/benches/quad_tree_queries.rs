// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bosk_quad_tree::QuadTree;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
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

fn gen_random_rects(count: usize, max_w: f64, max_h: f64, rect_w: f64, rect_h: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (max_w - rect_w).max(1.0);
        let y0 = rng.next_f64() * (max_h - rect_h).max(1.0);
        out.push(Rect::new(x0, y0, x0 + rect_w, y0 + rect_h));
    }
    out
}

fn bench_build_and_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_and_find");
    for &n in &[16usize, 32, 64] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                QuadTree::new,
                |mut tree| {
                    for &rect in &rects {
                        let _ = tree.acquire(rect);
                    }
                    let hits = tree.find(Rect::new(100.0, 100.0, 500.0, 500.0)).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let rects = gen_random_rects(4096, 2000.0, 2000.0, 12.0, 12.0);
    group.bench_function("random_4096", |b| {
        b.iter_batched(
            QuadTree::new,
            |mut tree| {
                for &rect in &rects {
                    let _ = tree.acquire(rect);
                }
                let hits = tree.find(Rect::new(800.0, 800.0, 1200.0, 1200.0)).len();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_steady_state_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_state_find");
    let rects = gen_random_rects(4096, 2000.0, 2000.0, 12.0, 12.0);
    let mut tree = QuadTree::new();
    for &rect in &rects {
        let _ = tree.acquire(rect);
    }
    // Force the lazy build outside the measured loop.
    let _ = tree.find(tree.bounds());

    group.bench_function("window_4096", |b| {
        b.iter(|| {
            let hits = tree.find(Rect::new(800.0, 800.0, 1200.0, 1200.0)).len();
            black_box(hits);
        })
    });
    group.bench_function("around_4096", |b| {
        b.iter(|| {
            let hits = tree.find_around(Point::new(1000.0, 1000.0), 150.0).len();
            black_box(hits);
        })
    });
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    let rects = gen_random_rects(1024, 2000.0, 2000.0, 12.0, 12.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("acquire_release_1024", |b| {
        b.iter_batched(
            || {
                // Pre-grown tree so churn stays incremental.
                let mut tree = QuadTree::new();
                let anchor = tree.acquire(Rect::new(0.0, 0.0, 2000.0, 2000.0));
                let _ = tree.find(tree.bounds());
                (tree, anchor)
            },
            |(mut tree, _anchor)| {
                let ids: Vec<_> = rects.iter().map(|&rect| tree.acquire(rect)).collect();
                for id in ids {
                    tree.release(id);
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build_and_find,
    bench_steady_state_find,
    bench_churn
);
criterion_main!(benches);
