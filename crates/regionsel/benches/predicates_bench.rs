//! Criterion microbenches for the 2D predicates (group "predicates").
//!
//! - Batch point/segment tests per region shape, with and without the
//!   bounding-box prefilter.
//! - Inputs are seeded uniform samples over a 1920×1080 viewport; regions cover
//!   a small patch so most inputs are rejected by the prefilter.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::vector;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regionsel::api::*;

const N: usize = 10_000;

fn sample_points(rng: &mut StdRng, n: usize) -> Vec<Point2> {
    (0..n)
        .map(|_| vector![rng.gen_range(0.0..1920.0), rng.gen_range(0.0..1080.0)])
        .collect()
}

fn sample_segments(rng: &mut StdRng, n: usize) -> Vec<Segment2> {
    sample_points(rng, n)
        .into_iter()
        .map(|a| {
            let d = vector![rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0)];
            (a, a + d)
        })
        .collect()
}

fn regions() -> Vec<Region> {
    let lasso: Vec<Point2> = (0..32)
        .map(|i| {
            let t = i as f32 / 32.0 * std::f32::consts::TAU;
            let r = if i % 2 == 0 { 120.0 } else { 70.0 };
            vector![900.0 + r * t.cos(), 500.0 + r * t.sin()]
        })
        .collect();
    vec![
        Region::rect(800.0, 1000.0, 400.0, 600.0).unwrap(),
        Region::circle(vector![900.0, 500.0], 100.0).unwrap(),
        Region::polygon(lasso).unwrap(),
    ]
}

fn bench_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicates");
    group.throughput(Throughput::Elements(N as u64));
    let mut rng = StdRng::seed_from_u64(7);
    let points = sample_points(&mut rng, N);
    for region in regions() {
        let kind = region.kind().as_str();
        group.bench_with_input(BenchmarkId::new("points_prefiltered", kind), &points, |b, pts| {
            b.iter(|| region.contains_points(pts))
        });
        group.bench_with_input(BenchmarkId::new("points_exact", kind), &points, |b, pts| {
            b.iter(|| region.contains_points_exact(pts))
        });
    }
    group.finish();
}

fn bench_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicates");
    group.throughput(Throughput::Elements(N as u64));
    let mut rng = StdRng::seed_from_u64(11);
    let segs = sample_segments(&mut rng, N);
    for region in regions() {
        let kind = region.kind().as_str();
        group.bench_with_input(BenchmarkId::new("segments_prefiltered", kind), &segs, |b, s| {
            b.iter(|| region.intersects_segments(s))
        });
        group.bench_with_input(BenchmarkId::new("segments_exact", kind), &segs, |b, s| {
            b.iter(|| region.intersects_segments_exact(s))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_points, bench_segments);
criterion_main!(benches);
