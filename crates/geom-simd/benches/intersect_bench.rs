//! Criterion benchmarks for edge intersection.
//! Polygon pairs with m vertices each, m in {16, 64, 256}; scalar vs batched.
//! Results: by default under target/criterion.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geom_simd::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use geom_simd::{edge_intersect, find_all_intersections, select_kernel, Algorithm, Point, Polygon};

fn polygon(m: usize, index: u64, center: Point) -> Polygon {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(m),
        center,
        ..RadialCfg::default()
    };
    draw_polygon_radial(cfg, ReplayToken::new(44, index))
}

fn bench_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_all_intersections");
    let algorithms: Vec<Algorithm> = [
        Algorithm::Scalar,
        Algorithm::Avx2,
        Algorithm::Avx512,
        Algorithm::Neon,
    ]
    .into_iter()
    .filter(|a| select_kernel(*a).is_ok())
    .collect();
    for &m in &[16usize, 64, 256] {
        let a = polygon(m, 0, Point::new(0.0, 0.0));
        let b = polygon(m, 1, Point::new(0.5, 0.2));
        for &algorithm in &algorithms {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), m), &m, |bench, _| {
                bench.iter(|| {
                    find_all_intersections(black_box(&a), black_box(&b), algorithm).unwrap()
                })
            });
        }
    }
    group.finish();
}

fn bench_single(c: &mut Criterion) {
    c.bench_function("edge_intersect", |b| {
        b.iter_batched(
            || {
                (
                    Point::new(0.0, 0.0),
                    Point::new(10.0, 10.0),
                    Point::new(0.0, 10.0),
                    Point::new(10.0, 0.0),
                )
            },
            |(a1, a2, b1, b2)| edge_intersect(a1, a2, b1, b2),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_pairs, bench_single);
criterion_main!(benches);
