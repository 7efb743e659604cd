//! Benchmark corner reduction on dense boundary rings.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seema_geo::core::{GeoPoint, Ring};
use seema_geo::corners::{reduce_to_corners, CornerConfig};

/// Rectangle boundary at 41°S with `per_edge` samples along every edge.
fn dense_boundary(per_edge: usize) -> Ring {
    let corners = [
        (-41.2905, 174.7795),
        (-41.2905, 174.7805),
        (-41.2895, 174.7805),
        (-41.2895, 174.7795),
    ];
    let mut points = Vec::with_capacity(4 * per_edge);
    for c in 0..4 {
        let (lat0, lon0) = corners[c];
        let (lat1, lon1) = corners[(c + 1) % 4];
        for s in 0..per_edge {
            let t = s as f64 / per_edge as f64;
            points.push(GeoPoint::new(
                lat0 + (lat1 - lat0) * t,
                lon0 + (lon1 - lon0) * t,
            ));
        }
    }
    Ring::new(points)
}

fn bench_corner_reduction(c: &mut Criterion) {
    let config = CornerConfig::default();
    let mut group = c.benchmark_group("corner_reduction");

    for per_edge in [8, 32, 128] {
        let ring = dense_boundary(per_edge);
        group.bench_with_input(
            BenchmarkId::from_parameter(ring.len()),
            &ring,
            |b, ring| b.iter(|| reduce_to_corners(black_box(ring), &config).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_corner_reduction);
criterion_main!(benches);
