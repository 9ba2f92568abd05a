//! Criterion microbenches for `ManifoldProjector::project` (C3) at a range
//! of ambient dimensions and starting offsets.

use atlas_bitstar::chart::projector::project;
use atlas_bitstar::config::AtlasParams;
use atlas_bitstar::constraint::UnitSphere;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::DVector;

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let params = AtlasParams::default();

    for &dim in &[3usize, 8, 16] {
        let sphere = UnitSphere::new(dim);
        group.bench_function(BenchmarkId::new("project_from_2x_radius", dim), |b| {
            b.iter_batched(
                || {
                    let mut v = vec![0.0; dim];
                    v[0] = 2.0;
                    DVector::from_vec(v)
                },
                |guess| {
                    let _ = project(&sphere, &guess, &params).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
