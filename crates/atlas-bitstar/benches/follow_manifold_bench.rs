//! Criterion microbench for `AtlasStateSpace::follow_manifold` (C4), the
//! hot loop a BIT* planner's edge-validity check spends most of its time
//! in.

use atlas_bitstar::atlas::AtlasStateSpace;
use atlas_bitstar::config::AtlasParams;
use atlas_bitstar::constraint::UnitSphere;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use nalgebra::DVector;

fn bench_follow_manifold(c: &mut Criterion) {
    let sphere = UnitSphere::new(3);
    let params = AtlasParams::default();

    c.bench_function("follow_manifold/sphere3_quarter_turn", |b| {
        b.iter_batched(
            || {
                let space = AtlasStateSpace::new(&sphere, params, 0).unwrap();
                let from = DVector::from_vec(vec![1.0, 0.0, 0.0]);
                let to = DVector::from_vec(vec![0.0, 1.0, 0.0]);
                let chart = space.new_chart(from.clone()).unwrap();
                (space, from, to, chart)
            },
            |(space, from, to, chart)| {
                let _ = space.follow_manifold(&from, &to, Some(chart), false, &|_| true);
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_follow_manifold);
criterion_main!(benches);
