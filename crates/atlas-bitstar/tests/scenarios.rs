//! Worked scenarios from the design notes, exercised end to end across
//! chart, atlas and BIT* vertex machinery rather than one function at a
//! time.

use atlas_bitstar::atlas::sampler::{AtlasMotionValidator, AtlasStateSampler};
use atlas_bitstar::atlas::AtlasStateSpace;
use atlas_bitstar::bitstar::{BITstarVertex, EuclideanCost};
use atlas_bitstar::config::AtlasParams;
use atlas_bitstar::constraint::UnitSphere;
use nalgebra::DVector;

#[test]
fn unit_sphere_geodesic_reaches_an_antipodal_quarter_turn() {
    let sphere = UnitSphere::new(3);
    let params = AtlasParams::default();
    let space = AtlasStateSpace::new(&sphere, params, 100).unwrap();

    let from = DVector::from_vec(vec![1.0, 0.0, 0.0]);
    let to = DVector::from_vec(vec![0.0, 1.0, 0.0]);
    let from_chart = space.new_chart(from.clone()).unwrap();

    let validator = AtlasMotionValidator::new(&space, |_: &DVector<f64>| true);
    let (reached, last_valid, t) = validator.check_motion_with_last_valid(&from, &to, Some(from_chart));

    assert!(reached, "expected the quarter-turn geodesic to reach its goal");
    assert!((last_valid.norm() - 1.0).abs() < 1e-4, "endpoint should stay on the sphere");
    assert!((t - 1.0).abs() < 1e-9);
    assert!(
        space.chart_count() > 1,
        "a quarter turn spans many rho=0.1 charts; reaching it should have grown the atlas"
    );
}

#[test]
fn chart_coverage_grows_sublinearly_as_sampling_explores_past_existing_coverage() {
    let sphere = UnitSphere::new(3);
    let mut params = AtlasParams::default();
    params.exploration = 0.9;
    let space = AtlasStateSpace::new(&sphere, params, 101).unwrap();
    space.new_chart(DVector::from_vec(vec![1.0, 0.0, 0.0])).unwrap();

    let mut sampler = AtlasStateSampler::new(&space, 99);
    let mut drawn = 0usize;
    for _ in 0..200 {
        if let Ok((x, _)) = sampler.sample_uniform() {
            assert!((x.norm() - 1.0).abs() < 1e-4);
            drawn += 1;
        }
    }
    // A 200-draw walk at high exploration should grow past the single
    // seed chart, but reuse coverage often enough that growth stays well
    // short of one new chart per draw (spec §8 scenario 3).
    assert!(drawn > 150, "most draws should still produce a valid on-manifold point");
    assert!(space.chart_count() > 1, "exploration should eventually sample outside the seed chart");
    assert!(
        space.chart_count() < drawn / 2,
        "chart growth should be sub-linear in the number of successful draws"
    );
}

#[test]
fn vertex_cascade_matches_the_worked_reparenting_example() {
    let helper = EuclideanCost;
    let root = BITstarVertex::new_root(0, DVector::from_vec(vec![0.0]), 0.0);
    let a = BITstarVertex::new_orphan(1, DVector::from_vec(vec![1.0]), f64::INFINITY);
    let b = BITstarVertex::new_orphan(2, DVector::from_vec(vec![2.0]), f64::INFINITY);

    a.add_parent(&root, 3.0, &helper);
    b.add_parent(&a, 4.0, &helper);
    assert_eq!(a.cost(), 3.0);
    assert_eq!(b.cost(), 7.0);

    a.remove_parent(&helper);
    a.add_parent(&root, 1.0, &helper);
    assert_eq!(a.cost(), 1.0);
    assert_eq!(b.cost(), 5.0);
}

#[test]
#[should_panic]
fn pruned_vertices_refuse_further_structural_edits() {
    let helper = EuclideanCost;
    let root = BITstarVertex::new_root(0, DVector::from_vec(vec![0.0]), 0.0);
    let a = BITstarVertex::new_orphan(1, DVector::from_vec(vec![1.0]), f64::INFINITY);
    a.add_parent(&root, 1.0, &helper);
    a.mark_pruned();
    a.remove_parent(&helper);
}
