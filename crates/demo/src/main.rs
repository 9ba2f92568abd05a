use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::DVector;
use tracing_subscriber::fmt::SubscriberBuilder;

use atlas_bitstar::atlas::sampler::{AtlasMotionValidator, AtlasStateSampler};
use atlas_bitstar::atlas::AtlasStateSpace;
use atlas_bitstar::bitstar::{BITstarVertex, EuclideanCost};
use atlas_bitstar::config::AtlasParams;
use atlas_bitstar::constraint::UnitSphere;
use framework::{MultiRobotValidityChecker, PrioritizedPlanner, StateValidityChecker};

#[derive(Parser)]
#[command(name = "demo")]
#[command(about = "Worked scenarios over the atlas/BIT* core")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Walk the unit sphere's geodesic from one point to another.
    Geodesic {
        #[arg(long, default_value_t = 3)]
        dim: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Sample N uniform points on a single-chart atlas and report coverage.
    Sample {
        #[arg(long, default_value_t = 3)]
        dim: usize,
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
    /// Reparent a small BIT* vertex tree and show the cost cascade.
    Cascade,
    /// Plan two robots in priority order over a shared corridor.
    MultiRobot,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Geodesic { dim, seed } => geodesic(dim, seed),
        Action::Sample { dim, count, seed } => sample(dim, count, seed),
        Action::Cascade => cascade(),
        Action::MultiRobot => multi_robot(),
    }
}

fn geodesic(dim: usize, seed: u64) -> Result<()> {
    let sphere = UnitSphere::new(dim);
    let params = AtlasParams::default();
    let space = AtlasStateSpace::new(&sphere, params, seed).context("invalid atlas params")?;

    let mut from = vec![0.0; dim];
    from[0] = 1.0;
    let mut to = vec![0.0; dim];
    to[dim.min(1)] = 1.0;
    let from = DVector::from_vec(from);
    let to = DVector::from_vec(to);

    let from_chart = space.new_chart(from.clone())?;

    let validator = AtlasMotionValidator::new(&space, |_: &DVector<f64>| true);
    let (reached, last_valid, t) = validator.check_motion_with_last_valid(&from, &to, Some(from_chart));

    tracing::info!(dim, reached, interpolation_param = t, charts = space.chart_count(), "geodesic");
    println!(
        "reached={reached} interpolation_param={t:.4} last_valid={:?} charts={}",
        last_valid.as_slice(),
        space.chart_count()
    );
    Ok(())
}

fn sample(dim: usize, count: usize, seed: u64) -> Result<()> {
    let sphere = UnitSphere::new(dim);
    let params = AtlasParams::default();
    let space = AtlasStateSpace::new(&sphere, params, seed).context("invalid atlas params")?;
    let mut origin = vec![0.0; dim];
    origin[0] = 1.0;
    space.new_chart(DVector::from_vec(origin))?;

    let mut sampler = AtlasStateSampler::new(&space, seed);
    let mut drawn = 0usize;
    for _ in 0..count {
        if sampler.sample_uniform().is_ok() {
            drawn += 1;
        }
    }
    tracing::info!(dim, count, drawn, charts = space.chart_count(), "sample");
    println!("drawn={drawn}/{count} charts={}", space.chart_count());
    Ok(())
}

fn cascade() -> Result<()> {
    let helper = EuclideanCost;
    let root = BITstarVertex::new_root(0, DVector::from_vec(vec![0.0]), 0.0);
    let a = BITstarVertex::new_orphan(1, DVector::from_vec(vec![1.0]), f64::INFINITY);
    let b = BITstarVertex::new_orphan(2, DVector::from_vec(vec![2.0]), f64::INFINITY);

    a.add_parent(&root, 3.0, &helper);
    b.add_parent(&a, 4.0, &helper);
    println!("before rewire: a.cost={} b.cost={}", a.cost(), b.cost());

    a.remove_parent(&helper);
    a.add_parent(&root, 1.0, &helper);
    println!("after rewire:  a.cost={} b.cost={}", a.cost(), b.cost());

    tracing::info!(a_cost = a.cost(), b_cost = b.cost(), "cascade");
    Ok(())
}

fn multi_robot() -> Result<()> {
    let mut planner = PrioritizedPlanner::new(vec![0, 1], 0.75, 10.0);

    // Robot 0 drives straight through the corridor; it plans first and
    // unconditionally wins the contested cells.
    let robot0_path: Vec<(f64, DVector<f64>)> = (0..=10)
        .map(|i| (i as f64 * 0.1, DVector::from_vec(vec![i as f64, 0.0])))
        .collect();
    planner.commit_path(0, &robot0_path);

    // Robot 1 must detour around robot 0's reservations.
    let checker: MultiRobotValidityChecker<'_> = planner.validity_checker_for(1);
    let contested = DVector::from_vec(vec![5.0, 0.0]);
    let detour = DVector::from_vec(vec![5.0, 2.0]);
    let contested_ok = checker.is_valid(&contested, 0.5);
    let detour_ok = checker.is_valid(&detour, 0.5);

    tracing::info!(contested_ok, detour_ok, reservations = planner.reservation_count(), "multi_robot");
    println!("contested_cell_valid={contested_ok} detour_valid={detour_ok}");
    Ok(())
}
