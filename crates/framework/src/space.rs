//! Minimal OMPL-shaped `State`/`StateSpace` traits a generic planner would
//! be written against, grounded in the `rossng-oxmpl` RRT planner's
//! `State`/`StateSpace` pair: a planner only needs distance, interpolation
//! and sampling, never the atlas's internal chart bookkeeping.

use nalgebra::DVector;
use rand::rngs::StdRng;

use atlas_bitstar::atlas::AtlasStateSpace;
use atlas_bitstar::chart::ChartId;
use atlas_bitstar::error::ProjectionError;

/// A point a planner reasons about. The atlas represents states as plain
/// ambient-space vectors; this trait exists so planner code can be written
/// against `State` rather than `DVector<f64>` directly, matching the
/// indirection the grounding RRT implementation uses.
pub trait State: Clone {
    fn coords(&self) -> &DVector<f64>;
}

impl State for DVector<f64> {
    fn coords(&self) -> &DVector<f64> {
        self
    }
}

/// The subset of `AtlasStateSpace` a generic sampling-based planner needs:
/// distance, sampling and (implicitly, via the motion validator) local
/// interpolation. Kept separate from `atlas_bitstar::AtlasStateSpace` so a
/// planner can be written against this trait and later retargeted to a
/// non-atlas space without touching planner code.
pub trait StateSpace {
    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64;
    fn sample_uniform(&self, rng: &mut StdRng) -> Result<(DVector<f64>, ChartId), ProjectionError>;
}

impl<'c> StateSpace for AtlasStateSpace<'c> {
    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        (a - b).norm()
    }

    fn sample_uniform(&self, rng: &mut StdRng) -> Result<(DVector<f64>, ChartId), ProjectionError> {
        AtlasStateSpace::sample_uniform(self, rng)
    }
}
