//! C5: `AtlasStateSampler` and `AtlasMotionValidator` — the two
//! collaborator-facing wrappers a sampling-based planner actually calls
//! into, built on top of `AtlasStateSpace`'s chart machinery.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::atlas::space::AtlasStateSpace;
use crate::chart::ChartId;
use crate::error::ProjectionError;

/// Owns the RNG a planner's sampling calls draw from; `AtlasStateSpace`
/// stays RNG-free so the same atlas can back several independent samplers
/// (e.g. one per planning thread) with deterministic, separately-seeded
/// streams.
pub struct AtlasStateSampler<'a, 'c> {
    space: &'a AtlasStateSpace<'c>,
    rng: StdRng,
}

impl<'a, 'c> AtlasStateSampler<'a, 'c> {
    pub fn new(space: &'a AtlasStateSpace<'c>, seed: u64) -> Self {
        Self {
            space,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sample_uniform(&mut self) -> Result<(DVector<f64>, ChartId), ProjectionError> {
        self.space.sample_uniform(&mut self.rng)
    }

    pub fn sample_uniform_near(
        &mut self,
        near: &DVector<f64>,
        hint: Option<ChartId>,
    ) -> Result<(DVector<f64>, ChartId), ProjectionError> {
        self.space.sample_uniform_near(near, hint, &mut self.rng)
    }
}

/// Wraps `AtlasStateSpace::follow_manifold` behind the boolean
/// `checkMotion` a generic motion planner expects, with an overload that
/// also exposes the last valid state and its interpolation parameter for
/// planners that want to salvage a partial edge (spec §4.5).
pub struct AtlasMotionValidator<'a, 'c, V> {
    space: &'a AtlasStateSpace<'c>,
    is_valid: V,
}

impl<'a, 'c, V> AtlasMotionValidator<'a, 'c, V>
where
    V: Fn(&DVector<f64>) -> bool,
{
    pub fn new(space: &'a AtlasStateSpace<'c>, is_valid: V) -> Self {
        Self { space, is_valid }
    }

    pub fn check_motion(&self, from: &DVector<f64>, to: &DVector<f64>, hint: Option<ChartId>) -> bool {
        self.space
            .follow_manifold(from, to, hint, false, &self.is_valid)
            .stop
            .is_reached()
    }

    /// As `check_motion`, but also returns the last valid ambient state
    /// reached and the fraction of `[from, to]` it represents.
    pub fn check_motion_with_last_valid(
        &self,
        from: &DVector<f64>,
        to: &DVector<f64>,
        hint: Option<ChartId>,
    ) -> (bool, DVector<f64>, f64) {
        let result = self.space.follow_manifold(from, to, hint, false, &self.is_valid);
        let reached = result.stop.is_reached();
        (reached, result.last_valid, result.interpolation_param)
    }
}
