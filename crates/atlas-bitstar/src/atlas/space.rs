//! C4/C5: `AtlasStateSpace`, `AtlasStateSampler` and `AtlasMotionValidator`.
//!
//! Owns the growing collection of charts and the operations that only make
//! sense with a view of all of them: chart creation and linking, weighted
//! sampling, and geodesic traversal (`followManifold`, spec §4.4.2). Charts
//! themselves (C2) stay dependency-free of this type; this is the layer
//! that ties chart-local geometry to the growing atlas.
//!
//! Chart storage uses `RefCell<Vec<AtlasChart>>` rather than `Rc<RefCell<_>>`
//! per chart: charts never outlive the atlas and are addressed by `ChartId`
//! (a plain index), so there is no ownership cycle to break here — unlike
//! the BIT* vertex graph (C6), which does need `Rc`/`Weak`.

use std::cell::RefCell;

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chart::polytope::sample_in_ball;
use crate::chart::{AtlasChart, ChartId};
use crate::config::{AtlasParams, ParamError};
use crate::constraint::ConstraintFunction;
use crate::error::{ProjectionError, TraversalStop};

/// The atlas: a constraint function, shared tolerances, and the charts
/// sampled so far.
///
/// `measure_rng` is a second, internally-owned RNG stream (spec §9's
/// "model as an injected collaborator" note, applied here to the
/// bookkeeping RNG rather than the planner-facing sampling RNG, which
/// `AtlasStateSampler` owns instead): chart creation and curvature-driven
/// radius shrinkage both dirty a chart's measure, and this atlas refreshes
/// it immediately rather than leaving a dirty flag nobody reads.
pub struct AtlasStateSpace<'c> {
    constraint: &'c dyn ConstraintFunction,
    params: AtlasParams,
    charts: RefCell<Vec<AtlasChart>>,
    measure_rng: RefCell<StdRng>,
}

/// Outcome of `follow_manifold`: the last valid state reached, the
/// fraction of the path towards `to` it represents (spec §4.5's
/// `checkMotion` overload wants both), and why traversal stopped.
///
/// `trace` is populated only when `follow_manifold` is called with
/// `interpolate = true` (spec §4.4.2/§6's `stateList` output parameter):
/// every ambient state actually visited, `from` first and the returned
/// `last_valid` last.
pub struct TraversalResult {
    pub last_valid: DVector<f64>,
    pub last_valid_chart: ChartId,
    pub interpolation_param: f64,
    pub stop: TraversalStop,
    pub trace: Option<Vec<DVector<f64>>>,
}

/// Outcome of a single `delta`-bounded step of `follow_manifold`'s walk.
enum StepOutcome {
    Advanced(DVector<f64>, ChartId),
    /// The stepped-to point failed `is_valid`; carries the point itself so
    /// the caller can hand it to `dichotomic_search` for boundary refinement.
    Collision(DVector<f64>),
    Stopped(TraversalStop),
}

impl<'c> AtlasStateSpace<'c> {
    pub fn new(constraint: &'c dyn ConstraintFunction, params: AtlasParams, seed: u64) -> Result<Self, ParamError> {
        params.validate()?;
        Ok(Self {
            constraint,
            params,
            charts: RefCell::new(Vec::new()),
            measure_rng: RefCell::new(StdRng::seed_from_u64(seed)),
        })
    }

    pub fn params(&self) -> &AtlasParams {
        &self.params
    }

    pub fn chart_count(&self) -> usize {
        self.charts.borrow().len()
    }

    /// Create a new chart centered at `origin` (assumed to already satisfy
    /// the constraint) and link it against existing charts whose origin
    /// lies within `2*rho` (the Open Question in spec §9 is resolved here:
    /// `2*rho` bounds the neighbor search so that a chart's polytope is cut
    /// only by charts whose balls could plausibly overlap it). Every chart
    /// touched by the new linking (the new chart plus each neighbor it was
    /// cut against) has its measure refreshed before this returns, so
    /// `measure()` is never stale afterwards.
    pub fn new_chart(&self, origin: DVector<f64>) -> Result<ChartId, ProjectionError> {
        let basis = crate::chart::frame::tangent_basis(self.constraint, &origin)?;
        let new_id;
        let mut touched = Vec::new();
        {
            let mut charts = self.charts.borrow_mut();
            new_id = ChartId(charts.len());
            let mut new_chart = AtlasChart::new(new_id, origin.clone(), basis, self.params.rho);

            let link_radius = 2.0 * self.params.rho;
            let mut links = Vec::new();
            for existing in charts.iter() {
                let dist = (existing.origin() - &origin).norm();
                if dist <= link_radius {
                    links.push(existing.id());
                }
            }
            for &other_id in &links {
                let other_origin = charts[other_id.index()].origin().clone();
                new_chart.add_boundary(other_id, new_chart.psi_inverse(&other_origin));
            }
            charts.push(new_chart);
            for &other_id in &links {
                let other = &mut charts[other_id.index()];
                let u = other.psi_inverse(&origin);
                other.add_boundary(new_id, u);
            }
            touched.push(new_id);
            touched.extend(links);
        }
        for id in touched {
            self.refresh_measure_if_dirty(id);
        }
        Ok(new_id)
    }

    /// Find the chart that should own ambient point `x`: `hint` is checked
    /// first. Otherwise, every chart is tested for polytope membership and
    /// the nearest-origin *containing* chart wins (spec's tie-break for
    /// overlapping coverage); if no chart contains `x`, the nearest chart by
    /// origin distance is returned instead, so growth logic always has a
    /// concrete handoff candidate to compare against.
    pub fn owning_chart(&self, x: &DVector<f64>, hint: Option<ChartId>) -> Option<ChartId> {
        let charts = self.charts.borrow();
        if charts.is_empty() {
            return None;
        }
        if let Some(h) = hint {
            if let Some(c) = charts.get(h.index()) {
                if c.in_polytope(&c.psi_inverse(x)) {
                    return Some(h);
                }
            }
        }
        let mut best_containing: Option<(ChartId, f64)> = None;
        let mut best_overall: Option<(ChartId, f64)> = None;
        for c in charts.iter() {
            let u = c.psi_inverse(x);
            let dist = (c.origin() - x).norm();
            if c.in_polytope(&u) && best_containing.map_or(true, |(_, d)| dist < d) {
                best_containing = Some((c.id(), dist));
            }
            if best_overall.map_or(true, |(_, d)| dist < d) {
                best_overall = Some((c.id(), dist));
            }
        }
        best_containing.or(best_overall).map(|(id, _)| id)
    }

    /// Weighted-by-measure chart selection (spec §4.4.1 step 1). Measures
    /// are kept fresh by every mutator that could dirty them, so no caller
    /// needs to refresh before sampling.
    pub fn sample_chart(&self, rng: &mut StdRng) -> ChartId {
        let charts = self.charts.borrow();
        assert!(!charts.is_empty(), "cannot sample from an empty atlas");
        let total: f64 = charts.iter().map(|c| c.measure().max(0.0)).sum();
        if total <= 0.0 {
            return charts[rng.gen_range(0..charts.len())].id();
        }
        let mut t = rng.gen_range(0.0..total);
        for c in charts.iter() {
            let m = c.measure().max(0.0);
            if t < m {
                return c.id();
            }
            t -= m;
        }
        charts.last().unwrap().id()
    }

    /// Force a measure recompute against a caller-supplied RNG stream.
    /// Most callers never need this directly: every structural mutator in
    /// this type already refreshes the charts it touches.
    pub fn refresh_measure(&self, id: ChartId, rng: &mut StdRng) {
        let mut charts = self.charts.borrow_mut();
        charts[id.index()].estimate_measure(rng, &self.params);
    }

    fn refresh_measure_if_dirty(&self, id: ChartId) {
        let mut rng = self.measure_rng.borrow_mut();
        let mut charts = self.charts.borrow_mut();
        if charts[id.index()].is_measure_dirty() {
            charts[id.index()].estimate_measure(&mut rng, &self.params);
        }
    }

    /// Sample a uniformly-at-random point on the manifold within (or, with
    /// nonzero `exploration`, just beyond) the atlas's current coverage
    /// (spec §4.4.1): pick a chart weighted by measure, draw a tangent
    /// point within `AtlasParams::sampling_radius`, and project it back
    /// onto the manifold. A draw that lands outside the chosen chart's
    /// polytope is not rejected — it is handed to `owning_chart`/`new_chart`
    /// exactly as `follow_manifold` does when it exits a chart, so that
    /// `exploration` has the effect spec §4.4.1 step 4 describes: growing
    /// the atlas instead of being clamped back into existing coverage.
    pub fn sample_uniform(&self, rng: &mut StdRng) -> Result<(DVector<f64>, ChartId), ProjectionError> {
        let id = self.sample_chart(rng);
        self.sample_in_chart(id, self.params.sampling_radius(), rng)
    }

    /// As `sample_uniform`, but centered on `near`'s owning chart rather
    /// than a measure-weighted draw across the whole atlas.
    pub fn sample_uniform_near(
        &self,
        near: &DVector<f64>,
        hint: Option<ChartId>,
        rng: &mut StdRng,
    ) -> Result<(DVector<f64>, ChartId), ProjectionError> {
        let id = self
            .owning_chart(near, hint)
            .expect("sample_uniform_near requires at least one existing chart");
        self.sample_in_chart(id, self.params.sampling_radius(), rng)
    }

    fn sample_in_chart(&self, id: ChartId, radius: f64, rng: &mut StdRng) -> Result<(DVector<f64>, ChartId), ProjectionError> {
        let u = {
            let charts = self.charts.borrow();
            let chart = &charts[id.index()];
            sample_in_ball(chart.manifold_dim(), radius, rng)
        };
        let (x, in_poly) = {
            let charts = self.charts.borrow();
            let chart = &charts[id.index()];
            let in_poly = chart.in_polytope(&u);
            (chart.psi(&u, self.constraint, &self.params)?, in_poly)
        };
        if in_poly {
            return Ok((x, id));
        }
        // Frontier draw (spec §4.4.1 step 4): `x` fell outside the chart we
        // sampled from. Hand it to whichever chart already owns it, or
        // grow the atlas with a new chart centered there.
        match self.owning_chart(&x, Some(id)) {
            Some(owner) => Ok((x, owner)),
            None => {
                let new_id = self.new_chart(x.clone())?;
                Ok((x, new_id))
            }
        }
    }

    /// Advance one `step_cap`-bounded step from `x` (assumed valid, owned
    /// by `chart_id`) towards `target` along the chart's tangent
    /// coordinates. If the step would exit the chart's polytope, this looks
    /// for (or creates) the chart that owns the stepped-to point rather than
    /// failing outright — spec §4.4.2 step (e).
    fn step_towards(
        &self,
        chart_id: ChartId,
        x: &DVector<f64>,
        target: &DVector<f64>,
        step_cap: f64,
        is_valid: &dyn Fn(&DVector<f64>) -> bool,
    ) -> StepOutcome {
        let (u_next, in_poly) = {
            let charts = self.charts.borrow();
            let chart = &charts[chart_id.index()];
            let u = chart.psi_inverse(x);
            let u_goal = chart.psi_inverse(target);
            let dir = &u_goal - &u;
            let dir_norm = dir.norm();
            if dir_norm < 1e-14 {
                return StepOutcome::Stopped(TraversalStop::Reached);
            }
            let step = dir_norm.min(step_cap);
            let u_next = &u + (&dir / dir_norm) * step;
            let in_poly = chart.in_polytope(&u_next);
            (u_next, in_poly)
        };

        let projected = {
            let charts = self.charts.borrow();
            let chart = &charts[chart_id.index()];
            chart.psi(&u_next, self.constraint, &self.params)
        };
        let x_next = match projected {
            Ok(v) => v,
            Err(_) => return StepOutcome::Stopped(TraversalStop::ProjectionFailed),
        };

        let step_len = (&x_next - x).norm();
        if step_len > 2.0 * self.params.delta {
            {
                let mut charts = self.charts.borrow_mut();
                let chart = &mut charts[chart_id.index()];
                let shrunk = (chart.radius() * 0.5).max(1e-6);
                if shrunk < chart.radius() {
                    chart.reduce_radius(shrunk);
                }
            }
            self.refresh_measure_if_dirty(chart_id);
            return StepOutcome::Stopped(TraversalStop::ChartInvalid);
        }

        let next_chart_id = if in_poly {
            chart_id
        } else {
            match self.owning_chart(&x_next, None) {
                Some(id) => id,
                None => match self.new_chart(x_next.clone()) {
                    Ok(id) => id,
                    Err(_) => return StepOutcome::Stopped(TraversalStop::ProjectionFailed),
                },
            }
        };

        if !is_valid(&x_next) {
            return StepOutcome::Collision(x_next);
        }

        StepOutcome::Advanced(x_next, next_chart_id)
    }

    /// Geodesic traversal from `from` towards `to` in discretized steps of
    /// length `delta`, re-projecting onto the manifold at each step and
    /// consulting `is_valid` for collision/validity (spec §4.4.2,
    /// `AtlasMotionValidator::checkMotion`, spec §4.5). Exiting the current
    /// chart's polytope hands the walk off to a neighboring chart (or
    /// creates one) rather than stopping the traversal short; a step that
    /// is rejected by `is_valid` is refined with `dichotomic_search` before
    /// being reported, so `last_valid` sits within `delta` of the actual
    /// validity boundary rather than one whole step back from it.
    ///
    /// When `interpolate` is true, `TraversalResult::trace` carries every
    /// ambient state actually visited, `from` first (spec §4.4.2/§6's
    /// `stateList` output).
    pub fn follow_manifold(
        &self,
        from: &DVector<f64>,
        to: &DVector<f64>,
        from_hint: Option<ChartId>,
        interpolate: bool,
        is_valid: &dyn Fn(&DVector<f64>) -> bool,
    ) -> TraversalResult {
        let straight_line = (to - from).norm();
        let delta = self.params.delta;

        let mut x = from.clone();
        let mut trace = interpolate.then(|| vec![x.clone()]);

        let mut chart_id = match self.owning_chart(&x, from_hint) {
            Some(id) => id,
            None => {
                return TraversalResult {
                    last_valid: x,
                    last_valid_chart: from_hint.unwrap_or(ChartId(0)),
                    interpolation_param: 0.0,
                    stop: TraversalStop::ProjectionFailed,
                    trace,
                }
            }
        };
        let mut travelled = 0.0_f64;

        loop {
            let remaining = (to - &x).norm();
            let step_cap = remaining.min(delta);
            if step_cap < 1e-14 {
                return TraversalResult {
                    last_valid: x,
                    last_valid_chart: chart_id,
                    interpolation_param: 1.0,
                    stop: TraversalStop::Reached,
                    trace,
                };
            }

            match self.step_towards(chart_id, &x, to, step_cap, is_valid) {
                StepOutcome::Advanced(x_next, next_chart_id) => {
                    travelled += (&x_next - &x).norm();
                    if travelled > self.params.lambda * straight_line {
                        return TraversalResult {
                            last_valid: x,
                            last_valid_chart: chart_id,
                            interpolation_param: 1.0,
                            stop: TraversalStop::TooFar,
                            trace,
                        };
                    }
                    x = x_next;
                    chart_id = next_chart_id;
                    if let Some(t) = trace.as_mut() {
                        t.push(x.clone());
                    }
                    if remaining <= delta {
                        return TraversalResult {
                            last_valid: x,
                            last_valid_chart: chart_id,
                            interpolation_param: 1.0,
                            stop: TraversalStop::Reached,
                            trace,
                        };
                    }
                }
                StepOutcome::Collision(x_invalid) => {
                    let refined = self.dichotomic_search(&x, &x_invalid, Some(chart_id), is_valid);
                    let refined_chart = self.owning_chart(&refined, Some(chart_id)).unwrap_or(chart_id);
                    let travelled_to_refined = travelled + (&refined - &x).norm();
                    if let Some(t) = trace.as_mut() {
                        t.push(refined.clone());
                    }
                    return TraversalResult {
                        last_valid: refined,
                        last_valid_chart: refined_chart,
                        interpolation_param: (travelled_to_refined / straight_line.max(1e-300)).min(1.0),
                        stop: TraversalStop::Collision,
                        trace,
                    };
                }
                StepOutcome::Stopped(stop) => {
                    return TraversalResult {
                        last_valid: x,
                        last_valid_chart: chart_id,
                        interpolation_param: (travelled / straight_line.max(1e-300)).min(1.0),
                        stop,
                        trace,
                    };
                }
            }
        }
    }

    /// Spec §6's standalone `interpolate(from, to, t, out)` operation: the
    /// ambient state at fraction `t` of the *actual* (possibly multi-chart)
    /// traversal from `from` to `to`, measured by cumulative arc length
    /// rather than straight-line distance in ambient space. Panics if `t`
    /// is outside `[0, 1]`, matching the other programming-error
    /// preconditions in this crate.
    pub fn interpolate(
        &self,
        from: &DVector<f64>,
        to: &DVector<f64>,
        t: f64,
        hint: Option<ChartId>,
        is_valid: &dyn Fn(&DVector<f64>) -> bool,
    ) -> DVector<f64> {
        assert!((0.0..=1.0).contains(&t), "interpolation parameter must lie in [0, 1]");
        if t <= 0.0 {
            return from.clone();
        }
        let result = self.follow_manifold(from, to, hint, true, is_valid);
        let trace = result.trace.expect("follow_manifold(interpolate=true) always returns a trace");
        interpolate_trace(&trace, t)
    }

    /// Whether `interpolate(from, to, t) == interpolate(to, from, 1 - t)`.
    /// It does not: the walk is chart-relative (each step is taken in the
    /// *current* chart's tangent coordinates, and which chart is current
    /// depends on the direction of travel), so reversing the endpoints can
    /// visit a different sequence of charts and land on a different point.
    pub fn has_symmetric_interpolate(&self) -> bool {
        false
    }

    /// Binary search along the segment `[from, to]` (already known: `from`
    /// valid, `to` invalid) for the boundary state, to within `delta`
    /// (spec §4.4.3). Returns the last-known-valid ambient point.
    pub fn dichotomic_search(
        &self,
        from: &DVector<f64>,
        to: &DVector<f64>,
        hint: Option<ChartId>,
        is_valid: &dyn Fn(&DVector<f64>) -> bool,
    ) -> DVector<f64> {
        let mut lo = from.clone();
        let mut hi = to.clone();
        while (&hi - &lo).norm() > self.params.delta {
            let mid_guess = &lo + (&hi - &lo) * 0.5;
            let chart_id = self.owning_chart(&mid_guess, hint).unwrap_or_else(|| {
                self.owning_chart(&lo, hint).expect("dichotomic_search requires an existing chart")
            });
            let charts = self.charts.borrow();
            let chart = &charts[chart_id.index()];
            let u = chart.psi_inverse(&mid_guess);
            let projected = chart.psi(&u, self.constraint, &self.params);
            drop(charts);
            match projected {
                Ok(mid) if is_valid(&mid) => lo = mid,
                Ok(mid) => hi = mid,
                Err(_) => hi = mid_guess,
            }
        }
        lo
    }
}

/// Walk `trace` (a polyline of ambient states) and return the point at
/// fraction `t` of its cumulative arc length.
fn interpolate_trace(trace: &[DVector<f64>], t: f64) -> DVector<f64> {
    if trace.len() == 1 {
        return trace[0].clone();
    }
    let seg_lens: Vec<f64> = trace.windows(2).map(|w| (&w[1] - &w[0]).norm()).collect();
    let total: f64 = seg_lens.iter().sum();
    if total < 1e-300 {
        return trace[0].clone();
    }
    let target = t * total;
    let mut acc = 0.0;
    for (i, len) in seg_lens.iter().enumerate() {
        if acc + len >= target || i == seg_lens.len() - 1 {
            let local_t = if *len > 1e-300 { ((target - acc) / len).clamp(0.0, 1.0) } else { 0.0 };
            return &trace[i] + (&trace[i + 1] - &trace[i]) * local_t;
        }
        acc += len;
    }
    trace.last().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::UnitSphere;

    fn always_valid(_: &DVector<f64>) -> bool {
        true
    }

    #[test]
    fn new_chart_registers_and_links_neighbors() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 1).unwrap();
        let a = space.new_chart(DVector::from_vec(vec![1.0, 0.0, 0.0])).unwrap();
        let b = space
            .new_chart(DVector::from_vec(vec![0.99, 0.14, 0.0]).normalize())
            .unwrap();
        assert_eq!(space.chart_count(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn new_chart_leaves_linked_neighbors_with_a_fresh_measure() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 2).unwrap();
        let a = space.new_chart(DVector::from_vec(vec![1.0, 0.0, 0.0])).unwrap();
        space
            .new_chart(DVector::from_vec(vec![0.99, 0.14, 0.0]).normalize())
            .unwrap();
        let charts = space.charts.borrow();
        assert!(!charts[a.index()].is_measure_dirty());
    }

    #[test]
    fn follow_manifold_reaches_a_distant_goal_across_several_charts() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 3).unwrap();
        let from = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let to = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        let chart = space.new_chart(from.clone()).unwrap();

        let result = space.follow_manifold(&from, &to, Some(chart), false, &always_valid);
        assert!(result.stop.is_reached(), "expected the quarter-turn geodesic to reach its goal");
        assert!((result.last_valid.norm() - 1.0).abs() < 1e-6);
        assert!(space.chart_count() > 1, "a quarter turn at rho=0.1 cannot fit in a single chart");
    }

    #[test]
    fn follow_manifold_interpolate_true_returns_a_trace_ending_at_the_result() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 4).unwrap();
        let from = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let to = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        let chart = space.new_chart(from.clone()).unwrap();

        let result = space.follow_manifold(&from, &to, Some(chart), true, &always_valid);
        let trace = result.trace.expect("interpolate=true must produce a trace");
        assert_eq!(trace.first().unwrap(), &from);
        assert_eq!(trace.last().unwrap(), &result.last_valid);
    }

    #[test]
    fn follow_manifold_from_equals_to_reaches_immediately_with_a_one_state_trace() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 5).unwrap();
        let from = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let chart = space.new_chart(from.clone()).unwrap();

        let result = space.follow_manifold(&from, &from, Some(chart), true, &always_valid);
        assert!(result.stop.is_reached());
        assert_eq!(result.trace.unwrap().len(), 1);
    }

    #[test]
    fn follow_manifold_reports_collision_when_validity_rejects() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 6).unwrap();
        let from = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let to = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        let chart = space.new_chart(from.clone()).unwrap();

        let result = space.follow_manifold(&from, &to, Some(chart), false, &|_| false);
        assert_eq!(result.stop, TraversalStop::Collision);
        assert!(
            (result.last_valid - &from).norm() < params.delta + 1e-9,
            "collision refinement should not overshoot more than one step past `from`"
        );
    }

    #[test]
    fn interpolate_at_zero_and_one_matches_the_endpoints() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 7).unwrap();
        let from = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let to = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        let chart = space.new_chart(from.clone()).unwrap();

        let at_zero = space.interpolate(&from, &to, 0.0, Some(chart), &always_valid);
        assert_eq!(at_zero, from);
        let at_one = space.interpolate(&from, &to, 1.0, Some(chart), &always_valid);
        assert!((at_one.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn owning_chart_breaks_overlap_ties_by_nearest_origin() {
        let sphere = UnitSphere::new(3);
        let params = AtlasParams::default();
        let space = AtlasStateSpace::new(&sphere, params, 8).unwrap();
        let near = space.new_chart(DVector::from_vec(vec![1.0, 0.0, 0.0])).unwrap();
        let far = space
            .new_chart(DVector::from_vec(vec![0.995, 0.0, 0.0998]).normalize())
            .unwrap();

        let x = DVector::from_vec(vec![0.999, 0.0, 0.04]).normalize();
        let owner = space.owning_chart(&x, None).unwrap();
        assert_eq!(owner, near, "the closer chart's origin should win the overlap tie-break");
        assert_ne!(owner, far);
    }
}
