//! C2: `AtlasChart` — a local tangent-space coordinate patch with a
//! shrinkable radius and a half-space polytope carved out by neighboring
//! charts (spec §4.3).

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;

use crate::chart::id::ChartId;
use crate::chart::polytope::{ball_volume, sample_in_ball, Halfspace};
use crate::chart::projector;
use crate::config::AtlasParams;
use crate::constraint::ConstraintFunction;
use crate::error::ProjectionError;

/// Tolerance used when testing membership against a half-space or the
/// bounding ball; avoids rejecting points that are correct to within
/// floating-point noise.
const BOUNDARY_EPS: f64 = 1e-9;

/// A local chart: an affine tangent frame `(origin, basis)` together with
/// the region of tangent coordinates it is considered valid over.
pub struct AtlasChart {
    id: ChartId,
    origin: DVector<f64>,
    basis: DMatrix<f64>,
    radius: f64,
    halfspaces: Vec<Halfspace>,
    neighbors: Vec<ChartId>,
    measure: f64,
    measure_dirty: bool,
}

impl AtlasChart {
    /// Construct a fresh chart centered at `origin` with the given tangent
    /// `basis` (columns orthonormal, spanning `null(J(origin))`) and initial
    /// radius `rho`. The polytope starts as the bare ball of that radius.
    pub fn new(id: ChartId, origin: DVector<f64>, basis: DMatrix<f64>, rho: f64) -> Self {
        let k = basis.ncols();
        let measure = ball_volume(k, rho);
        Self {
            id,
            origin,
            basis,
            radius: rho,
            halfspaces: Vec::new(),
            neighbors: Vec::new(),
            measure,
            measure_dirty: false,
        }
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn origin(&self) -> &DVector<f64> {
        &self.origin
    }

    pub fn basis(&self) -> &DMatrix<f64> {
        &self.basis
    }

    pub fn manifold_dim(&self) -> usize {
        self.basis.ncols()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn neighbors(&self) -> &[ChartId] {
        &self.neighbors
    }

    /// Cached measure estimate; call `estimate_measure` after mutating the
    /// polytope (`add_boundary`/`reduce_radius`) to refresh it.
    pub fn measure(&self) -> f64 {
        self.measure
    }

    pub fn is_measure_dirty(&self) -> bool {
        self.measure_dirty
    }

    /// `psi`: chart parameterization, tangent coordinates `u` to a manifold
    /// point near `origin + basis*u`, refined by `ManifoldProjector`.
    pub fn psi(
        &self,
        u: &DVector<f64>,
        constraint: &dyn ConstraintFunction,
        params: &AtlasParams,
    ) -> Result<DVector<f64>, ProjectionError> {
        assert_eq!(u.len(), self.manifold_dim(), "tangent coordinate dimension mismatch");
        let guess = &self.origin + &self.basis * u;
        projector::project(constraint, &guess, params)
    }

    /// `psi^-1`: orthogonal projection of an ambient point onto this
    /// chart's tangent coordinates (an approximation, exact only for points
    /// already on the manifold near `origin`).
    pub fn psi_inverse(&self, x: &DVector<f64>) -> DVector<f64> {
        self.basis.transpose() * (x - &self.origin)
    }

    /// Whether tangent-coordinate point `u` lies within this chart's valid
    /// region: inside the bounding ball and on the chart's side of every
    /// neighbor-separating half-space.
    pub fn in_polytope(&self, u: &DVector<f64>) -> bool {
        if u.norm() > self.radius + BOUNDARY_EPS {
            return false;
        }
        self.halfspaces.iter().all(|h| h.satisfies_eps(u, BOUNDARY_EPS))
    }

    /// Carve a half-space out of this chart's polytope that separates it
    /// from a newly linked neighbor whose origin, expressed in this
    /// chart's tangent coordinates, is `neighbor_origin_in_tangent`. The
    /// bisecting hyperplane is `u . n <= |n|^2 / 2` (spec §4.3).
    ///
    /// A neighbor whose origin projects to (numerically) the same tangent
    /// point is skipped: it would carve a degenerate zero-width slab.
    pub fn add_boundary(&mut self, neighbor_id: ChartId, neighbor_origin_in_tangent: DVector<f64>) {
        let norm_sq = neighbor_origin_in_tangent.dot(&neighbor_origin_in_tangent);
        if norm_sq < 1e-14 {
            return;
        }
        self.halfspaces
            .push(Halfspace::new(neighbor_origin_in_tangent, norm_sq * 0.5));
        self.neighbors.push(neighbor_id);
        self.measure_dirty = true;
    }

    /// Shrink the chart's bounding radius, e.g. after `followManifold`
    /// detects excessive curvature (`TraversalStop::ChartInvalid`).
    pub fn reduce_radius(&mut self, new_radius: f64) {
        assert!(
            new_radius > 0.0 && new_radius < self.radius,
            "reduce_radius must strictly shrink a chart"
        );
        self.radius = new_radius;
        self.measure_dirty = true;
    }

    /// Monte Carlo estimate of the polytope's volume, used to weight chart
    /// selection during sampling (spec §4.4.1). Sample count scales with
    /// the chart's dimension per `AtlasParams::monte_carlo_thoroughness`.
    pub fn estimate_measure(&mut self, rng: &mut StdRng, params: &AtlasParams) {
        let k = self.manifold_dim();
        let n_samples = (params.monte_carlo_thoroughness.powi(k.max(1) as i32)).ceil() as usize;
        let n_samples = n_samples.max(32);
        let mut inside = 0usize;
        for _ in 0..n_samples {
            let u = sample_in_ball(k, self.radius, rng);
            if self.in_polytope(&u) {
                inside += 1;
            }
        }
        let frac = inside as f64 / n_samples as f64;
        self.measure = frac * ball_volume(k, self.radius);
        self.measure_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::UnitSphere;
    use rand::SeedableRng;

    fn make_chart() -> AtlasChart {
        let sphere = UnitSphere::new(3);
        let x0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let basis = crate::chart::frame::tangent_basis(&sphere, &x0).unwrap();
        AtlasChart::new(ChartId(0), x0, basis, 0.1)
    }

    #[test]
    fn fresh_chart_measure_is_the_full_ball() {
        let chart = make_chart();
        let expected = ball_volume(2, 0.1);
        assert!((chart.measure() - expected).abs() < 1e-12);
        assert!(!chart.is_measure_dirty());
    }

    #[test]
    fn boundary_halves_the_polytope_along_the_separating_axis() {
        let mut chart = make_chart();
        let k = chart.manifold_dim();
        let neighbor_dir = DVector::from_vec(vec![0.1, 0.0][..k].to_vec());
        chart.add_boundary(ChartId(1), neighbor_dir.clone());
        assert!(chart.in_polytope(&DVector::zeros(k)));
        assert!(!chart.in_polytope(&(neighbor_dir.clone() * 2.0)));
        assert_eq!(chart.neighbors(), &[ChartId(1)]);
        assert!(chart.is_measure_dirty());
    }

    #[test]
    fn estimate_measure_shrinks_after_a_boundary_cut() {
        let mut chart = make_chart();
        let k = chart.manifold_dim();
        let mut rng = StdRng::seed_from_u64(42);
        chart.estimate_measure(&mut rng, &AtlasParams::default());
        let full = chart.measure();

        let neighbor_dir = DVector::from_vec(vec![0.05, 0.0][..k].to_vec());
        chart.add_boundary(ChartId(1), neighbor_dir);
        chart.estimate_measure(&mut rng, &AtlasParams::default());
        assert!(chart.measure() < full);
    }

    #[test]
    #[should_panic]
    fn reduce_radius_rejects_growth() {
        let mut chart = make_chart();
        chart.reduce_radius(10.0);
    }
}
