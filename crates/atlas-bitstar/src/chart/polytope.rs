//! Tangent-space half-spaces and the small numerical helpers the chart
//! polytope needs (ball volume, uniform ball sampling).
//!
//! Kept dependency-light and explicit, in the spirit of the teacher's
//! `geom2::ordered`/`geom4::types` half-space representations, generalized
//! from fixed 2D/4D to an arbitrary tangent dimension `k`.

use nalgebra::DVector;
use rand::Rng;

/// Closed half-space `a . u <= b` in tangent coordinates.
#[derive(Clone, Debug)]
pub struct Halfspace {
    pub a: DVector<f64>,
    pub b: f64,
}

impl Halfspace {
    #[inline]
    pub fn new(a: DVector<f64>, b: f64) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn satisfies_eps(&self, u: &DVector<f64>, eps: f64) -> bool {
        self.a.dot(u) <= self.b + eps
    }
}

/// Volume of the unit ball in `R^k` via the even/odd recursion
/// `V(0)=1, V(1)=2, V(n) = (2*pi/n) * V(n-2)`, avoiding a dependency on a
/// gamma-function crate for what is otherwise integer-indexed recursion.
pub fn unit_ball_volume(k: usize) -> f64 {
    match k {
        0 => 1.0,
        1 => 2.0,
        n => (2.0 * std::f64::consts::PI / n as f64) * unit_ball_volume(n - 2),
    }
}

/// Volume of the `k`-ball of radius `r`.
#[inline]
pub fn ball_volume(k: usize, r: f64) -> f64 {
    unit_ball_volume(k) * r.powi(k as i32)
}

/// Sample uniformly inside the closed `k`-ball of radius `r`, centered at
/// the origin of tangent coordinates.
///
/// Method: sample a uniform direction (normalized Gaussian vector) and an
/// independent radius `r * u^{1/k}` for `u` uniform in `[0,1)`, which gives
/// the correct radial density for a uniform fill of the ball.
pub fn sample_in_ball<R: Rng + ?Sized>(k: usize, r: f64, rng: &mut R) -> DVector<f64> {
    if k == 0 {
        return DVector::zeros(0);
    }
    let mut v = DVector::from_iterator(k, (0..k).map(|_| sample_standard_normal(rng)));
    let norm = v.norm();
    if norm < 1e-300 {
        v[0] = 1.0;
    } else {
        v /= v.norm();
    }
    let u: f64 = rng.gen_range(0.0..1.0);
    let radius = r * u.powf(1.0 / k as f64);
    v * radius
}

fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Box-Muller; avoids pulling in `rand_distr` for a single distribution.
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn unit_ball_volumes_match_known_values() {
        assert!((unit_ball_volume(1) - 2.0).abs() < 1e-12);
        assert!((unit_ball_volume(2) - std::f64::consts::PI).abs() < 1e-12);
        let v3 = 4.0 / 3.0 * std::f64::consts::PI;
        assert!((unit_ball_volume(3) - v3).abs() < 1e-12);
    }

    #[test]
    fn sampled_points_stay_within_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let u = sample_in_ball(4, 0.3, &mut rng);
            assert!(u.norm() <= 0.3 + 1e-9);
        }
    }
}
