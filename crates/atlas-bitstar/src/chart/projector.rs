//! C3: `ManifoldProjector` — Newton/pseudoinverse projection onto `F(x)=0`.
//!
//! Purely functional: never mutates atlas state (spec §4.2). Iterates
//! `x <- x - J(x)+ F(x)` where `J+` is the Moore-Penrose pseudoinverse,
//! computed from an explicit SVD exactly as the teacher inspects singular
//! values in `fixed_point_in_poly` rather than calling a black-box solver.

use nalgebra::{DMatrix, DVector, SVD};

use crate::config::AtlasParams;
use crate::constraint::ConstraintFunction;
use crate::error::ProjectionError;

const RANK_TOLERANCE_REL: f64 = 1e-9;

/// Project `x_guess` onto `{x : F(x) = 0}` via damped-free Gauss-Newton.
pub fn project(
    constraint: &dyn ConstraintFunction,
    x_guess: &DVector<f64>,
    params: &AtlasParams,
) -> Result<DVector<f64>, ProjectionError> {
    let mut x = x_guess.clone();
    for _ in 0..params.projection_max_iterations {
        let f = constraint.eval(&x);
        if f.norm() <= params.projection_tolerance {
            return Ok(x);
        }
        let j = constraint.jacobian(&x);
        let step = pseudo_inverse_apply(&j, &f)?;
        x -= step;
    }
    let f = constraint.eval(&x);
    if f.norm() <= params.projection_tolerance {
        Ok(x)
    } else {
        Err(ProjectionError::MaxIterationsExceeded)
    }
}

/// Solve `J+ * f` for the minimum-norm least-squares step, detecting rank
/// deficiency rather than silently truncating it away.
fn pseudo_inverse_apply(j: &DMatrix<f64>, f: &DVector<f64>) -> Result<DVector<f64>, ProjectionError> {
    let svd = SVD::new(j.clone(), true, true);
    let u = svd.u.ok_or(ProjectionError::RankDeficientJacobian)?;
    let v_t = svd.v_t.ok_or(ProjectionError::RankDeficientJacobian)?;
    let s = svd.singular_values;

    let max_sv = s.iter().cloned().fold(0.0_f64, f64::max);
    if max_sv <= 0.0 {
        return Err(ProjectionError::RankDeficientJacobian);
    }
    let tol = RANK_TOLERANCE_REL * max_sv.max(1.0);
    if s.iter().cloned().fold(f64::INFINITY, f64::min) < tol {
        return Err(ProjectionError::RankDeficientJacobian);
    }

    // step = V * diag(1/s) * U^T * f
    let ut_f = u.transpose() * f;
    let scaled: DVector<f64> = DVector::from_iterator(
        s.len(),
        ut_f.iter().zip(s.iter()).map(|(&a, &sv)| a / sv),
    );
    Ok(v_t.transpose() * scaled)
}
