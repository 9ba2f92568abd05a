//! C1: `ChartTangentFrame` — orthonormal basis of the manifold tangent plane.
//!
//! Computes a basis `B` of `null(J(x0))` via SVD, following the teacher's
//! practice of leaning on `nalgebra::SVD` and inspecting singular values
//! directly (`geom2::solvers::{rotation_angle, fixed_point_in_poly}`) rather
//! than reaching for a higher-level decomposition crate.

use nalgebra::{DMatrix, SymmetricEigen, SVD};

use crate::constraint::ConstraintFunction;
use crate::error::ProjectionError;

/// Relative threshold (fraction of the largest singular value) below which a
/// singular value of `J` is treated as zero.
const RANK_TOLERANCE_REL: f64 = 1e-9;

/// Compute an `n x k` orthonormal basis `B` with `B^T B = I_k` and
/// `J(x0) B = 0` (within the projection tolerance), where `k = n - m`.
///
/// Method: the row space of `J` is spanned by the (thin) right singular
/// vectors returned by `SVD::new`. The null space is its orthogonal
/// complement, recovered as the top-`k` eigenvectors of the symmetric
/// projector `I - V1 V1^T` (eigenvalue 1 for null-space directions,
/// eigenvalue 0 for row-space directions). This avoids requiring a
/// full-rank QR/SVD decomposition while staying purely SVD/eigen-based.
pub fn tangent_basis(
    constraint: &dyn ConstraintFunction,
    x0: &nalgebra::DVector<f64>,
) -> Result<DMatrix<f64>, ProjectionError> {
    let n = constraint.ambient_dim();
    let m = constraint.co_dim();
    let k = constraint.manifold_dim();
    debug_assert_eq!(x0.len(), n);

    if m == 0 {
        return Ok(DMatrix::identity(n, n));
    }

    let j = constraint.jacobian(x0);
    debug_assert_eq!((j.nrows(), j.ncols()), (m, n));

    let svd = SVD::new(j, false, true);
    let v_t = svd
        .v_t
        .ok_or(ProjectionError::RankDeficientJacobian)?;
    let singular_values = svd.singular_values;
    let max_sv = singular_values.iter().cloned().fold(0.0_f64, f64::max);
    let min_sv = singular_values.iter().cloned().fold(f64::INFINITY, f64::min);
    if max_sv <= 0.0 || min_sv < RANK_TOLERANCE_REL * max_sv.max(1.0) {
        return Err(ProjectionError::RankDeficientJacobian);
    }

    let v1 = v_t.transpose(); // n x m, orthonormal columns spanning row(J)
    let projector = DMatrix::identity(n, n) - &v1 * v1.transpose();
    let eigen = SymmetricEigen::new(projector);

    // Sort eigenpairs by eigenvalue descending; the top-k (eigenvalue ~= 1)
    // span the null space.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut basis = DMatrix::zeros(n, k);
    for (col, &idx) in order.iter().take(k).enumerate() {
        basis.set_column(col, &eigen.eigenvectors.column(idx));
    }
    Ok(basis)
}
