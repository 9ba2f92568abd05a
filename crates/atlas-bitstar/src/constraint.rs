//! The implicit manifold: a user-supplied constraint function and Jacobian.
//!
//! `F: R^n -> R^m` is assumed smooth and evaluable without side effects; the
//! manifold is its zero set, of dimension `k = n - m` (spec §3). The atlas
//! never assumes a concrete `F`; it is injected as a collaborator, matching
//! the teacher's pattern of passing `GeomCfg`/`SearchCfg` rather than baking
//! tolerances into the types that use them.

use nalgebra::{DMatrix, DVector};

/// Equality-constraint function defining the manifold `{x : F(x) = 0}`.
pub trait ConstraintFunction {
    /// Ambient dimension `n`.
    fn ambient_dim(&self) -> usize;
    /// Co-dimension `m` (number of scalar constraints).
    fn co_dim(&self) -> usize;
    /// Evaluate `F(x) in R^m`.
    fn eval(&self, x: &DVector<f64>) -> DVector<f64>;
    /// Evaluate the Jacobian `J(x) in R^{m x n}`.
    fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64>;

    /// Manifold dimension `k = n - m`.
    fn manifold_dim(&self) -> usize {
        self.ambient_dim() - self.co_dim()
    }
}

/// `F(x) = ||x|| - 1`: the unit sphere in `R^n`. Used by the demo crate and
/// by this crate's own integration tests (spec §8 scenario 1).
pub struct UnitSphere {
    dim: usize,
}

impl UnitSphere {
    pub fn new(dim: usize) -> Self {
        assert!(dim >= 2, "unit sphere needs ambient dimension >= 2");
        Self { dim }
    }
}

impl ConstraintFunction for UnitSphere {
    fn ambient_dim(&self) -> usize {
        self.dim
    }
    fn co_dim(&self) -> usize {
        1
    }
    fn eval(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::from_element(1, x.norm() - 1.0)
    }
    fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        let norm = x.norm();
        let row = if norm > 1e-14 {
            x.transpose() / norm
        } else {
            x.transpose()
        };
        DMatrix::from_row_slice(1, self.dim, row.as_slice())
    }
}
