//! Tunable parameters shared by the atlas and its sampling/traversal machinery.
//!
//! Mirrors the teacher's tolerance-bundle pattern (`GeomCfg`, `SearchCfg`):
//! a small `Copy` struct with a `Default`, passed explicitly rather than
//! squirreled away behind global state.

/// Atlas configuration table (spec §6).
#[derive(Clone, Copy, Debug)]
pub struct AtlasParams {
    /// Geodesic step length and collision-checking granularity.
    pub delta: f64,
    /// Max chart-to-manifold distance tolerated inside a chart's validity region.
    pub epsilon: f64,
    /// Max chart radius; may shrink at runtime when a chart is found too curved.
    pub rho: f64,
    /// Max allowed angle (radians) between a chart's tangent basis and the
    /// manifold's true tangent space at a sampled point.
    pub alpha: f64,
    /// 0 = sample only inside `rho` (refine existing coverage); 1 (exclusive)
    /// = sample out at the frontier to encourage new chart creation.
    pub exploration: f64,
    /// Traversal distance budget multiplier relative to the straight-line
    /// ambient distance.
    pub lambda: f64,
    /// Newton halt criterion: ||F(x)|| <= projection_tolerance.
    pub projection_tolerance: f64,
    /// Newton iteration cap.
    pub projection_max_iterations: u32,
    /// Monte-Carlo sample count scales as `thoroughness ^ k` for a
    /// `k`-dimensional chart.
    pub monte_carlo_thoroughness: f64,
}

impl Default for AtlasParams {
    fn default() -> Self {
        Self {
            delta: 0.02,
            epsilon: 0.1,
            rho: 0.1,
            alpha: std::f64::consts::FRAC_PI_2 / 8.0,
            exploration: 0.5,
            lambda: 2.0,
            projection_tolerance: 1e-8,
            projection_max_iterations: 200,
            monte_carlo_thoroughness: 3.5,
        }
    }
}

impl AtlasParams {
    /// Validate the ranges documented in spec §6. Called once by
    /// `AtlasStateSpace::new`; not re-checked on every access.
    pub(crate) fn validate(&self) -> Result<(), ParamError> {
        fn positive(name: &'static str, v: f64) -> Result<(), ParamError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ParamError::OutOfRange { name, value: v })
            }
        }
        positive("delta", self.delta)?;
        positive("epsilon", self.epsilon)?;
        positive("rho", self.rho)?;
        positive("projection_tolerance", self.projection_tolerance)?;
        positive("monte_carlo_thoroughness", self.monte_carlo_thoroughness)?;
        if !(self.alpha > 0.0 && self.alpha < std::f64::consts::FRAC_PI_2) {
            return Err(ParamError::OutOfRange {
                name: "alpha",
                value: self.alpha,
            });
        }
        if !(self.exploration >= 0.0 && self.exploration < 1.0) {
            return Err(ParamError::OutOfRange {
                name: "exploration",
                value: self.exploration,
            });
        }
        if !(self.lambda > 1.0) {
            return Err(ParamError::OutOfRange {
                name: "lambda",
                value: self.lambda,
            });
        }
        if self.projection_max_iterations < 1 {
            return Err(ParamError::OutOfRange {
                name: "projection_max_iterations",
                value: self.projection_max_iterations as f64,
            });
        }
        Ok(())
    }

    /// Bounding-ball radius used when sampling at the frontier: blends `rho`
    /// with a larger radius as `exploration -> 1` (spec §4.4.1 step 2).
    pub(crate) fn sampling_radius(&self) -> f64 {
        // exploration in [0,1): rho at 0, up to 2*rho as exploration -> 1.
        self.rho * (1.0 + self.exploration)
    }
}

/// Invalid atlas configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamError {
    OutOfRange { name: &'static str, value: f64 },
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::OutOfRange { name, value } => {
                write!(f, "atlas param `{name}` out of valid range (got {value})")
            }
        }
    }
}

impl std::error::Error for ParamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        AtlasParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_exploration() {
        let mut p = AtlasParams::default();
        p.exploration = 1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_delta() {
        let mut p = AtlasParams::default();
        p.delta = 0.0;
        assert!(p.validate().is_err());
    }
}
