use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::error::Result;
use crate::math::VectorN;

use super::{planar, Curve, CurveBase};

/// Two unit-circle arcs joined into an S shape.
///
/// The caller's parameter is shifted internally, `s = t - pi/2`, so the
/// conventional domain `[0, pi]` maps to `s` in `[-pi/2, pi/2]`:
///
/// * `s <= 0`: `P = (cos(s), sin(s))`
/// * `s > 0`:  `P = (2 - cos(s), sin(s))`
///
/// Both arcs pass through `(1, 0)` with tangent `(0, 1)` at `s = 0`, so the
/// curve is C¹ across the join. The curvature vector flips sign there.
#[derive(Debug, Clone)]
pub struct SCurve {
    base: CurveBase,
}

impl SCurve {
    /// Creates a new S-curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_features < 2`.
    pub fn new(n_features: usize, start: f64, end: f64) -> Result<Self> {
        CurveBase::require_dim(n_features, "scurve", 2)?;
        debug!(n_features, start, end, "s-curve");
        Ok(Self {
            base: CurveBase::new(n_features, start, end, 2),
        })
    }

    fn shifted(&self, t: f64) -> Result<f64> {
        self.domain().check(t)?;
        Ok(t - FRAC_PI_2)
    }
}

impl Curve for SCurve {
    fn base(&self) -> &CurveBase {
        &self.base
    }

    fn basepoint(&self, t: f64) -> Result<VectorN> {
        let s = self.shifted(t)?;
        let x = if s <= 0.0 { s.cos() } else { 2.0 - s.cos() };
        Ok(planar(self.n_features(), x, s.sin()))
    }

    fn tangent(&self, t: f64) -> Result<VectorN> {
        let s = self.shifted(t)?;
        let dx = if s <= 0.0 { -s.sin() } else { s.sin() };
        Ok(planar(self.n_features(), dx, s.cos()))
    }

    fn curvature_vector(&self, t: f64) -> Result<VectorN> {
        let s = self.shifted(t)?;
        let ddx = if s <= 0.0 { -s.cos() } else { s.cos() };
        Ok(planar(self.n_features(), ddx, -s.sin()))
    }
}
