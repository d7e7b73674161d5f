use tracing::debug;

use crate::error::Result;
use crate::math::VectorN;

use super::{planar, Curve, CurveBase};

/// A piece of the unit circle in the plane of the first two coordinates.
///
/// `P(t) = (cos(t), sin(t), 0, ..., 0)`
///
/// The radius is one, so the angle is already the arc length.
#[derive(Debug, Clone)]
pub struct CirclePiece {
    base: CurveBase,
}

impl CirclePiece {
    /// Creates a new circle piece over the angle range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_features < 2`.
    pub fn new(n_features: usize, start: f64, end: f64) -> Result<Self> {
        CurveBase::require_dim(n_features, "circle", 2)?;
        debug!(n_features, start, end, "circle piece");
        Ok(Self {
            base: CurveBase::new(n_features, start, end, 2),
        })
    }
}

impl Curve for CirclePiece {
    fn base(&self) -> &CurveBase {
        &self.base
    }

    fn basepoint(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        Ok(planar(self.n_features(), t.cos(), t.sin()))
    }

    fn tangent(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        Ok(planar(self.n_features(), -t.sin(), t.cos()))
    }

    fn curvature_vector(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        Ok(planar(self.n_features(), -t.cos(), -t.sin()))
    }
}
