use tracing::debug;

use crate::error::Result;
use crate::math::VectorN;

use super::{Curve, CurveBase};

/// A circular helix around the third coordinate axis.
///
/// `P(t) = (a * cos(alpha * t), a * sin(alpha * t), alpha * b * t, 0, ...)`
/// with `alpha = 1 / sqrt(a^2 + b^2)`, which makes the curve unit speed.
#[derive(Debug, Clone)]
pub struct Helix {
    base: CurveBase,
    radius: f64,
    pitch: f64,
    alpha: f64,
}

impl Helix {
    /// Default radius used by the manifold factory.
    pub const DEFAULT_RADIUS: f64 = 1.0;
    /// Default pitch used by the manifold factory.
    pub const DEFAULT_PITCH: f64 = 1.0;

    /// Creates a new helix.
    ///
    /// Radius and pitch are trusted; `a^2 + b^2` must not vanish.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_features < 3`.
    pub fn new(n_features: usize, start: f64, end: f64, radius: f64, pitch: f64) -> Result<Self> {
        CurveBase::require_dim(n_features, "helix", 3)?;
        let alpha = 1.0 / radius.hypot(pitch);
        debug!(n_features, start, end, radius, pitch, alpha, "helix");
        Ok(Self {
            base: CurveBase::new(n_features, start, end, 3),
            radius,
            pitch,
            alpha,
        })
    }

    /// Returns the radius `a`.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the pitch `b`.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Returns the arc-length scaling `alpha`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn spatial(&self, x: f64, y: f64, z: f64) -> VectorN {
        let mut v = VectorN::zeros(self.n_features());
        v[0] = x;
        v[1] = y;
        v[2] = z;
        v
    }
}

impl Curve for Helix {
    fn base(&self) -> &CurveBase {
        &self.base
    }

    fn basepoint(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        let (sin, cos) = (self.alpha * t).sin_cos();
        Ok(self.spatial(
            self.radius * cos,
            self.radius * sin,
            self.alpha * self.pitch * t,
        ))
    }

    fn tangent(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        let (sin, cos) = (self.alpha * t).sin_cos();
        let r = self.radius * self.alpha;
        Ok(self.spatial(-r * sin, r * cos, self.alpha * self.pitch))
    }

    fn curvature_vector(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        let (sin, cos) = (self.alpha * t).sin_cos();
        let r = self.radius * self.alpha * self.alpha;
        // The axial velocity is constant, so the axial component vanishes.
        Ok(self.spatial(-r * cos, -r * sin, 0.0))
    }
}
