mod circle;
mod helix;
mod identity;
mod s_curve;
mod segments;

pub use circle::CirclePiece;
pub use helix::Helix;
pub use identity::Identity;
pub use s_curve::SCurve;
pub use segments::SegmentCurve;

use crate::error::{GeometryError, Result};
use crate::math::{normal_space, MatrixN, VectorN, TOLERANCE};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns whether `t` lies in the domain, up to [`TOLERANCE`].
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        let (lo, hi) = if self.t_min <= self.t_max {
            (self.t_min, self.t_max)
        } else {
            (self.t_max, self.t_min)
        };
        t >= lo - TOLERANCE && t <= hi + TOLERANCE
    }

    /// Fails with [`GeometryError::ParameterOutOfRange`] if `t` is outside.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is not contained in the domain.
    pub fn check(&self, t: f64) -> Result<()> {
        if self.contains(t) {
            Ok(())
        } else {
            Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into())
        }
    }

    /// Length of the parameter interval.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.t_max - self.t_min).abs()
    }
}

/// State shared by every curve: ambient dimension, domain and plot dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveBase {
    n_features: usize,
    domain: CurveDomain,
    plot_dim: usize,
}

impl CurveBase {
    /// Creates the shared curve state.
    #[must_use]
    pub fn new(n_features: usize, start: f64, end: f64, plot_dim: usize) -> Self {
        Self {
            n_features,
            domain: CurveDomain::new(start, end),
            plot_dim,
        }
    }

    /// Fails unless the ambient dimension is at least `required`.
    pub(crate) fn require_dim(n_features: usize, curve: &'static str, required: usize) -> Result<()> {
        if n_features < required {
            return Err(GeometryError::InsufficientDimension {
                curve,
                required,
                actual: n_features,
            }
            .into());
        }
        Ok(())
    }
}

/// Trait for arc-length parametrized curves embedded in `R^D`.
///
/// All queries validate `t` against [`Curve::domain`] and return
/// [`GeometryError::ParameterOutOfRange`] instead of extrapolating.
pub trait Curve {
    /// Shared state of the curve.
    fn base(&self) -> &CurveBase;

    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn basepoint(&self, t: f64) -> Result<VectorN>;

    /// Unit-speed velocity at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn tangent(&self, t: f64) -> Result<VectorN>;

    /// Second derivative of the basepoint with respect to arc length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotDefined`] for curves without a curvature
    /// vector, or an error if the parameter is out of range.
    fn curvature_vector(&self, t: f64) -> Result<VectorN> {
        let _ = t;
        Err(GeometryError::NotDefined("curvature vector").into())
    }

    /// Orthonormal basis (as columns) of the space orthogonal to the tangent.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn normal(&self, t: f64) -> Result<MatrixN> {
        Ok(normal_space(&self.tangent(t)?))
    }

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain {
        self.base().domain
    }

    /// Start of the parameter domain.
    fn start(&self) -> f64 {
        self.domain().t_min
    }

    /// End of the parameter domain.
    fn end(&self) -> f64 {
        self.domain().t_max
    }

    /// Arc length of the whole curve.
    fn length(&self) -> f64 {
        self.domain().length()
    }

    /// Arc length between two parameters; curves are unit speed.
    fn length_between(&self, t0: f64, t1: f64) -> f64 {
        (t1 - t0).abs()
    }

    /// Ambient dimension `D`.
    fn n_features(&self) -> usize {
        self.base().n_features
    }

    /// Number of coordinates needed to draw the curve (at most 3).
    fn plot_dim(&self) -> usize {
        self.base().plot_dim
    }
}

/// Writes the planar components `(x, y)` into the first two coordinates.
pub(crate) fn planar(n_features: usize, x: f64, y: f64) -> VectorN {
    let mut v = VectorN::zeros(n_features);
    v[0] = x;
    v[1] = y;
    v
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use super::Curve;

    /// Evenly spaced parameters covering the closed domain.
    pub fn sample_params(curve: &dyn Curve, n: usize) -> Vec<f64> {
        let (a, b) = (curve.start(), curve.end());
        (0..n)
            .map(|i| a + (b - a) * i as f64 / (n - 1) as f64)
            .collect()
    }

    pub fn assert_unit_speed(curve: &dyn Curve) {
        for t in sample_params(curve, 41) {
            let speed = curve.tangent(t).unwrap().norm();
            assert!((speed - 1.0).abs() < 1e-9, "speed {speed} at t = {t}");
        }
    }

    pub fn assert_normal_frame(curve: &dyn Curve) {
        for t in sample_params(curve, 17) {
            let tangent = curve.tangent(t).unwrap();
            let normal = curve.normal(t).unwrap();
            assert_eq!(normal.ncols(), curve.n_features() - 1);
            assert!((normal.transpose() * &tangent).norm() < 1e-10);
            let gram = normal.transpose() * &normal;
            let id = nalgebra::DMatrix::identity(normal.ncols(), normal.ncols());
            assert!((gram - id).norm() < 1e-10);
        }
    }

    /// Central differences of the basepoint agree with the tangent.
    pub fn assert_tangent_is_derivative(curve: &dyn Curve) {
        let h = 1e-6;
        for t in sample_params(curve, 23) {
            let (lo, hi) = ((t - h).max(curve.start()), (t + h).min(curve.end()));
            let diff = (curve.basepoint(hi).unwrap() - curve.basepoint(lo).unwrap()) / (hi - lo);
            let tangent = curve.tangent(t).unwrap();
            assert!((diff - tangent).norm() < 1e-5, "t = {t}");
        }
    }

    /// Central differences of the tangent agree with the curvature vector.
    pub fn assert_curvature_is_derivative(curve: &dyn Curve) {
        let h = 1e-6;
        for t in sample_params(curve, 23) {
            let (lo, hi) = ((t - h).max(curve.start()), (t + h).min(curve.end()));
            let diff = (curve.tangent(hi).unwrap() - curve.tangent(lo).unwrap()) / (hi - lo);
            let k = curve.curvature_vector(t).unwrap();
            assert!((diff - k).norm() < 1e-5, "t = {t}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn domain_contains_with_tolerance() {
        let d = CurveDomain::new(0.0, 1.0);
        assert!(d.contains(0.0));
        assert!(d.contains(1.0 + 1e-12));
        assert!(!d.contains(1.1));
        assert!(!d.contains(-0.1));
    }

    #[test]
    fn reversed_domain_length() {
        let d = CurveDomain::new(2.0, -1.0);
        assert!((d.length() - 3.0).abs() < TOLERANCE);
        assert!(d.contains(0.0));
    }

    #[test]
    fn check_reports_out_of_range() {
        let d = CurveDomain::new(0.0, 1.0);
        let err = d.check(2.0).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
