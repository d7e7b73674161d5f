use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::math::VectorN;

use super::{Curve, CurveBase};

/// A straight line along the diagonal of the first `k` coordinates.
///
/// `P(t) = (t, ..., t, 0, ..., 0) / sqrt(k)`
///
/// The `1/sqrt(k)` factor makes the line unit speed. This is the
/// single-index model baseline: the response depends on the covariates only
/// through the projection onto this direction. It has no curvature vector.
#[derive(Debug, Clone)]
pub struct Identity {
    base: CurveBase,
    n_active: usize,
}

impl Identity {
    /// Creates a new identity curve.
    ///
    /// # Arguments
    ///
    /// * `n_features` - Ambient dimension `D`
    /// * `start`, `end` - Parameter domain
    /// * `n_active_features` - Number of active coordinates `k`, defaults to `D`
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is zero or exceeds `D`.
    pub fn new(
        n_features: usize,
        start: f64,
        end: f64,
        n_active_features: Option<usize>,
    ) -> Result<Self> {
        let n_active = n_active_features.unwrap_or(n_features);
        if n_active == 0 || n_active > n_features {
            return Err(ConfigError::InvalidParameter {
                name: "n_active_features",
                reason: format!("must lie in 1..={n_features}, got {n_active}"),
            }
            .into());
        }
        debug!(n_features, n_active, start, end, "identity curve");
        Ok(Self {
            base: CurveBase::new(n_features, start, end, n_active.min(3)),
            n_active,
        })
    }

    /// Returns the number of active coordinates.
    #[must_use]
    pub fn n_active_features(&self) -> usize {
        self.n_active
    }

    #[allow(clippy::cast_precision_loss)]
    fn diagonal(&self, value: f64) -> VectorN {
        let mut v = VectorN::zeros(self.base.n_features);
        let scale = (self.n_active as f64).sqrt();
        v.rows_mut(0, self.n_active).fill(value / scale);
        v
    }
}

impl Curve for Identity {
    fn base(&self) -> &CurveBase {
        &self.base
    }

    fn basepoint(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        Ok(self.diagonal(t))
    }

    fn tangent(&self, t: f64) -> Result<VectorN> {
        self.domain().check(t)?;
        Ok(self.diagonal(1.0))
    }
}
