use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::math::{MatrixN, VectorN};

use super::{Curve, CurveBase};

/// A curve stitched together from signed quarter circles.
///
/// The curve is described by a sequence `[(s_0, k_0), ..., (s_n, k_n)]` of
/// signs and axis indices. Segment `j` is a unit quarter circle that leaves
/// along `s_j * e_{k_j}` and arrives along `s_{j+1} * e_{k_{j+1}}`:
///
/// `P(t) = a_j + s_i sin(tau) e_i + s_j (1 - cos(tau)) e_j`,
/// `tau = t - j * pi/2`,
///
/// where `a_j` is the start of segment `j`. The domain is `[0, n * pi/2]` and
/// the curve starts at the origin.
///
/// For example `[(1, 0), (1, 1), (-1, 0), (-1, 1)]` traces three quarters of
/// a circle in the 0/1 plane.
///
/// Consecutive entries are expected to describe perpendicular directions
/// (distinct axes). This is not checked. When a segment reuses its axis
/// (`k_j == k_{j+1}`), [`Curve::basepoint`] adds both terms to that
/// coordinate while [`Curve::tangent`] and [`Curve::curvature_vector`] keep
/// only the second one, so the tangent is no longer the derivative of the
/// basepoint on that segment.
#[derive(Debug, Clone)]
pub struct SegmentCurve {
    base: CurveBase,
    sequence: Vec<(f64, usize)>,
    /// Column `j` is the start point `a_j` of segment `j`.
    translations: MatrixN,
}

impl SegmentCurve {
    /// Builds the curve from a `(sign, axis)` sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence has fewer than two entries or names an
    /// axis outside `0..n_features`.
    pub fn new(sequence: Vec<(f64, usize)>, n_features: usize) -> Result<Self> {
        if sequence.len() < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "sequence",
                reason: format!("needs at least two entries, got {}", sequence.len()),
            }
            .into());
        }
        if let Some(&(_, axis)) = sequence.iter().find(|(_, axis)| *axis >= n_features) {
            return Err(ConfigError::InvalidParameter {
                name: "sequence",
                reason: format!("axis {axis} outside ambient dimension {n_features}"),
            }
            .into());
        }

        let n_segments = sequence.len() - 1;
        let mut translations = MatrixN::zeros(n_features, n_segments);
        for j in 1..n_segments {
            let previous = translations.column(j - 1).clone_owned();
            translations.set_column(j, &previous);
            let (s_prev, k_prev) = sequence[j - 1];
            let (s_cur, k_cur) = sequence[j];
            translations[(k_prev, j)] += s_prev;
            translations[(k_cur, j)] += s_cur;
        }

        let distinct_axes = sequence.iter().map(|(_, axis)| *axis).collect::<BTreeSet<_>>().len();
        #[allow(clippy::cast_precision_loss)]
        let end = n_segments as f64 * FRAC_PI_2;
        debug!(n_features, n_segments, distinct_axes, "segment curve");

        Ok(Self {
            base: CurveBase::new(n_features, 0.0, end, distinct_axes.min(3)),
            sequence,
            translations,
        })
    }

    /// Returns the number of quarter-circle segments.
    #[must_use]
    pub fn n_segments(&self) -> usize {
        self.translations.ncols()
    }

    /// Returns the `(sign, axis)` sequence.
    #[must_use]
    pub fn sequence(&self) -> &[(f64, usize)] {
        &self.sequence
    }

    /// Start points of the segments, one column per segment.
    #[must_use]
    pub fn translations(&self) -> &MatrixN {
        &self.translations
    }

    /// Locates `t`: segment index, local angle and the two `(sign, axis)` pairs.
    ///
    /// The closing parameter `n * pi/2` belongs to the last segment.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn locate(&self, t: f64) -> Result<(usize, f64, (f64, usize), (f64, usize))> {
        self.domain().check(t)?;
        let seg = ((t / FRAC_PI_2).floor().max(0.0) as usize).min(self.n_segments() - 1);
        let tau = t - seg as f64 * FRAC_PI_2;
        Ok((seg, tau, self.sequence[seg], self.sequence[seg + 1]))
    }
}

impl Curve for SegmentCurve {
    fn base(&self) -> &CurveBase {
        &self.base
    }

    fn basepoint(&self, t: f64) -> Result<VectorN> {
        let (seg, tau, (s_i, e_i), (s_j, e_j)) = self.locate(t)?;
        let mut v = self.translations.column(seg).clone_owned();
        v[e_i] += s_i * tau.sin();
        v[e_j] += s_j * (1.0 - tau.cos());
        Ok(v)
    }

    fn tangent(&self, t: f64) -> Result<VectorN> {
        let (_, tau, (s_i, e_i), (s_j, e_j)) = self.locate(t)?;
        let mut v = VectorN::zeros(self.n_features());
        v[e_i] = s_i * tau.cos();
        v[e_j] = s_j * tau.sin();
        Ok(v)
    }

    fn curvature_vector(&self, t: f64) -> Result<VectorN> {
        let (_, tau, (s_i, e_i), (s_j, e_j)) = self.locate(t)?;
        let mut v = VectorN::zeros(self.n_features());
        v[e_i] = -s_i * tau.sin();
        v[e_j] = s_j * tau.cos();
        Ok(v)
    }
}
