//! Noisy point clouds around a curve.
//!
//! A sample is drawn by picking `t` uniformly in the curve's domain and
//! displacing `basepoint(t)` inside the normal space by a vector that is
//! uniform in the `l2` ball of radius `sigma_x` (the "l2 tube" around the
//! curve). The response is `f(t)` plus Gaussian noise of standard deviation
//! `sigma_f`.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Curve;
use crate::math::{MatrixN, VectorN};

/// Noise levels for sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleOptions {
    /// Radius of the tube around the curve.
    pub sigma_x: f64,
    /// Standard deviation of the response noise.
    pub sigma_f: f64,
}

/// Samples around a curve, stored column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    /// Curve parameters the samples were drawn at.
    pub params: VectorN,
    /// Sample points, one column per sample.
    pub points: MatrixN,
    /// Responses, one per sample.
    pub values: VectorN,
}

impl SampleSet {
    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the set holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Splits into the first `n` samples and the rest.
    ///
    /// `n` is clamped to the number of samples.
    #[must_use]
    pub fn split_at(&self, n: usize) -> (Self, Self) {
        let n = n.min(self.len());
        let rest = self.len() - n;
        let head = Self {
            params: self.params.rows(0, n).clone_owned(),
            points: self.points.columns(0, n).clone_owned(),
            values: self.values.rows(0, n).clone_owned(),
        };
        let tail = Self {
            params: self.params.rows(n, rest).clone_owned(),
            points: self.points.columns(n, rest).clone_owned(),
            values: self.values.rows(n, rest).clone_owned(),
        };
        (head, tail)
    }
}

/// Draws `n` samples in the `l2` tube of radius `options.sigma_x` around
/// `curve`, with responses `f(t)` perturbed by `options.sigma_f`.
///
/// # Errors
///
/// Returns an error if a curve query fails.
#[allow(clippy::cast_precision_loss)]
pub fn sample_curve<C, F, R>(
    curve: &C,
    f: F,
    n: usize,
    options: &SampleOptions,
    rng: &mut R,
) -> Result<SampleSet>
where
    C: Curve + ?Sized,
    F: Fn(f64) -> f64,
    R: Rng,
{
    let dim = curve.n_features();
    let (start, end) = (curve.start(), curve.end());
    let mut params = VectorN::zeros(n);
    let mut points = MatrixN::zeros(dim, n);
    let mut values = VectorN::zeros(n);

    for i in 0..n {
        let t = start + (end - start) * rng.random::<f64>();
        let mut point = curve.basepoint(t)?;
        if options.sigma_x > 0.0 {
            let normal = curve.normal(t)?;
            let m = normal.ncols();
            if m > 0 {
                let direction = VectorN::from_fn(m, |_, _| rng.sample::<f64, _>(StandardNormal));
                let norm = direction.norm();
                if norm > 0.0 {
                    let radius = options.sigma_x * rng.random::<f64>().powf(1.0 / m as f64);
                    point += normal * (direction * (radius / norm));
                }
            }
        }
        let noise = if options.sigma_f > 0.0 {
            options.sigma_f * rng.sample::<f64, _>(StandardNormal)
        } else {
            0.0
        };
        params[i] = t;
        points.set_column(i, &point);
        values[i] = f(t) + noise;
    }

    Ok(SampleSet {
        params,
        points,
        values,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{get_manifold, ManifoldParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    #[test]
    fn samples_stay_in_tube() {
        let curve = get_manifold(5, "scurve", &ManifoldParams::with_domain(0.0, PI)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let options = SampleOptions {
            sigma_x: 0.25,
            sigma_f: 0.0,
        };
        let set = sample_curve(&curve, f64::sin, 200, &options, &mut rng).unwrap();
        assert_eq!(set.len(), 200);
        assert_eq!(set.points.nrows(), 5);
        for i in 0..set.len() {
            let t = set.params[i];
            assert!((0.0..=PI).contains(&t));
            let offset = set.points.column(i) - curve.basepoint(t).unwrap();
            assert!(offset.norm() <= 0.25 + 1e-12);
            assert!(offset.dot(&curve.tangent(t).unwrap()).abs() < 1e-10);
            assert!((set.values[i] - t.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn noise_free_points_lie_on_curve() {
        let curve = get_manifold(3, "helix", &ManifoldParams::with_domain(0.0, 2.0 * PI)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let options = SampleOptions {
            sigma_x: 0.0,
            sigma_f: 0.0,
        };
        let set = sample_curve(&curve, |t| t * t, 20, &options, &mut rng).unwrap();
        for i in 0..set.len() {
            let on_curve = curve.basepoint(set.params[i]).unwrap();
            assert!((set.points.column(i) - on_curve).norm() < 1e-12);
        }
    }

    #[test]
    fn response_noise_is_applied() {
        let curve = get_manifold(2, "circle", &ManifoldParams::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let options = SampleOptions {
            sigma_x: 0.0,
            sigma_f: 0.5,
        };
        let set = sample_curve(&curve, |_| 0.0, 500, &options, &mut rng).unwrap();
        let var = set.values.iter().map(|v| v * v).sum::<f64>() / 500.0;
        assert!(var > 0.15 && var < 0.35, "variance {var}");
    }

    #[test]
    fn same_seed_same_samples() {
        let curve = get_manifold(4, "identity", &ManifoldParams::default()).unwrap();
        let options = SampleOptions {
            sigma_x: 0.1,
            sigma_f: 0.1,
        };
        let a = sample_curve(&curve, |t| t, 10, &options, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = sample_curve(&curve, |t| t, 10, &options, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn split_keeps_order() {
        let curve = get_manifold(2, "circle", &ManifoldParams::default()).unwrap();
        let options = SampleOptions {
            sigma_x: 0.0,
            sigma_f: 0.0,
        };
        let set = sample_curve(&curve, |t| t, 10, &options, &mut StdRng::seed_from_u64(5)).unwrap();
        let (head, tail) = set.split_at(7);
        assert_eq!(head.len(), 7);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail.params[0], set.params[7]);
        assert_eq!(tail.points.column(2), set.points.column(9));
        let (all, none) = set.split_at(20);
        assert_eq!(all.len(), 10);
        assert!(none.is_empty());
    }
}
