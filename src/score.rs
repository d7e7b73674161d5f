//! Error scores comparing predictions with reference responses.

use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};
use crate::math::VectorN;

/// Scores of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub mse: f64,
    pub rmse: f64,
    pub uae: f64,
}

impl Scores {
    /// Computes all scores of `prediction` against `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ.
    pub fn compute(prediction: &VectorN, reference: &VectorN) -> Result<Self> {
        let mse = mse(prediction, reference)?;
        Ok(Self {
            mse,
            rmse: mse.sqrt(),
            uae: uae(prediction, reference)?,
        })
    }
}

fn check_len(prediction: &VectorN, reference: &VectorN) -> Result<()> {
    if prediction.len() == reference.len() {
        Ok(())
    } else {
        Err(EstimatorError::DimensionMismatch {
            expected: reference.len(),
            actual: prediction.len(),
        }
        .into())
    }
}

/// Relative mean squared error `sum (p - r)^2 / sum r^2`.
///
/// An all-zero `reference` is not rejected: the score is `NaN` for a perfect
/// prediction and `inf` otherwise.
///
/// # Errors
///
/// Returns an error if the lengths differ.
pub fn mse(prediction: &VectorN, reference: &VectorN) -> Result<f64> {
    check_len(prediction, reference)?;
    Ok((prediction - reference).norm_squared() / reference.norm_squared())
}

/// Root of [`mse`].
///
/// # Errors
///
/// Returns an error if the lengths differ.
pub fn rmse(prediction: &VectorN, reference: &VectorN) -> Result<f64> {
    Ok(mse(prediction, reference)?.sqrt())
}

/// Uniform absolute error `max |p_i - r_i|`.
///
/// # Errors
///
/// Returns an error if the lengths differ.
pub fn uae(prediction: &VectorN, reference: &VectorN) -> Result<f64> {
    check_len(prediction, reference)?;
    Ok((prediction - reference).amax())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hand_computed_scores() {
        let p = VectorN::from_vec(vec![1.0, 2.0, 2.0]);
        let r = VectorN::from_vec(vec![1.0, 2.0, 4.0]);
        // 4 / 21
        assert_relative_eq!(mse(&p, &r).unwrap(), 4.0 / 21.0);
        assert_relative_eq!(rmse(&p, &r).unwrap(), (4.0f64 / 21.0).sqrt());
        assert_relative_eq!(uae(&p, &r).unwrap(), 2.0);
    }

    #[test]
    fn perfect_prediction() {
        let r = VectorN::from_vec(vec![0.5, -1.0]);
        let s = Scores::compute(&r, &r).unwrap();
        assert_eq!(s.mse, 0.0);
        assert_eq!(s.uae, 0.0);
    }

    #[test]
    fn zero_reference_is_not_finite() {
        let r = VectorN::zeros(3);
        assert!(mse(&r, &r).unwrap().is_nan());
        assert!(mse(&VectorN::from_element(3, 1.0), &r).unwrap().is_infinite());
        assert!(rmse(&r, &r).unwrap().is_nan());
    }

    #[test]
    fn length_mismatch() {
        let p = VectorN::zeros(2);
        let r = VectorN::zeros(3);
        assert!(Scores::compute(&p, &r).is_err());
    }
}
