//! k-nearest-neighbour regression with the benchmark's neighbour-count rule.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EstimatorError, Result};
use crate::math::{MatrixN, VectorN};

/// How the configured neighbour count is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborMode {
    /// The count is used as is.
    #[default]
    Absolute,
    /// The count is a factor scaled by `N^(2 / (2 + D))`.
    Factor,
}

/// Number of neighbours for `n_samples` training points in dimension `dim`.
///
/// In [`NeighborMode::Factor`] this is `floor(n_neighbors * N^(2/(2+D)))`,
/// otherwise `floor(n_neighbors)`. The result is clamped to `[1, N]`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn neighbor_count(mode: NeighborMode, n_neighbors: f64, n_samples: usize, dim: usize) -> usize {
    let raw = match mode {
        NeighborMode::Absolute => n_neighbors.floor(),
        NeighborMode::Factor => {
            let exponent = 2.0 / (2.0 + dim as f64);
            (n_neighbors * (n_samples as f64).powf(exponent)).floor()
        }
    };
    let upper = n_samples.max(1);
    let k = (raw.max(0.0) as usize).clamp(1, upper);
    if raw < 1.0 || raw > upper as f64 {
        warn!(raw, k, n_samples, "neighbour count clamped");
    }
    k
}

/// Brute-force k-nearest-neighbour regressor.
///
/// Samples are the columns of the input matrices. Predictions average the
/// responses of the `k` training points closest in Euclidean distance.
#[derive(Debug, Clone)]
pub struct KnnRegressor {
    n_neighbors: usize,
    train: Option<(MatrixN, VectorN)>,
}

impl KnnRegressor {
    /// Creates an unfitted regressor using `n_neighbors` neighbours.
    #[must_use]
    pub fn new(n_neighbors: usize) -> Self {
        Self {
            n_neighbors: n_neighbors.max(1),
            train: None,
        }
    }

    /// Returns the number of neighbours averaged per prediction.
    #[must_use]
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Stores the training set.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty or `y` does not have one
    /// response per column of `x`.
    pub fn fit(&mut self, x: &MatrixN, y: &VectorN) -> Result<&mut Self> {
        if x.ncols() == 0 {
            return Err(EstimatorError::EmptyTrainingSet.into());
        }
        if y.len() != x.ncols() {
            return Err(EstimatorError::DimensionMismatch {
                expected: x.ncols(),
                actual: y.len(),
            }
            .into());
        }
        debug!(
            n_samples = x.ncols(),
            dim = x.nrows(),
            k = self.n_neighbors,
            "fit knn"
        );
        self.train = Some((x.clone(), y.clone()));
        Ok(self)
    }

    /// Predicts the response for every column of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the regressor is not fitted or `x` has the wrong
    /// number of rows.
    #[allow(clippy::cast_precision_loss)]
    pub fn predict(&self, x: &MatrixN) -> Result<VectorN> {
        let (train_x, train_y) = self.train.as_ref().ok_or(EstimatorError::NotFitted)?;
        if x.nrows() != train_x.nrows() {
            return Err(EstimatorError::DimensionMismatch {
                expected: train_x.nrows(),
                actual: x.nrows(),
            }
            .into());
        }

        let k = self.n_neighbors.min(train_x.ncols());
        let mut distances: Vec<(f64, usize)> = Vec::with_capacity(train_x.ncols());
        let mut prediction = VectorN::zeros(x.ncols());
        for (q, query) in x.column_iter().enumerate() {
            distances.clear();
            distances.extend(
                train_x
                    .column_iter()
                    .enumerate()
                    .map(|(i, p)| ((p - query).norm_squared(), i)),
            );
            if k < distances.len() {
                distances.select_nth_unstable_by(k - 1, |a, b| {
                    a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
                });
            }
            let sum: f64 = distances[..k].iter().map(|&(_, i)| train_y[i]).sum();
            prediction[q] = sum / k as f64;
        }
        Ok(prediction)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn line_data() -> (MatrixN, VectorN) {
        let x = MatrixN::from_row_slice(1, 5, &[0.0, 1.0, 2.0, 3.0, 4.0]);
        let y = VectorN::from_vec(vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        (x, y)
    }

    #[test]
    fn factor_mode_scales_with_sample_size() {
        // 2 * 16^(2/4) = 8
        assert_eq!(neighbor_count(NeighborMode::Factor, 2.0, 16, 2), 8);
        // 0.5 * 4000^(2/6) = 7.93...
        assert_eq!(neighbor_count(NeighborMode::Factor, 0.5, 4000, 4), 7);
    }

    #[test]
    fn absolute_mode_is_identity() {
        assert_eq!(neighbor_count(NeighborMode::Absolute, 5.0, 100, 8), 5);
    }

    #[test]
    fn neighbor_count_is_clamped() {
        assert_eq!(neighbor_count(NeighborMode::Absolute, 0.0, 100, 8), 1);
        assert_eq!(neighbor_count(NeighborMode::Absolute, 50.0, 10, 8), 10);
    }

    #[test]
    fn one_neighbor_reproduces_training_responses() {
        let (x, y) = line_data();
        let mut knn = KnnRegressor::new(1);
        knn.fit(&x, &y).unwrap();
        let p = knn.predict(&x).unwrap();
        assert_eq!(p, y);
    }

    #[test]
    fn averages_nearest_responses() {
        let (x, y) = line_data();
        let mut knn = KnnRegressor::new(2);
        knn.fit(&x, &y).unwrap();
        let q = MatrixN::from_row_slice(1, 2, &[0.4, 3.6]);
        let p = knn.predict(&q).unwrap();
        assert!((p[0] - 5.0).abs() < 1e-12);
        assert!((p[1] - 35.0).abs() < 1e-12);
    }

    #[test]
    fn more_neighbors_than_samples_uses_all() {
        let (x, y) = line_data();
        let mut knn = KnnRegressor::new(10);
        knn.fit(&x, &y).unwrap();
        let p = knn.predict(&MatrixN::from_row_slice(1, 1, &[100.0])).unwrap();
        assert!((p[0] - 20.0).abs() < 1e-12);
    }

    #[test]
    fn predict_before_fit_fails() {
        let knn = KnnRegressor::new(3);
        assert!(matches!(
            knn.predict(&MatrixN::zeros(2, 1)),
            Err(Error::Estimator(EstimatorError::NotFitted))
        ));
    }

    #[test]
    fn shape_errors() {
        let mut knn = KnnRegressor::new(1);
        assert!(knn.fit(&MatrixN::zeros(2, 0), &VectorN::zeros(0)).is_err());
        assert!(knn.fit(&MatrixN::zeros(2, 3), &VectorN::zeros(2)).is_err());
        knn.fit(&MatrixN::zeros(2, 3), &VectorN::zeros(3)).unwrap();
        assert!(knn.predict(&MatrixN::zeros(3, 1)).is_err());
    }
}
