//! Sequential benchmark driver: sample a manifold, fit kNN, score.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, Result};
use crate::estimator::{neighbor_count, KnnRegressor, NeighborMode};
use crate::geometry::{build_manifold, ManifoldId, ManifoldParams};
use crate::math::VectorN;
use crate::sampling::{sample_curve, SampleOptions, SampleSet};
use crate::score::Scores;

fn default_n_test_samples() -> usize {
    1000
}

/// A single benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub manifold: ManifoldId,
    #[serde(default)]
    pub manifold_params: ManifoldParams,
    /// Number of training plus cross-validation samples `N`.
    pub n_samples: usize,
    /// Ambient dimension `D`.
    pub ambient_dim: usize,
    pub sigma_x: f64,
    #[serde(default)]
    pub sigma_f: f64,
    /// Fraction of the `N` samples held out for cross-validation.
    #[serde(default)]
    pub cv_split: f64,
    #[serde(default = "default_n_test_samples")]
    pub n_test_samples: usize,
    #[serde(default)]
    pub neighbor_mode: NeighborMode,
    pub n_neighbors: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub repetition: usize,
}

impl ExperimentConfig {
    /// Checks ranges the driver relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for zero sample counts, a
    /// `cv_split` outside `[0, 1)`, or negative noise levels.
    pub fn validate(&self) -> Result<()> {
        let invalid = |name: &'static str, reason: &str| -> Result<()> {
            Err(ConfigError::InvalidParameter {
                name,
                reason: reason.to_owned(),
            }
            .into())
        };
        if self.n_samples == 0 {
            return invalid("n_samples", "must be positive");
        }
        if self.n_test_samples == 0 {
            return invalid("n_test_samples", "must be positive");
        }
        if !(0.0..1.0).contains(&self.cv_split) {
            return invalid("cv_split", "must lie in [0, 1)");
        }
        if !(self.sigma_x >= 0.0) {
            return invalid("sigma_x", "must be non-negative");
        }
        if !(self.sigma_f >= 0.0) {
            return invalid("sigma_f", "must be non-negative");
        }
        if !(self.n_neighbors >= 0.0) {
            return invalid("n_neighbors", "must be non-negative");
        }
        Ok(())
    }

    /// Number of samples held out for cross-validation.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn n_cv_samples(&self) -> usize {
        (self.cv_split * self.n_samples as f64).floor() as usize
    }
}

/// Data and results of one run.
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    pub config: ExperimentConfig,
    /// Neighbour count actually used.
    pub n_neighbors: usize,
    pub train: SampleSet,
    pub cv: SampleSet,
    pub test: SampleSet,
    pub cv_prediction: VectorN,
    pub test_prediction: VectorN,
    /// `None` when no samples were held out.
    pub cv_scores: Option<Scores>,
    pub test_scores: Scores,
}

/// Runs one configuration with response function `f` on the manifold.
///
/// Test responses are noise free. The neighbour count in
/// [`NeighborMode::Factor`] is scaled with `N = n_samples`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the manifold cannot
/// be built.
pub fn run_example<F>(config: &ExperimentConfig, f: F) -> Result<ExperimentOutcome>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    let manifold = build_manifold(config.ambient_dim, config.manifold, &config.manifold_params)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let n_train = config.n_samples - config.n_cv_samples();
    let train_options = SampleOptions {
        sigma_x: config.sigma_x,
        sigma_f: config.sigma_f,
    };
    let all = sample_curve(&manifold, &f, config.n_samples, &train_options, &mut rng)?;
    let (train, cv) = all.split_at(n_train);

    let test_options = SampleOptions {
        sigma_x: config.sigma_x,
        sigma_f: 0.0,
    };
    let test = sample_curve(&manifold, &f, config.n_test_samples, &test_options, &mut rng)?;

    let k = neighbor_count(
        config.neighbor_mode,
        config.n_neighbors,
        config.n_samples,
        config.ambient_dim,
    )
    .min(n_train);
    let mut knn = KnnRegressor::new(k);
    knn.fit(&train.points, &train.values)?;

    let (cv_prediction, cv_scores) = if cv.is_empty() {
        (VectorN::zeros(0), None)
    } else {
        let prediction = knn.predict(&cv.points)?;
        let scores = Scores::compute(&prediction, &cv.values)?;
        (prediction, Some(scores))
    };
    let test_prediction = knn.predict(&test.points)?;
    let test_scores = Scores::compute(&test_prediction, &test.values)?;

    info!(
        manifold = %config.manifold,
        n = config.n_samples,
        d = config.ambient_dim,
        sigma_x = config.sigma_x,
        sigma_f = config.sigma_f,
        rep = config.repetition,
        k,
        rmse = test_scores.rmse,
        "finished experiment"
    );

    Ok(ExperimentOutcome {
        config: config.clone(),
        n_neighbors: k,
        train,
        cv,
        test,
        cv_prediction,
        test_prediction,
        cv_scores,
        test_scores,
    })
}

/// Cartesian product of experiment parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGrid {
    pub n_samples: Vec<usize>,
    pub ambient_dims: Vec<usize>,
    pub sigma_x: Vec<f64>,
    pub sigma_f: Vec<f64>,
    pub repetitions: usize,
    /// Seed for the per-run seeds.
    #[serde(default)]
    pub master_seed: u64,
}

impl ParameterGrid {
    /// Expands the grid over `template`, one config per combination and
    /// repetition, each with its own seed.
    ///
    /// Combinations are ordered by sample size, dimension, `sigma_x`,
    /// `sigma_f`, then repetition.
    #[must_use]
    pub fn configs(&self, template: &ExperimentConfig) -> Vec<ExperimentConfig> {
        let mut rng = StdRng::seed_from_u64(self.master_seed);
        let mut out = Vec::new();
        for &n_samples in &self.n_samples {
            for &ambient_dim in &self.ambient_dims {
                for &sigma_x in &self.sigma_x {
                    for &sigma_f in &self.sigma_f {
                        for repetition in 0..self.repetitions {
                            out.push(ExperimentConfig {
                                n_samples,
                                ambient_dim,
                                sigma_x,
                                sigma_f,
                                repetition,
                                seed: rng.random(),
                                ..template.clone()
                            });
                        }
                    }
                }
            }
        }
        out
    }
}

/// Runs every configuration of the grid in order.
///
/// # Errors
///
/// Stops at the first failing run and returns its error.
pub fn run_grid<F>(
    grid: &ParameterGrid,
    template: &ExperimentConfig,
    f: F,
) -> Result<Vec<ExperimentOutcome>>
where
    F: Fn(f64) -> f64,
{
    grid.configs(template)
        .iter()
        .map(|config| run_example(config, &f))
        .collect()
}
