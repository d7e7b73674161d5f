use thiserror::Error;

/// Top-level error type for the synthetic manifold crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),
}

/// Errors related to curve evaluation and construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{curve} needs at least {required} ambient dimensions, got {actual}")]
    InsufficientDimension {
        curve: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{0} is not defined for this curve")]
    NotDefined(&'static str),
}

/// Errors raised while turning a configuration into curves or experiments.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("manifold {0} is not implemented")]
    UnsupportedManifold(String),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Errors related to fitting and evaluating estimators.
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("estimator has not been fitted")]
    NotFitted,

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
