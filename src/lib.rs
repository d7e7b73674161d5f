pub mod error;
pub mod estimator;
pub mod experiment;
pub mod geometry;
pub mod math;
pub mod sampling;
pub mod score;

pub use error::{Error, Result};
