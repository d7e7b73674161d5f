use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::math::{MatrixN, VectorN};

use super::curve::{CirclePiece, Curve, CurveBase, Helix, Identity, SCurve, SegmentCurve};

/// Identifier of a manifold the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifoldId {
    Identity,
    Circle,
    Scurve,
    Helix,
}

impl ManifoldId {
    /// Returns the identifier as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Circle => "circle",
            Self::Scurve => "scurve",
            Self::Helix => "helix",
        }
    }
}

impl fmt::Display for ManifoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifoldId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "identity" => Ok(Self::Identity),
            "circle" => Ok(Self::Circle),
            "scurve" => Ok(Self::Scurve),
            "helix" => Ok(Self::Helix),
            other => Err(ConfigError::UnsupportedManifold(other.to_owned()).into()),
        }
    }
}

/// Keyword parameters for the manifold factory.
///
/// Parameters a manifold does not use are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifoldParams {
    pub start: f64,
    pub end: f64,
    /// Active coordinates of the identity curve; `None` means all.
    pub n_active_features: Option<usize>,
    /// Helix radius.
    pub radius: f64,
    /// Helix pitch.
    pub pitch: f64,
}

impl Default for ManifoldParams {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
            n_active_features: None,
            radius: Helix::DEFAULT_RADIUS,
            pitch: Helix::DEFAULT_PITCH,
        }
    }
}

impl ManifoldParams {
    /// Parameters over the domain `[start, end]`, other fields defaulted.
    #[must_use]
    pub fn with_domain(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }
}

/// A constructed manifold.
#[derive(Debug, Clone)]
pub enum Manifold {
    /// Single-index straight line.
    Identity(Identity),
    /// Piece of the unit circle.
    Circle(CirclePiece),
    /// Two joined circle arcs.
    SCurve(SCurve),
    /// Circular helix.
    Helix(Helix),
    /// Quarter-circle segment curve.
    Segments(SegmentCurve),
}

impl Manifold {
    fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Identity(c) => c,
            Self::Circle(c) => c,
            Self::SCurve(c) => c,
            Self::Helix(c) => c,
            Self::Segments(c) => c,
        }
    }
}

impl Curve for Manifold {
    fn base(&self) -> &CurveBase {
        self.as_curve().base()
    }

    fn basepoint(&self, t: f64) -> Result<VectorN> {
        self.as_curve().basepoint(t)
    }

    fn tangent(&self, t: f64) -> Result<VectorN> {
        self.as_curve().tangent(t)
    }

    fn curvature_vector(&self, t: f64) -> Result<VectorN> {
        self.as_curve().curvature_vector(t)
    }

    fn normal(&self, t: f64) -> Result<MatrixN> {
        self.as_curve().normal(t)
    }
}

impl From<SegmentCurve> for Manifold {
    fn from(curve: SegmentCurve) -> Self {
        Self::Segments(curve)
    }
}

/// Builds the manifold named by `id` in `R^n_features`.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedManifold`] for an unknown identifier, or
/// the construction error of the selected curve.
pub fn get_manifold(n_features: usize, id: &str, params: &ManifoldParams) -> Result<Manifold> {
    build_manifold(n_features, id.parse()?, params)
}

/// Builds the manifold for an already parsed identifier.
///
/// # Errors
///
/// Returns the construction error of the selected curve.
pub fn build_manifold(n_features: usize, id: ManifoldId, params: &ManifoldParams) -> Result<Manifold> {
    let ManifoldParams {
        start,
        end,
        n_active_features,
        radius,
        pitch,
    } = *params;
    Ok(match id {
        ManifoldId::Identity => {
            Manifold::Identity(Identity::new(n_features, start, end, n_active_features)?)
        }
        ManifoldId::Circle => Manifold::Circle(CirclePiece::new(n_features, start, end)?),
        ManifoldId::Scurve => Manifold::SCurve(SCurve::new(n_features, start, end)?),
        ManifoldId::Helix => Manifold::Helix(Helix::new(n_features, start, end, radius, pitch)?),
    })
}
