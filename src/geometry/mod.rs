pub mod curve;
pub mod manifold;

pub use curve::{CirclePiece, Curve, CurveBase, CurveDomain, Helix, Identity, SCurve, SegmentCurve};
pub use manifold::{build_manifold, get_manifold, Manifold, ManifoldId, ManifoldParams};
