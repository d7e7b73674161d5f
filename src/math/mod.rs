mod complement;

pub use complement::orthogonal_complement;

/// Point or vector in the ambient space `R^D`.
pub type VectorN = nalgebra::DVector<f64>;

/// Dynamically sized matrix; columns are vectors in `R^D`.
pub type MatrixN = nalgebra::DMatrix<f64>;

/// Global tolerance for parameter and geometric comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Singular values at or below this are treated as zero when extracting
/// an orthogonal complement.
pub const RANK_TOLERANCE: f64 = 1e-14;

/// Orthonormal basis of the complement of a single vector, as columns.
#[must_use]
pub fn normal_space(vector: &VectorN) -> MatrixN {
    orthogonal_complement(&MatrixN::from_column_slice(
        vector.len(),
        1,
        vector.as_slice(),
    ))
}

