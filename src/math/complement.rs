//! Orthogonal complement of a set of column vectors.
//!
//! The right-singular vectors of `vectors^T` whose singular value is at or
//! below [`RANK_TOLERANCE`] span the complement of the column space.
//!
//! Degenerate input (a zero column, or linearly dependent columns) yields a
//! basis for the complement of the *effective* span, with more columns than
//! `D - k`. This is not an error.
use super::{MatrixN, RANK_TOLERANCE};

/// Returns a `D x m` matrix whose columns are an orthonormal basis of the
/// orthogonal complement of the columns of `vectors` (a `D x k` matrix).
#[must_use]
pub fn orthogonal_complement(vectors: &MatrixN) -> MatrixN {
    let dim = vectors.nrows();
    let k = vectors.ncols().min(dim);

    // nalgebra computes a thin SVD; padding to a square matrix yields the
    // full right-singular basis, with zero singular values for padded rows.
    let mut padded = MatrixN::zeros(dim, dim);
    padded
        .view_mut((0, 0), (k, dim))
        .copy_from(&vectors.columns(0, k).transpose());

    let svd = padded.svd(false, true);
    let Some(v_t) = svd.v_t else {
        return MatrixN::zeros(dim, 0);
    };

    let basis_rows: Vec<usize> = svd
        .singular_values
        .iter()
        .enumerate()
        .filter(|(_, s)| **s <= RANK_TOLERANCE)
        .map(|(i, _)| i)
        .collect();

    let mut basis = MatrixN::zeros(dim, basis_rows.len());
    for (col, &row) in basis_rows.iter().enumerate() {
        basis.set_column(col, &v_t.row(row).transpose());
    }
    basis
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::VectorN;

    fn assert_orthonormal(basis: &MatrixN) {
        let gram = basis.transpose() * basis;
        let identity = MatrixN::identity(basis.ncols(), basis.ncols());
        assert!((gram - identity).norm() < 1e-10);
    }

    #[test]
    fn complement_of_axis_vector() {
        let v = MatrixN::from_column_slice(3, 1, &[1.0, 0.0, 0.0]);
        let basis = orthogonal_complement(&v);
        assert_eq!(basis.ncols(), 2);
        assert_orthonormal(&basis);
        for col in basis.column_iter() {
            assert!(col[0].abs() < 1e-12);
        }
    }

    #[test]
    fn complement_of_diagonal_direction() {
        let dim = 6;
        let v = VectorN::from_element(dim, 1.0 / (dim as f64).sqrt());
        let basis = orthogonal_complement(&MatrixN::from_column_slice(dim, 1, v.as_slice()));
        assert_eq!(basis.ncols(), dim - 1);
        assert_orthonormal(&basis);
        assert!((basis.transpose() * v).norm() < 1e-10);
    }

    #[test]
    fn complement_of_two_vectors() {
        let m = MatrixN::from_column_slice(4, 2, &[1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        let basis = orthogonal_complement(&m);
        assert_eq!(basis.ncols(), 2);
        assert_orthonormal(&basis);
        assert!((m.transpose() * &basis).norm() < 1e-10);
    }

    #[test]
    fn zero_vector_gives_full_space() {
        let basis = orthogonal_complement(&MatrixN::zeros(3, 1));
        assert_eq!(basis.ncols(), 3);
        assert_orthonormal(&basis);
    }

    #[test]
    fn duplicate_vectors_collapse_rank() {
        let m = MatrixN::from_column_slice(3, 2, &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
        let basis = orthogonal_complement(&m);
        assert_eq!(basis.ncols(), 2);
        assert_orthonormal(&basis);
    }
}
