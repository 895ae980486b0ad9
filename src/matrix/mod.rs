//! Sparse adjacency construction and the matrix helpers shared by the
//! projection engine.
//!
//! Entries are assembled as coordinate triplets (`TriMat`) and stored as
//! compressed sparse rows (`CsMat`). Converting triplets to CSR sums
//! duplicate coordinates, which is exactly the accumulation rule for
//! repeated edges.

use sprs::{CsMat, TriMat};

use crate::{Error, Result};

/// Weighted D×P (or N×N) sparse matrix.
pub type SparseMatrix = CsMat<f64>;

/// One stored matrix entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Build a `shape.0 × shape.1` matrix from `(row, col, weight)` entries.
///
/// Coordinates outside `shape` are an `IndexConsistency` violation: the
/// caller derived them from indices of that exact cardinality.
pub fn build_adjacency<I>(shape: (usize, usize), entries: I) -> Result<SparseMatrix>
where
    I: IntoIterator<Item = (usize, usize, f64)>,
{
    let (rows, cols) = shape;
    let mut tri = TriMat::<f64>::new(shape);
    for (row, col, weight) in entries {
        if row >= rows || col >= cols {
            return Err(Error::IndexConsistency(format!(
                "entry ({row}, {col}) outside a {rows}x{cols} adjacency matrix"
            )));
        }
        tri.add_triplet(row, col, weight);
    }
    if tri.nnz() == 0 {
        return Ok(CsMat::zero(shape));
    }
    Ok(tri.to_csr())
}

/// Stored entries in row-major order.
pub fn triplets(matrix: &SparseMatrix) -> impl Iterator<Item = Triplet> + '_ {
    matrix
        .iter()
        .map(|(&value, (row, col))| Triplet { row, col, value })
}

/// Value at `(row, col)`; structural zeros read as 0.0.
pub fn value_at(matrix: &SparseMatrix, row: usize, col: usize) -> f64 {
    if row >= matrix.rows() || col >= matrix.cols() {
        return 0.0;
    }
    matrix.get(row, col).copied().unwrap_or(0.0)
}

/// Overwrite every stored diagonal entry with zero. The entries stay
/// stored; [`eliminate_zeros`] removes them.
pub fn zero_diagonal(matrix: &mut SparseMatrix) {
    let n = matrix.rows().min(matrix.cols());
    for i in 0..n {
        if let Some(v) = matrix.get_mut(i, i) {
            *v = 0.0;
        }
    }
}

/// Copy of `matrix` without stored zero-valued entries.
pub fn eliminate_zeros(matrix: &SparseMatrix) -> SparseMatrix {
    let shape = matrix.shape();
    let mut tri = TriMat::<f64>::new(shape);
    for t in triplets(matrix) {
        if t.value != 0.0 {
            tri.add_triplet(t.row, t.col, t.value);
        }
    }
    if tri.nnz() == 0 {
        return CsMat::zero(shape);
    }
    tri.to_csr()
}

/// Number of stored entries whose value is exactly zero.
pub fn stored_zeros(matrix: &SparseMatrix) -> usize {
    matrix.iter().filter(|(v, _)| **v == 0.0).count()
}

/// `M[i,j] == M[j,i]` for every stored entry.
pub fn is_symmetric(matrix: &SparseMatrix) -> bool {
    if matrix.rows() != matrix.cols() {
        return false;
    }
    triplets(matrix).all(|t| value_at(matrix, t.col, t.row) == t.value)
}

/// Materialize as row-major dense rows. Intended for small matrices
/// (inspection, tests).
pub fn to_dense_rows(matrix: &SparseMatrix) -> Vec<Vec<f64>> {
    let mut dense = vec![vec![0.0; matrix.cols()]; matrix.rows()];
    for t in triplets(matrix) {
        dense[t.row][t.col] = t.value;
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_accumulate() {
        let m = build_adjacency((2, 2), [(0, 0, 1.0), (0, 1, 1.0), (0, 0, 1.0), (1, 0, 2.0)]).unwrap();
        assert_eq!(to_dense_rows(&m), vec![vec![2.0, 1.0], vec![2.0, 0.0]]);
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn test_shape_follows_cardinality() {
        let m = build_adjacency((3, 4), [(0, 0, 1.0)]).unwrap();
        assert_eq!(m.shape(), (3, 4));
        let empty = build_adjacency((0, 0), Vec::<(usize, usize, f64)>::new()).unwrap();
        assert_eq!(empty.shape(), (0, 0));
        assert_eq!(empty.nnz(), 0);
    }

    #[test]
    fn test_out_of_range_entry() {
        let err = build_adjacency((1, 1), [(0, 1, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::IndexConsistency(_)));
    }

    #[test]
    fn test_zero_diagonal_then_eliminate() {
        let mut m = build_adjacency((2, 2), [(0, 0, 3.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 4.0)]).unwrap();
        zero_diagonal(&mut m);
        assert_eq!(m.nnz(), 4);
        assert_eq!(stored_zeros(&m), 2);

        let cleaned = eliminate_zeros(&m);
        assert_eq!(cleaned.nnz(), 2);
        assert_eq!(stored_zeros(&cleaned), 0);
        assert_eq!(to_dense_rows(&cleaned), vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_symmetry_check() {
        let sym = build_adjacency((2, 2), [(0, 1, 2.0), (1, 0, 2.0)]).unwrap();
        assert!(is_symmetric(&sym));
        let asym = build_adjacency((2, 2), [(0, 1, 2.0)]).unwrap();
        assert!(!is_symmetric(&asym));
    }
}
