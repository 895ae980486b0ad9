//! Bipartite → unipartite projection.
//!
//! With W the D×P adjacency, projecting onto the top side computes W·Wᵗ
//! (D×D) and onto the bottom side Wᵗ·W (P×P). Entry (i, j) is the sum over
//! opposite-side nodes of the product of the two edge weights.
//!
//! The product is then cleaned in two steps, in this order:
//!
//! 1. every diagonal entry is set to zero (no node neighbors itself);
//! 2. stored zeros are eliminated.
//!
//! No normalization happens here; that belongs to the ranking consumer.

use sprs::CsMat;
use tracing::debug;

use crate::index::{NodeIdentifier, NodeIndex};
use crate::matrix::{self, SparseMatrix, Triplet};
use crate::model::Side;
use crate::{Error, Result};

/// Unipartite projection of one side, with the index that gives its rows
/// and columns meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<K: NodeIdentifier> {
    pub side: Side,
    pub index: NodeIndex<K>,
    pub matrix: SparseMatrix,
}

impl<K: NodeIdentifier> Projection<K> {
    /// Number of nodes on the projected side.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Shared-neighbor weight between two identifiers; 0.0 when either is
    /// unknown or they share nothing.
    pub fn weight(&self, a: &K, b: &K) -> f64 {
        match (self.index.get(a), self.index.get(b)) {
            (Some(i), Some(j)) => matrix::value_at(&self.matrix, i, j),
            _ => 0.0,
        }
    }

    /// Stored entries, positions mapped back to identifiers.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &K, f64)> + '_ {
        matrix::triplets(&self.matrix).filter_map(|Triplet { row, col, value }| {
            Some((self.index.id(row)?, self.index.id(col)?, value))
        })
    }

    /// Identifiers sharing at least one neighbor with `id`.
    pub fn neighbors(&self, id: &K) -> Vec<(&K, f64)> {
        let Some(row) = self.index.get(id) else {
            return Vec::new();
        };
        let Some(vec) = self.matrix.outer_view(row) else {
            return Vec::new();
        };
        vec.iter()
            .filter_map(|(col, &value)| Some((self.index.id(col)?, value)))
            .collect()
    }
}

/// Project `adjacency` onto `side`.
///
/// `index` must be the index table of `side`; a cardinality mismatch with
/// the matrix is an `IndexConsistency` violation.
pub fn project<K: NodeIdentifier>(
    adjacency: &SparseMatrix,
    side: Side,
    index: &NodeIndex<K>,
) -> Result<Projection<K>> {
    let n = match side {
        Side::Top => adjacency.rows(),
        Side::Bottom => adjacency.cols(),
    };
    if index.len() != n {
        return Err(Error::IndexConsistency(format!(
            "{side} index has {} entries but the adjacency matrix has {n} {side} nodes",
            index.len()
        )));
    }

    let mut product = shared_neighbor_product(adjacency, side);
    matrix::zero_diagonal(&mut product);
    let matrix = matrix::eliminate_zeros(&product);

    debug!(%side, nodes = n, nnz = matrix.nnz(), "projected bipartite network");

    Ok(Projection { side, index: index.clone(), matrix })
}

/// W·Wᵗ for the top side, Wᵗ·W for the bottom side.
fn shared_neighbor_product(adjacency: &SparseMatrix, side: Side) -> SparseMatrix {
    let n = match side {
        Side::Top => adjacency.rows(),
        Side::Bottom => adjacency.cols(),
    };
    if n == 0 || adjacency.nnz() == 0 {
        return CsMat::zero((n, n));
    }
    let transposed: SparseMatrix = adjacency.transpose_view().to_csr();
    match side {
        Side::Top => adjacency * &transposed,
        Side::Bottom => &transposed * adjacency,
    }
}
