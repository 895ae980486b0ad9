//! Bipartite degree: number of distinct opposite-side neighbors.
//!
//! Computed from the edge list rather than the adjacency matrix. The
//! matrix sums repeated edges into one weight, so it cannot tell a
//! multi-edge from a single heavy edge; degree must count topology only.

use hashbrown::HashSet;
use serde::Serialize;

use crate::index::{NodeIdentifier, NodeIndex};
use crate::model::Side;
use crate::{Error, Result};

/// `(identifier, degree)` rows for one side, in index order.
///
/// Lookup by identifier goes through the side's `NodeIndex`, so `get` is a
/// hash lookup rather than a scan of the rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeTable<K: NodeIdentifier> {
    side: Side,
    rows: Vec<(K, usize)>,
    #[serde(skip)]
    index: NodeIndex<K>,
}

impl<K: NodeIdentifier> DegreeTable<K> {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn rows(&self) -> &[(K, usize)] {
        &self.rows
    }

    pub fn get(&self, id: &K) -> Option<usize> {
        self.index.get(id).map(|pos| self.rows[pos].1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.rows.iter().map(|(k, d)| (k, *d))
    }

    /// Sum of all degrees; equals the number of distinct edges.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, d)| d).sum()
    }
}

/// Degree tables for both sides from the `(top, bottom)` position of every
/// edge. A position outside `top` or `bottom` is `IndexConsistency`.
pub fn compute_degrees<T, B>(
    edges: &[(usize, usize)],
    top: &NodeIndex<T>,
    bottom: &NodeIndex<B>,
) -> Result<(DegreeTable<T>, DegreeTable<B>)>
where
    T: NodeIdentifier,
    B: NodeIdentifier,
{
    let distinct: HashSet<(usize, usize)> = edges.iter().copied().collect();

    let mut top_counts = vec![0usize; top.len()];
    let mut bottom_counts = vec![0usize; bottom.len()];
    for &(t, b) in &distinct {
        let (Some(tc), Some(bc)) = (top_counts.get_mut(t), bottom_counts.get_mut(b)) else {
            return Err(Error::IndexConsistency(format!(
                "edge position ({t}, {b}) outside {}x{} index tables",
                top.len(),
                bottom.len()
            )));
        };
        *tc += 1;
        *bc += 1;
    }

    Ok((table(Side::Top, top, top_counts), table(Side::Bottom, bottom, bottom_counts)))
}

fn table<K: NodeIdentifier>(side: Side, index: &NodeIndex<K>, counts: Vec<usize>) -> DegreeTable<K> {
    DegreeTable {
        side,
        rows: index.ids().iter().cloned().zip(counts).collect(),
        index: index.clone(),
    }
}
