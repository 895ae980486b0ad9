//! # Bipartite Network
//!
//! The aggregate root: edge list, both index tables and the adjacency
//! matrix, all owned by one instance. Every rebuild replaces all of them
//! together; projections and degree tables are computed from the current
//! state on each call and never track later rebuilds.
//!
//! | Operation | Mutates | Produces |
//! |-----------|---------|----------|
//! | `set_edges` / `set_edge_list` | yes | index tables + adjacency |
//! | `project` / `project_on` | no | [`Projection`] |
//! | `degrees` | no | two [`DegreeTable`]s |

pub mod shared;

use std::path::Path;

use tracing::{debug, warn};

use crate::degree::{self, DegreeTable};
use crate::index::{NodeIdentifier, NodeIndex};
use crate::ingest::{self, EdgeListConfig};
use crate::matrix::{self, SparseMatrix, Triplet};
use crate::model::{Edge, EdgeTable, NodeKey, Side, Value, DEFAULT_WEIGHT};
use crate::projection::{self, Projection};
use crate::{Error, Result};

pub use shared::SharedNetwork;

const DEFAULT_TOP_COLUMN: &str = "top";
const DEFAULT_BOTTOM_COLUMN: &str = "bottom";

/// A bipartite network with top identifiers `T` and bottom identifiers `B`.
#[derive(Debug, Clone, PartialEq)]
pub struct BipartiteNetwork<T: NodeIdentifier = NodeKey, B: NodeIdentifier = NodeKey> {
    top_column: String,
    bottom_column: String,
    weight_column: Option<String>,
    edges: Vec<Edge<T, B>>,
    /// (top position, bottom position) per edge, parallel to `edges`
    positions: Vec<(usize, usize)>,
    top_index: NodeIndex<T>,
    bottom_index: NodeIndex<B>,
    adjacency: SparseMatrix,
}

impl<T: NodeIdentifier, B: NodeIdentifier> Default for BipartiteNetwork<T, B> {
    fn default() -> Self {
        Self {
            top_column: DEFAULT_TOP_COLUMN.into(),
            bottom_column: DEFAULT_BOTTOM_COLUMN.into(),
            weight_column: None,
            edges: Vec::new(),
            positions: Vec::new(),
            top_index: NodeIndex::new(),
            bottom_index: NodeIndex::new(),
            adjacency: SparseMatrix::zero((0, 0)),
        }
    }
}

// ============================================================================
// Table-driven construction
// ============================================================================

impl BipartiteNetwork<NodeKey, NodeKey> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from the named columns of `table`.
    pub fn from_table(
        table: &EdgeTable,
        top_column: &str,
        bottom_column: &str,
        weight_column: Option<&str>,
    ) -> Result<Self> {
        let mut network = Self::new();
        network.set_edges(table, top_column, bottom_column, weight_column)?;
        Ok(network)
    }

    /// Replace the network with the edges of `table`.
    ///
    /// Index tables and adjacency are rebuilt from scratch. On error the
    /// previous state is left untouched.
    pub fn set_edges(
        &mut self,
        table: &EdgeTable,
        top_column: &str,
        bottom_column: &str,
        weight_column: Option<&str>,
    ) -> Result<()> {
        let top_pos = table.column_position(top_column)?;
        let bottom_pos = table.column_position(bottom_column)?;
        let weight_pos = weight_column.map(|c| table.column_position(c)).transpose()?;

        let (top_index, top_rows) =
            NodeIndex::from_cells(top_column, table.rows().iter().map(|r| &r[top_pos]))?;
        let (bottom_index, bottom_rows) =
            NodeIndex::from_cells(bottom_column, table.rows().iter().map(|r| &r[bottom_pos]))?;

        let mut edges = Vec::with_capacity(table.len());
        for (row, cells) in table.rows().iter().enumerate() {
            let weight = match (weight_pos, weight_column) {
                (Some(pos), Some(column)) => cell_weight(column, row, &cells[pos])?,
                _ => DEFAULT_WEIGHT,
            };
            let top = index_id(&top_index, top_rows[row])?;
            let bottom = index_id(&bottom_index, bottom_rows[row])?;
            edges.push(Edge { top, bottom, weight });
        }
        let positions: Vec<_> = top_rows.into_iter().zip(bottom_rows).collect();

        self.install(
            Columns::named(top_column, bottom_column, weight_column),
            edges,
            positions,
            top_index,
            bottom_index,
        )
    }

    /// Read a delimited edge list from disk and replace the network with it.
    pub fn load_edgelist(&mut self, path: impl AsRef<Path>, config: &EdgeListConfig) -> Result<()> {
        let table = ingest::load_edge_table(path, config)?;
        self.set_edges(
            &table,
            &config.top_column,
            &config.bottom_column,
            config.weight_column.as_deref(),
        )
    }
}

fn cell_weight(column: &str, row: usize, cell: &Value) -> Result<f64> {
    if cell.is_null() {
        return Ok(DEFAULT_WEIGHT);
    }
    cell.as_float().ok_or_else(|| Error::TypeMismatch {
        column: column.to_owned(),
        row,
        expected: "numeric weight".into(),
        got: cell.type_name().into(),
    })
}

fn index_id<K: NodeIdentifier>(index: &NodeIndex<K>, pos: usize) -> Result<K> {
    index.id(pos).cloned().ok_or_else(|| {
        Error::IndexConsistency(format!("position {pos} outside a {}-entry index", index.len()))
    })
}

struct Columns {
    top: String,
    bottom: String,
    weight: Option<String>,
}

impl Columns {
    fn named(top: &str, bottom: &str, weight: Option<&str>) -> Self {
        Self { top: top.into(), bottom: bottom.into(), weight: weight.map(Into::into) }
    }
}

// ============================================================================
// Generic construction and accessors
// ============================================================================

impl<T: NodeIdentifier, B: NodeIdentifier> BipartiteNetwork<T, B> {
    /// Build a network from typed edges, e.g. `(top, bottom)`,
    /// `(top, bottom, weight)` or [`Edge`] values.
    pub fn from_edges<I, E>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<T, B>>,
    {
        let mut network = Self::default();
        network.set_edge_list(edges)?;
        Ok(network)
    }

    /// Replace the network with typed edges. The top and bottom column names
    /// are kept; typed edges carry their own weight, so the weight column is
    /// cleared.
    pub fn set_edge_list<I, E>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<T, B>>,
    {
        let edges: Vec<Edge<T, B>> = edges.into_iter().map(Into::into).collect();
        let top_index = NodeIndex::build(edges.iter().map(|e| &e.top));
        let bottom_index = NodeIndex::build(edges.iter().map(|e| &e.bottom));
        let positions = edges
            .iter()
            .map(|e| Ok::<_, Error>((top_index.position(&e.top)?, bottom_index.position(&e.bottom)?)))
            .collect::<Result<Vec<_>>>()?;

        let columns = Columns {
            top: self.top_column.clone(),
            bottom: self.bottom_column.clone(),
            weight: None,
        };
        self.install(columns, edges, positions, top_index, bottom_index)
    }

    /// Build the adjacency for fully indexed edges, then swap everything in.
    fn install(
        &mut self,
        columns: Columns,
        edges: Vec<Edge<T, B>>,
        positions: Vec<(usize, usize)>,
        top_index: NodeIndex<T>,
        bottom_index: NodeIndex<B>,
    ) -> Result<()> {
        let shape = (top_index.len(), bottom_index.len());
        let adjacency = matrix::build_adjacency(
            shape,
            positions.iter().zip(&edges).map(|(&(t, b), e)| (t, b, e.weight)),
        )?;

        if edges.is_empty() {
            warn!("bipartite network rebuilt from an empty edge list");
        }
        debug!(
            edges = edges.len(),
            top = shape.0,
            bottom = shape.1,
            nnz = adjacency.nnz(),
            "rebuilt bipartite network"
        );

        self.top_column = columns.top;
        self.bottom_column = columns.bottom;
        self.weight_column = columns.weight;
        self.edges = edges;
        self.positions = positions;
        self.top_index = top_index;
        self.bottom_index = bottom_index;
        self.adjacency = adjacency;
        Ok(())
    }

    pub fn edges(&self) -> &[Edge<T, B>] {
        &self.edges
    }

    pub fn top_index(&self) -> &NodeIndex<T> {
        &self.top_index
    }

    pub fn bottom_index(&self) -> &NodeIndex<B> {
        &self.bottom_index
    }

    /// The D×P weighted adjacency (CSR).
    pub fn adjacency(&self) -> &SparseMatrix {
        &self.adjacency
    }

    /// Adjacency entries as coordinate triplets.
    pub fn adjacency_triplets(&self) -> impl Iterator<Item = Triplet> + '_ {
        matrix::triplets(&self.adjacency)
    }

    /// `(D, P)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.top_index.len(), self.bottom_index.len())
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn top_column(&self) -> &str {
        &self.top_column
    }

    pub fn bottom_column(&self) -> &str {
        &self.bottom_column
    }

    pub fn weight_column(&self) -> Option<&str> {
        self.weight_column.as_deref()
    }

    /// Total weight between two identifiers (0.0 if unconnected or unknown).
    pub fn weight(&self, top: &T, bottom: &B) -> f64 {
        match (self.top_index.get(top), self.bottom_index.get(bottom)) {
            (Some(i), Some(j)) => matrix::value_at(&self.adjacency, i, j),
            _ => 0.0,
        }
    }

    /// Unipartite projection onto the top nodes (D×D).
    pub fn project_top(&self) -> Result<Projection<T>> {
        projection::project(&self.adjacency, Side::Top, &self.top_index)
    }

    /// Unipartite projection onto the bottom nodes (P×P).
    pub fn project_bottom(&self) -> Result<Projection<B>> {
        projection::project(&self.adjacency, Side::Bottom, &self.bottom_index)
    }

    /// Distinct-neighbor degree of every top and bottom node.
    pub fn degrees(&self) -> Result<(DegreeTable<T>, DegreeTable<B>)> {
        degree::compute_degrees(&self.positions, &self.top_index, &self.bottom_index)
    }
}

// ============================================================================
// Same-typed sides
// ============================================================================

impl<K: NodeIdentifier> BipartiteNetwork<K, K> {
    /// Unipartite projection onto `side`.
    pub fn project(&self, side: Side) -> Result<Projection<K>> {
        match side {
            Side::Top => self.project_top(),
            Side::Bottom => self.project_bottom(),
        }
    }

    /// Projection onto the side whose column is named `column`.
    /// A name matching neither column is an `InputShape` error.
    pub fn project_on(&self, column: &str) -> Result<Projection<K>> {
        let side = Side::from_column(column, &self.top_column, &self.bottom_column)?;
        self.project(side)
    }

    pub fn index_for(&self, side: Side) -> &NodeIndex<K> {
        match side {
            Side::Top => &self.top_index,
            Side::Bottom => &self.bottom_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::to_dense_rows;

    fn scenario_table() -> EdgeTable {
        EdgeTable::from_rows(
            ["top", "bottom", "weight"],
            [
                [Value::from("t1"), Value::from("b1"), Value::Int(1)],
                [Value::from("t1"), Value::from("b2"), Value::Int(1)],
                [Value::from("t2"), Value::from("b1"), Value::Int(2)],
                [Value::from("t2"), Value::from("b2"), Value::Int(1)],
                [Value::from("t1"), Value::from("b1"), Value::Int(1)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_set_edges_builds_state() {
        let net = BipartiteNetwork::from_table(&scenario_table(), "top", "bottom", Some("weight")).unwrap();
        assert_eq!(net.shape(), (2, 2));
        assert_eq!(to_dense_rows(net.adjacency()), vec![vec![2.0, 1.0], vec![2.0, 1.0]]);
        assert_eq!(net.weight_column(), Some("weight"));
    }

    #[test]
    fn test_missing_column_keeps_prior_state() {
        let mut net = BipartiteNetwork::from_table(&scenario_table(), "top", "bottom", None).unwrap();
        let before = net.clone();
        let err = net.set_edges(&scenario_table(), "top", "missing", None).unwrap_err();
        assert!(matches!(err, Error::InputShape(_)));
        assert_eq!(net, before);
    }

    #[test]
    fn test_bad_weight_keeps_prior_state() {
        let mut net = BipartiteNetwork::from_table(&scenario_table(), "top", "bottom", None).unwrap();
        let before = net.clone();
        let bad = EdgeTable::from_rows(["top", "bottom", "weight"], [["x", "y", "heavy"]]).unwrap();
        let err = net.set_edges(&bad, "top", "bottom", Some("weight")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { row: 0, .. }));
        assert_eq!(net, before);
    }

    #[test]
    fn test_null_weight_defaults_to_one() {
        let table = EdgeTable::from_rows(
            ["top", "bottom", "weight"],
            [
                [Value::from("t"), Value::from("b"), Value::Null],
                [Value::from("t"), Value::from("b"), Value::Float(0.5)],
            ],
        )
        .unwrap();
        let net = BipartiteNetwork::from_table(&table, "top", "bottom", Some("weight")).unwrap();
        assert_eq!(net.weight(&"t".into(), &"b".into()), 1.5);
    }

    #[test]
    fn test_from_edges_generic_keys() {
        let net: BipartiteNetwork<u32, &str> =
            BipartiteNetwork::from_edges([(7u32, "x"), (7, "y"), (3, "x")]).unwrap();
        assert_eq!(net.top_index().ids(), &[7, 3]);
        assert_eq!(net.bottom_index().ids(), &["x", "y"]);
        let p = net.project_top().unwrap();
        assert_eq!(p.weight(&7, &3), 1.0);
        let (td, _) = net.degrees().unwrap();
        assert_eq!(td.get(&7), Some(2));
    }

    #[test]
    fn test_set_edge_list_clears_weight_column() {
        let mut net = BipartiteNetwork::from_table(&scenario_table(), "top", "bottom", Some("weight")).unwrap();
        net.set_edge_list([(NodeKey::from("a"), NodeKey::from("b"), 3.0)]).unwrap();
        assert_eq!(net.weight_column(), None);
        assert_eq!(net.top_column(), "top");
        assert_eq!(net.bottom_column(), "bottom");
        assert_eq!(net.weight(&"a".into(), &"b".into()), 3.0);
    }

    #[test]
    fn test_project_on_unknown_column() {
        let net = BipartiteNetwork::from_table(&scenario_table(), "top", "bottom", None).unwrap();
        assert!(matches!(net.project_on("weight"), Err(Error::InputShape(_))));
        assert_eq!(net.project_on("bottom").unwrap().side, Side::Bottom);
    }
}
