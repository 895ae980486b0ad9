//! Thread-shared network handle.
//!
//! A rebuild takes the write lock for its whole duration, so a reader sees
//! either the complete previous state or the complete new one, never a mix
//! of old index tables and a new matrix.

use std::sync::Arc;

use parking_lot::RwLock;

use super::BipartiteNetwork;
use crate::degree::DegreeTable;
use crate::index::NodeIdentifier;
use crate::model::{Edge, EdgeTable, NodeKey, Side};
use crate::projection::Projection;
use crate::Result;

/// Cloneable handle to one network behind a `RwLock`.
#[derive(Debug, Clone)]
pub struct SharedNetwork<K: NodeIdentifier = NodeKey> {
    inner: Arc<RwLock<BipartiteNetwork<K, K>>>,
}

impl<K: NodeIdentifier> Default for SharedNetwork<K> {
    fn default() -> Self {
        Self::new(BipartiteNetwork::default())
    }
}

impl<K: NodeIdentifier> SharedNetwork<K> {
    pub fn new(network: BipartiteNetwork<K, K>) -> Self {
        Self { inner: Arc::new(RwLock::new(network)) }
    }

    /// Run `f` against the current state under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&BipartiteNetwork<K, K>) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn project(&self, side: Side) -> Result<Projection<K>> {
        self.inner.read().project(side)
    }

    pub fn degrees(&self) -> Result<(DegreeTable<K>, DegreeTable<K>)> {
        self.inner.read().degrees()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.inner.read().shape()
    }

    /// Exclusive rebuild from typed edges.
    pub fn set_edge_list<I, E>(&self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<K, K>>,
    {
        self.inner.write().set_edge_list(edges)
    }
}

impl SharedNetwork<NodeKey> {
    /// Exclusive rebuild from an edge table.
    pub fn set_edges(
        &self,
        table: &EdgeTable,
        top_column: &str,
        bottom_column: &str,
        weight_column: Option<&str>,
    ) -> Result<()> {
        self.inner.write().set_edges(table, top_column, bottom_column, weight_column)
    }
}
