//! Node indexing.
//!
//! Assigns dense, zero-based positions to distinct identifiers in order of
//! first occurrence. Matrix rows and columns mean whatever these positions
//! mean, so the assignment must be deterministic for a given input order.

use std::fmt::Debug;
use std::hash::Hash;

use hashbrown::HashMap;
use serde::{Serialize, Serializer};

use crate::model::{NodeKey, Value};
use crate::{Error, Result};

/// Anything usable as a node identifier.
pub trait NodeIdentifier: Eq + Hash + Clone + Debug {}

impl<K: Eq + Hash + Clone + Debug> NodeIdentifier for K {}

/// Bijection between distinct identifiers and `0..len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIndex<K: NodeIdentifier> {
    positions: HashMap<K, usize>,
    /// position → identifier
    ids: Vec<K>,
}

impl<K: NodeIdentifier> Default for NodeIndex<K> {
    fn default() -> Self {
        Self { positions: HashMap::new(), ids: Vec::new() }
    }
}

impl<K: NodeIdentifier> NodeIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a sequence of (possibly repeated) identifiers.
    pub fn build<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut index = Self::new();
        for id in ids {
            index.intern(id);
        }
        index
    }

    /// Position of `id`, assigning the next free one on first sight.
    pub(crate) fn intern(&mut self, id: &K) -> usize {
        if let Some(&pos) = self.positions.get(id) {
            return pos;
        }
        let pos = self.ids.len();
        self.positions.insert(id.clone(), pos);
        self.ids.push(id.clone());
        pos
    }

    pub fn get(&self, id: &K) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Like [`get`](Self::get), but a missing identifier is an
    /// `IndexConsistency` violation.
    pub fn position(&self, id: &K) -> Result<usize> {
        self.get(id).ok_or_else(|| {
            Error::IndexConsistency(format!("identifier {id:?} missing from a {}-entry index", self.len()))
        })
    }

    pub fn id(&self, pos: usize) -> Option<&K> {
        self.ids.get(pos)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in position order.
    pub fn ids(&self) -> &[K] {
        &self.ids
    }

    /// `(identifier, position)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.ids.iter().enumerate().map(|(pos, id)| (id, pos))
    }

    pub fn to_pairs(&self) -> Vec<(K, usize)> {
        self.iter().map(|(id, pos)| (id.clone(), pos)).collect()
    }
}

impl NodeIndex<NodeKey> {
    /// Index a table column, returning the index plus the position of every
    /// row. Null cells fail with `TypeMismatch`.
    pub fn from_cells<'a, I>(column: &str, cells: I) -> Result<(Self, Vec<usize>)>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut index = Self::new();
        let mut positions = Vec::new();
        for (row, cell) in cells.into_iter().enumerate() {
            let key = cell.to_key().ok_or_else(|| Error::TypeMismatch {
                column: column.to_owned(),
                row,
                expected: "non-null identifier".into(),
                got: cell.type_name().into(),
            })?;
            positions.push(index.intern(&key));
        }
        Ok((index, positions))
    }
}

/// Serialized as the identifier list; position is the list offset.
impl<K: NodeIdentifier + Serialize> Serialize for NodeIndex<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}
