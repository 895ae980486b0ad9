//! # birank: Bipartite Network Core
//!
//! Turns a bipartite edge list into the artifacts a ranking algorithm
//! consumes: stable node indices, a sparse weighted adjacency matrix,
//! unipartite projections and per-node degrees.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: a `BipartiteNetwork` owns its index tables and matrix
//! 2. **Rebuild, never patch**: `set_edges` replaces all derived state at once
//! 3. **Generic keys**: identifiers are any `Eq + Hash + Clone` type
//! 4. **Topology vs. weight**: degree counts neighbors, projection sums weights
//!
//! ## Quick Start
//!
//! ```rust
//! use birank::{BipartiteNetwork, EdgeTable, Side, Value};
//!
//! # fn example() -> birank::Result<()> {
//! let table = EdgeTable::from_rows(
//!     ["user", "item", "weight"],
//!     [
//!         [Value::from("u1"), Value::from("i1"), Value::Int(1)],
//!         [Value::from("u1"), Value::from("i2"), Value::Int(1)],
//!         [Value::from("u2"), Value::from("i1"), Value::Int(2)],
//!     ],
//! )?;
//!
//! let network = BipartiteNetwork::from_table(&table, "user", "item", Some("weight"))?;
//! let users = network.project(Side::Top)?;
//! assert_eq!(users.weight(&"u1".into(), &"u2".into()), 2.0);
//!
//! let (user_degree, _item_degree) = network.degrees()?;
//! assert_eq!(user_degree.get(&"u1".into()), Some(2));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Ingestion | `ingest` | `EdgeTable` |
//! | Indexing | `index` | `NodeIndex` per side |
//! | Adjacency | `matrix` | D×P `SparseMatrix` |
//! | Projection | `projection` | N×N `Projection` |
//! | Degree | `degree` | `DegreeTable` per side |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod index;
pub mod matrix;
pub mod projection;
pub mod degree;
pub mod network;
pub mod ingest;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Edge, EdgeTable, FloatKey, NodeKey, Side, Value, DEFAULT_WEIGHT};

// ============================================================================
// Re-exports: Core
// ============================================================================

pub use index::{NodeIdentifier, NodeIndex};
pub use matrix::{SparseMatrix, Triplet};
pub use projection::Projection;
pub use degree::DegreeTable;
pub use network::{BipartiteNetwork, SharedNetwork};
pub use ingest::EdgeListConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required column absent, ragged row, or unknown side name.
    #[error("Input shape error: {0}")]
    InputShape(String),

    #[error("Type mismatch in column '{column}' at row {row}: expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        row: usize,
        expected: String,
        got: String,
    },

    /// Internal invariant violation. Never produced by valid input.
    #[error("Index consistency violation: {0}")]
    IndexConsistency(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
