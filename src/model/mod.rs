//! # Bipartite Network Model
//!
//! Plain data types that cross every boundary: ingestion ↔ indexing ↔
//! matrix construction ↔ user.
//!
//! Design rule: no sparse-matrix types here. This module is pure data.

pub mod value;
pub mod edge;
pub mod edge_table;
pub mod side;

pub use value::{FloatKey, NodeKey, Value};
pub use edge::{Edge, DEFAULT_WEIGHT};
pub use edge_table::EdgeTable;
pub use side::Side;
