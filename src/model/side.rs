//! The two node classes of a bipartite network.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Which node set an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Resolve a column name to the side it identifies.
    ///
    /// A name matching neither column is an `InputShape` error rather than
    /// a silent fallback to either side.
    pub fn from_column(name: &str, top_column: &str, bottom_column: &str) -> Result<Side> {
        if name == top_column {
            Ok(Side::Top)
        } else if name == bottom_column {
            Ok(Side::Bottom)
        } else {
            Err(Error::InputShape(format!(
                "'{name}' names neither the top column '{top_column}' nor the bottom column '{bottom_column}'"
            )))
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
        }
    }
}
