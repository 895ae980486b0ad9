//! Delimited edge-list ingestion.
//!
//! Reads a delimited text resource into an [`EdgeTable`]. Which columns
//! carry the top identifiers, bottom identifiers and weights is described
//! by [`EdgeListConfig`]; the table itself keeps every column.
//!
//! ```text
//! top,bottom,weight
//! t1,b1,1
//! t1,b2,1
//! t2,b1,2
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{EdgeTable, Value};
use crate::Result;

/// Column selection and format of a delimited edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeListConfig {
    pub top_column: String,
    pub bottom_column: String,
    /// Absent → every edge weighs 1.0
    pub weight_column: Option<String>,
    pub delimiter: u8,
    /// Without a header row, columns are named by position: "0", "1", ...
    pub has_headers: bool,
}

impl Default for EdgeListConfig {
    fn default() -> Self {
        Self {
            top_column: "top".into(),
            bottom_column: "bottom".into(),
            weight_column: None,
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl EdgeListConfig {
    pub fn new(top_column: impl Into<String>, bottom_column: impl Into<String>) -> Self {
        Self {
            top_column: top_column.into(),
            bottom_column: bottom_column.into(),
            ..Self::default()
        }
    }

    pub fn with_weight_column(mut self, column: impl Into<String>) -> Self {
        self.weight_column = Some(column.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Read an edge table from any reader.
///
/// Ragged records are reported by the csv reader; a record shorter than
/// the header never reaches the table.
pub fn read_edge_table<R: Read>(reader: R, config: &EdgeListConfig) -> Result<EdgeTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .from_reader(reader);

    let mut table = if config.has_headers {
        EdgeTable::new(reader.headers()?.iter().map(|h| h.trim().to_owned()))
    } else {
        EdgeTable::default()
    };

    for record in reader.records() {
        let record = record?;
        if !config.has_headers && table.columns().is_empty() {
            table = EdgeTable::new((0..record.len()).map(|i| i.to_string()));
        }
        table.push_row(record.iter().map(Value::parse_cell))?;
    }

    debug!(rows = table.len(), columns = table.columns().len(), "read edge table");
    Ok(table)
}

/// Read an edge table from a file on disk.
pub fn load_edge_table(path: impl AsRef<Path>, config: &EdgeListConfig) -> Result<EdgeTable> {
    let file = File::open(path.as_ref())?;
    read_edge_table(file, config)
}
