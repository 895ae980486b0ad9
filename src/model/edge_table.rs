//! EdgeTable: the row/column input handed over by the ingestion layer.

use super::Value;
use crate::{Error, Result};

/// Ordered rows with named columns.
///
/// Every row has exactly one cell per column; `push_row` rejects ragged
/// rows so that column lookups never go out of bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl EdgeTable {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from a column header and a list of rows.
    pub fn from_rows<R, V>(
        columns: impl IntoIterator<Item = impl Into<String>>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row<V: Into<Value>>(&mut self, row: impl IntoIterator<Item = V>) -> Result<()> {
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(Error::InputShape(format!(
                "row {} has {} cells, expected {} ({})",
                self.rows.len(),
                row.len(),
                self.columns.len(),
                self.columns.join(", "),
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column; `InputShape` if absent.
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.columns.iter().position(|c| c == name).ok_or_else(|| {
            Error::InputShape(format!(
                "column '{name}' not found (available: {})",
                self.columns.join(", ")
            ))
        })
    }

    /// Cells of a named column, in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let pos = self.column_position(name)?;
        Ok(self.rows.iter().map(move |row| &row[pos]))
    }
}
