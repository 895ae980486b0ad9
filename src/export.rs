//! Artifact export: index tables, degree tables and projections as
//! delimited text or JSON.
//!
//! Delimited output is what downstream ranking tools load:
//!
//! ```text
//! index tables      → id,index
//! degree tables     → id,degree
//! projections       → source,target,weight   (one row per stored entry)
//! ```

use std::fmt::Display;
use std::io::Write;

use serde::Serialize;
use serde_json::json;

use crate::degree::DegreeTable;
use crate::index::{NodeIdentifier, NodeIndex};
use crate::ingest::EdgeListConfig;
use crate::projection::Projection;
use crate::Result;

/// Writer honoring the delimiter and header setting of `config`, so an
/// artifact reads back through [`read_edge_table`](crate::ingest::read_edge_table)
/// with the same config.
fn delimited<'w>(
    writer: &'w mut dyn Write,
    config: &EdgeListConfig,
    header: &[&str],
) -> Result<csv::Writer<&'w mut dyn Write>> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);
    if config.has_headers {
        out.write_record(header)?;
    }
    Ok(out)
}

/// Write `id,index` rows for every indexed identifier.
pub fn write_index_table<K: NodeIdentifier + Display>(
    index: &NodeIndex<K>,
    writer: &mut dyn Write,
    config: &EdgeListConfig,
) -> Result<()> {
    let mut out = delimited(writer, config, &["id", "index"])?;
    for (id, pos) in index.iter() {
        out.write_record([id.to_string(), pos.to_string()])?;
    }
    out.flush()?;
    Ok(())
}

/// Write `id,degree` rows.
pub fn write_degree_table<K: NodeIdentifier + Display>(
    table: &DegreeTable<K>,
    writer: &mut dyn Write,
    config: &EdgeListConfig,
) -> Result<()> {
    let mut out = delimited(writer, config, &["id", "degree"])?;
    for (id, degree) in table.iter() {
        out.write_record([id.to_string(), degree.to_string()])?;
    }
    out.flush()?;
    Ok(())
}

/// Write one `source,target,weight` row per stored projection entry.
/// Both orientations of every pair are written.
pub fn write_projection<K: NodeIdentifier + Display>(
    projection: &Projection<K>,
    writer: &mut dyn Write,
    config: &EdgeListConfig,
) -> Result<()> {
    let mut out = delimited(writer, config, &["source", "target", "weight"])?;
    for (source, target, weight) in projection.entries() {
        out.write_record([source.to_string(), target.to_string(), weight.to_string()])?;
    }
    out.flush()?;
    Ok(())
}

/// JSON form of a projection: side, node list, shape and stored entries by
/// position.
pub fn projection_to_json<K: NodeIdentifier + Serialize>(
    projection: &Projection<K>,
) -> Result<serde_json::Value> {
    let entries: Vec<_> = crate::matrix::triplets(&projection.matrix)
        .map(|t| json!([t.row, t.col, t.value]))
        .collect();
    Ok(json!({
        "side": projection.side,
        "nodes": serde_json::to_value(&projection.index)?,
        "shape": [projection.matrix.rows(), projection.matrix.cols()],
        "entries": entries,
    }))
}

pub fn degrees_to_json<T: NodeIdentifier + Serialize, B: NodeIdentifier + Serialize>(
    top: &DegreeTable<T>,
    bottom: &DegreeTable<B>,
) -> Result<serde_json::Value> {
    Ok(json!({
        "top": serde_json::to_value(top)?,
        "bottom": serde_json::to_value(bottom)?,
    }))
}

/// Quote a field that would otherwise break the row.
fn format_field(value: &impl Display) -> String {
    let s = value.to_string();
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s
    }
}
