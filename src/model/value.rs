//! Cell values of an edge table and the key type derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of an [`EdgeTable`](super::EdgeTable).
///
/// Ingestion types each cell once from its raw text: empty → `Null`, then
/// integer, float, boolean, and finally string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Node key for this cell. Only `Null` cannot identify a node.
    pub fn to_key(&self) -> Option<NodeKey> {
        match self {
            Value::Int(i) => Some(NodeKey::Int(*i)),
            Value::Float(f) => Some(NodeKey::from_float(*f)),
            Value::String(s) => Some(NodeKey::Str(s.clone())),
            Value::Bool(b) => Some(NodeKey::Bool(*b)),
            Value::Null => None,
        }
    }

    /// Type a raw delimited-text field. The text is used as-is: `" 7"` is
    /// the string `" 7"`, not the integer 7.
    pub fn parse_cell(raw: &str) -> Value {
        if raw.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
        // "nan" / "inf" stay strings
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        match raw {
            "true" | "True" | "TRUE" => Value::Bool(true),
            "false" | "False" | "FALSE" => Value::Bool(false),
            _ => Value::String(raw.to_owned()),
        }
    }
}

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

/// Float identifier compared by bit pattern.
///
/// `-0.0` folds to `0.0` and every NaN folds to one value, so equal-looking
/// cells land on the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        let canonical = if value.is_nan() {
            f64::NAN
        } else if value == 0.0 {
            0.0
        } else {
            value
        };
        FloatKey(canonical.to_bits())
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl Serialize for FloatKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for FloatKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(FloatKey::new)
    }
}

/// Hashable node identifier taken from a table cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Int(i64),
    Bool(bool),
    Float(FloatKey),
    Str(String),
}

impl NodeKey {
    pub fn from_float(value: f64) -> Self {
        NodeKey::Float(FloatKey::new(value))
    }
}

impl From<i64> for NodeKey { fn from(v: i64) -> Self { NodeKey::Int(v) } }
impl From<i32> for NodeKey { fn from(v: i32) -> Self { NodeKey::Int(v as i64) } }
impl From<bool> for NodeKey { fn from(v: bool) -> Self { NodeKey::Bool(v) } }
impl From<f64> for NodeKey { fn from(v: f64) -> Self { NodeKey::from_float(v) } }
impl From<String> for NodeKey { fn from(v: String) -> Self { NodeKey::Str(v) } }
impl From<&str> for NodeKey { fn from(v: &str) -> Self { NodeKey::Str(v.to_owned()) } }

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(i) => write!(f, "{i}"),
            NodeKey::Bool(b) => write!(f, "{b}"),
            NodeKey::Float(k) => write!(f, "{}", k.value()),
            NodeKey::Str(s) => write!(f, "{s}"),
        }
    }
}
