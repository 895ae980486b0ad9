//! A single weighted cross-set edge.

use serde::{Deserialize, Serialize};

/// Weight assigned to an edge that carries none.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Edge between a top node and a bottom node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T, B> {
    pub top: T,
    pub bottom: B,
    pub weight: f64,
}

impl<T, B> Edge<T, B> {
    pub fn new(top: T, bottom: B) -> Self {
        Self { top, bottom, weight: DEFAULT_WEIGHT }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl<T, B> From<(T, B)> for Edge<T, B> {
    fn from((top, bottom): (T, B)) -> Self {
        Edge::new(top, bottom)
    }
}

impl<T, B> From<(T, B, f64)> for Edge<T, B> {
    fn from((top, bottom, weight): (T, B, f64)) -> Self {
        Edge::new(top, bottom).with_weight(weight)
    }
}

impl<T, B> From<(T, B, Option<f64>)> for Edge<T, B> {
    fn from((top, bottom, weight): (T, B, Option<f64>)) -> Self {
        Edge::new(top, bottom).with_weight(weight.unwrap_or(DEFAULT_WEIGHT))
    }
}
