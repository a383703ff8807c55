//! Vector record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record stored in a vector collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Opaque identifier; upserts replace the record with the same id.
    pub id: String,
    /// Embedding whose length must match the collection's dimensionality.
    pub embedding: Vec<f32>,
    /// Arbitrary context returned alongside search hits.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, embedding: Vec<f32>, payload: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            embedding,
            payload,
        }
    }

    /// Number of dimensions in the embedding.
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

/// A similarity search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
    /// Similarity as reported by the store; higher is closer.
    pub score: f32,
}
