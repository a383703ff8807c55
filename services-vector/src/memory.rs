//! In-memory vector backend.
//!
//! Keeps collections in process memory and scores them by brute force. Used
//! in tests and when running the harness without a vector database.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::interfaces::VectorBackend;
use crate::types::{CollectionInfo, CollectionParams, Distance};
use services_shared::{ScoredRecord, VectorRecord};

struct MemoryCollection {
    params: CollectionParams,
    records: BTreeMap<String, VectorRecord>,
}

/// Vector backend backed by a `HashMap` of collections.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, MemoryCollection>>,
    unreachable: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that fails every call with a connection error.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Number of collections currently held.
    pub async fn collection_count(&self) -> usize {
        self.collections.read().await.len()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable {
            return Err(StoreError::connection("vector store unreachable"));
        }
        Ok(())
    }
}

fn score(distance: Distance, a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match distance {
        Distance::Dot => dot,
        Distance::Cosine => {
            let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm_a == 0.0 || norm_b == 0.0 {
                0.0
            } else {
                dot / (norm_a * norm_b)
            }
        }
    }
}

#[async_trait]
impl VectorBackend for MemoryBackend {
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        self.check_reachable()?;
        Ok(self.collections.read().await.keys().cloned().collect())
    }

    async fn create_collection(
        &self,
        name: &str,
        params: &CollectionParams,
    ) -> Result<(), StoreError> {
        self.check_reachable()?;
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Err(StoreError::collection(format!(
                "Collection `{}` already exists",
                name
            )));
        }
        collections.insert(
            name.to_string(),
            MemoryCollection {
                params: *params,
                records: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn collection_info(&self, name: &str) -> Result<CollectionInfo, StoreError> {
        self.check_reachable()?;
        let collections = self.collections.read().await;
        let collection = collections
            .get(name)
            .ok_or_else(|| StoreError::collection_not_found(name))?;

        Ok(CollectionInfo {
            name: name.to_string(),
            points_count: collection.records.len() as u64,
        })
    }

    async fn upsert(&self, collection: &str, records: Vec<VectorRecord>) -> Result<(), StoreError> {
        self.check_reachable()?;
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::collection_not_found(collection))?;

        let expected = target.params.vector_size;
        if let Some(bad) = records.iter().find(|r| r.dimensions() != expected) {
            return Err(StoreError::dimension_mismatch(expected, bad.dimensions()));
        }

        for record in records {
            target.records.insert(record.id.clone(), record);
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        self.check_reachable()?;
        let collections = self.collections.read().await;
        let target = collections
            .get(collection)
            .ok_or_else(|| StoreError::collection_not_found(collection))?;

        if query.len() != target.params.vector_size {
            return Err(StoreError::dimension_mismatch(
                target.params.vector_size,
                query.len(),
            ));
        }

        let mut hits: Vec<ScoredRecord> = target
            .records
            .values()
            .map(|record| ScoredRecord {
                id: record.id.clone(),
                payload: record.payload.clone(),
                score: score(target.params.distance, query, &record.embedding),
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);

        Ok(hits)
    }

    async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), StoreError> {
        self.check_reachable()?;
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::collection_not_found(collection))?;

        for id in ids {
            target.records.remove(id);
        }
        Ok(())
    }
}
