//! Vector backend trait definition.
//!
//! This module defines the abstract interface for vector database operations,
//! allowing for different backend implementations (Qdrant, in-memory, etc.).

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::types::{CollectionInfo, CollectionParams};
use services_shared::{ScoredRecord, VectorRecord};

/// Abstract interface for vector database operations.
///
/// Implementations are injected into `VectorStoreClient`, which owns the
/// error-to-envelope conversion. Backends report failures as `StoreError`.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// List the names of all collections.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Create a collection.
    ///
    /// Fails if a collection with the same name already exists; callers that
    /// need idempotence must check `list_collections` first.
    async fn create_collection(
        &self,
        name: &str,
        params: &CollectionParams,
    ) -> Result<(), StoreError>;

    /// Fetch collection metadata.
    ///
    /// # Returns
    ///
    /// * `Ok(CollectionInfo)` - If the collection exists and is reachable
    /// * `Err(StoreError)` - If the lookup fails
    async fn collection_info(&self, name: &str) -> Result<CollectionInfo, StoreError>;

    /// Insert or replace records by id.
    async fn upsert(&self, collection: &str, records: Vec<VectorRecord>) -> Result<(), StoreError>;

    /// Return up to `limit` records ordered by descending similarity.
    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError>;

    /// Remove records by id. Missing ids are not an error.
    async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), StoreError>;
}
