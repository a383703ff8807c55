//! Vector store client implementation.
//!
//! This module provides the main client for a single named collection.
//! Application code uses it to upsert, search, and delete task vectors.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};

use crate::config::VectorStoreConfig;
use crate::errors::StoreError;
use crate::interfaces::VectorBackend;
use crate::qdrant::QdrantBackend;
use services_shared::{Envelope, ScoredRecord, ServiceError, StatusEnvelope, VectorRecord};

/// Number of hits returned when callers have no preference.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// The main client for interacting with the vector collection.
///
/// No method returns `Err` or panics on a store failure: writes answer with a
/// [`StatusEnvelope`], searches fall back to an empty list, and health checks
/// answer `false`. Every failure is logged with its underlying message.
pub struct VectorStoreClient {
    backend: Arc<dyn VectorBackend>,
    config: VectorStoreConfig,
}

impl VectorStoreClient {
    /// Create a client and provision the collection.
    ///
    /// Provisioning failures are logged but do not abort construction; later
    /// calls will then fail individually.
    pub async fn new(backend: Arc<dyn VectorBackend>, config: VectorStoreConfig) -> Self {
        let client = Self { backend, config };
        client.ensure_collection().await;
        client
    }

    /// Resolve the connection target from `config`, build a Qdrant backend, and
    /// provision the collection.
    ///
    /// # Returns
    ///
    /// * `Ok(VectorStoreClient)` - A new client, even if the store is unreachable
    /// * `Err(StoreError)` - If the Qdrant client cannot be configured
    pub async fn connect(config: VectorStoreConfig) -> Result<Self, StoreError> {
        let backend = QdrantBackend::connect(&config.target(), config.timeout)?;
        Ok(Self::new(Arc::new(backend), config).await)
    }

    pub fn config(&self) -> &VectorStoreConfig {
        &self.config
    }

    pub fn collection_name(&self) -> &str {
        &self.config.collection_name
    }

    /// Create the collection if it is absent. Safe to call repeatedly.
    #[instrument(skip(self), fields(collection = %self.config.collection_name))]
    pub async fn ensure_collection(&self) -> StatusEnvelope {
        let name = self.collection_name();

        let existing = match self.backend.list_collections().await {
            Ok(existing) => existing,
            Err(e) => {
                error!(error = %e, "Error initializing vector collection");
                return StatusEnvelope::error(e.to_string());
            }
        };

        if existing.iter().any(|n| n == name) {
            info!("Vector collection already exists");
            return StatusEnvelope::success("Collection already exists");
        }

        match self
            .backend
            .create_collection(name, &self.config.collection_params())
            .await
        {
            Ok(()) => {
                info!(
                    vector_size = self.config.vector_size,
                    "Created vector collection"
                );
                StatusEnvelope::success("Collection created")
            }
            Err(e) => {
                error!(error = %e, "Error initializing vector collection");
                StatusEnvelope::error(e.to_string())
            }
        }
    }

    fn check_dimensions(&self, actual: usize) -> Result<(), StoreError> {
        if actual != self.config.vector_size {
            return Err(StoreError::dimension_mismatch(self.config.vector_size, actual));
        }
        Ok(())
    }

    /// Insert or replace one record.
    #[instrument(skip(self, embedding, payload))]
    pub async fn add_vector(
        &self,
        id: &str,
        embedding: Vec<f32>,
        payload: Map<String, Value>,
    ) -> StatusEnvelope {
        if let Err(e) = self.check_dimensions(embedding.len()) {
            warn!(error = %e, "Rejected vector with wrong dimensionality");
            return StatusEnvelope::error(e.to_string());
        }

        let record = VectorRecord::new(id, embedding, payload);
        match self
            .backend
            .upsert(self.collection_name(), vec![record])
            .await
        {
            Ok(()) => StatusEnvelope::success("Vector added successfully"),
            Err(e) => {
                error!(error = %e, "Error adding vector");
                StatusEnvelope::error(e.to_string())
            }
        }
    }

    /// Nearest records to `query`, closest first, or the reason the search failed.
    #[instrument(skip(self, query))]
    pub async fn try_search_similar(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Envelope<Vec<ScoredRecord>> {
        if let Err(e) = self.check_dimensions(query.len()) {
            warn!(error = %e, "Rejected query with wrong dimensionality");
            return Envelope::Failure(ServiceError::store(e.to_string()));
        }

        match self
            .backend
            .search(self.collection_name(), query, limit)
            .await
        {
            Ok(hits) => Envelope::Success(hits),
            Err(e) => {
                error!(error = %e, "Error searching vectors");
                Envelope::Failure(ServiceError::store(e.to_string()))
            }
        }
    }

    /// Nearest records to `query`, closest first. Empty on any failure.
    pub async fn search_similar(&self, query: &[f32], limit: usize) -> Vec<ScoredRecord> {
        match self.try_search_similar(query, limit).await {
            Envelope::Success(hits) => hits,
            Envelope::Failure(_) => Vec::new(),
        }
    }

    /// Remove one record by id.
    #[instrument(skip(self))]
    pub async fn delete_vector(&self, id: &str) -> StatusEnvelope {
        match self
            .backend
            .delete(self.collection_name(), &[id.to_string()])
            .await
        {
            Ok(()) => StatusEnvelope::success("Vector deleted successfully"),
            Err(e) => {
                error!(error = %e, "Error deleting vector");
                StatusEnvelope::error(e.to_string())
            }
        }
    }

    /// `true` if the collection metadata can be fetched.
    pub async fn health_check(&self) -> bool {
        match self.backend.collection_info(self.collection_name()).await {
            Ok(_) => true,
            Err(e) => {
                error!(
                    collection = %self.collection_name(),
                    error = %e,
                    "Vector store health check failed"
                );
                false
            }
        }
    }
}
