//! Qdrant backend implementation.
//!
//! This module provides the concrete implementation of `VectorBackend`
//! using the `qdrant-client` crate.

use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, DeletePointsBuilder, Distance as QdrantDistance, PointId,
    PointStruct, PointsIdsList, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant, QdrantError};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::config::ConnectionTarget;
use crate::errors::StoreError;
use crate::interfaces::VectorBackend;
use crate::types::{CollectionInfo, CollectionParams, Distance};
use services_shared::{ScoredRecord, VectorRecord};

/// Qdrant vector backend.
///
/// Holds one long-lived client for the life of the process. The underlying
/// gRPC channel is established lazily, so construction only fails on an
/// invalid target.
pub struct QdrantBackend {
    client: Qdrant,
}

impl QdrantBackend {
    /// Build a client for the resolved connection target.
    ///
    /// # Arguments
    ///
    /// * `target` - Resolved connection target
    /// * `timeout` - Per-request timeout applied by the underlying client
    ///
    /// # Returns
    ///
    /// * `Ok(QdrantBackend)` - A new backend instance
    /// * `Err(StoreError)` - If the client cannot be configured
    pub fn connect(target: &ConnectionTarget, timeout: Duration) -> Result<Self, StoreError> {
        let mut builder = Qdrant::from_url(&target.url()).timeout(timeout);
        if let Some(api_key) = target.api_key() {
            builder = builder.api_key(api_key.to_string());
        }

        let client = builder
            .build()
            .map_err(|e| StoreError::connection(e.to_string()))?;

        info!(endpoint = %target, "Created Qdrant client");

        Ok(Self { client })
    }
}

impl From<QdrantError> for StoreError {
    fn from(err: QdrantError) -> Self {
        StoreError::operation(err.to_string())
    }
}

impl From<Distance> for QdrantDistance {
    fn from(distance: Distance) -> Self {
        match distance {
            Distance::Cosine => QdrantDistance::Cosine,
            Distance::Dot => QdrantDistance::Dot,
        }
    }
}

/// Ids in canonical decimal form map to integer point ids; everything else
/// is sent as a UUID string, which the server validates. Non-canonical forms
/// such as `042` or `+7` stay strings so they never alias another id.
fn to_point_id(id: &str) -> PointId {
    match id.parse::<u64>() {
        Ok(num) if num.to_string() == id => PointId::from(num),
        _ => PointId::from(id.to_string()),
    }
}

fn from_point_id(id: PointId) -> String {
    match id.point_id_options {
        Some(PointIdOptions::Num(num)) => num.to_string(),
        Some(PointIdOptions::Uuid(uuid)) => uuid,
        None => String::new(),
    }
}

fn to_point(record: VectorRecord) -> Result<PointStruct, StoreError> {
    let payload = Payload::try_from(Value::Object(record.payload))
        .map_err(|e| StoreError::payload(e.to_string()))?;

    Ok(PointStruct::new(
        to_point_id(&record.id),
        record.embedding,
        payload,
    ))
}

#[async_trait]
impl VectorBackend for QdrantBackend {
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .client
            .list_collections()
            .await
            .map_err(|e| StoreError::collection(e.to_string()))?;

        Ok(response
            .collections
            .into_iter()
            .map(|collection| collection.name)
            .collect())
    }

    #[instrument(skip(self, params))]
    async fn create_collection(
        &self,
        name: &str,
        params: &CollectionParams,
    ) -> Result<(), StoreError> {
        let distance: QdrantDistance = params.distance.into();
        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(VectorParamsBuilder::new(params.vector_size as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::collection(e.to_string()))?;

        debug!(vector_size = params.vector_size, "Collection created");
        Ok(())
    }

    async fn collection_info(&self, name: &str) -> Result<CollectionInfo, StoreError> {
        let response = self
            .client
            .collection_info(name)
            .await
            .map_err(|e| StoreError::collection(e.to_string()))?;

        let info = response
            .result
            .ok_or_else(|| StoreError::collection_not_found(name))?;

        Ok(CollectionInfo {
            name: name.to_string(),
            points_count: info.points_count.unwrap_or(0),
        })
    }

    async fn upsert(&self, collection: &str, records: Vec<VectorRecord>) -> Result<(), StoreError> {
        let points = records
            .into_iter()
            .map(to_point)
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await?;

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(collection, query.to_vec(), limit as u64)
                    .with_payload(true),
            )
            .await?;

        // Qdrant already returns hits ordered by descending score.
        Ok(response
            .result
            .into_iter()
            .map(|point| ScoredRecord {
                id: point.id.map(from_point_id).unwrap_or_default(),
                payload: point
                    .payload
                    .into_iter()
                    .map(|(key, value)| (key, value.into_json()))
                    .collect::<Map<String, Value>>(),
                score: point.score,
            })
            .collect())
    }

    async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), StoreError> {
        let ids: Vec<PointId> = ids.iter().map(|id| to_point_id(id)).collect();

        self.client
            .delete_points(
                DeletePointsBuilder::new(collection)
                    .points(PointsIdsList { ids })
                    .wait(true),
            )
            .await?;

        Ok(())
    }
}
