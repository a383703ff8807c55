//! Vector store error types.
//!
//! This module defines the error types that can occur during vector store operations.

use thiserror::Error;

/// Errors that can occur during vector store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Failed to reach or configure the vector database.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to list, create, or inspect a collection.
    #[error("Collection error: {0}")]
    CollectionError(String),

    /// The collection does not exist.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Embedding length differs from the collection's dimensionality.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Payload could not be converted for the store.
    #[error("Payload error: {0}")]
    PayloadError(String),

    /// An upsert, search, or delete failed.
    #[error("Operation error: {0}")]
    OperationError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a collection error.
    pub fn collection(msg: impl Into<String>) -> Self {
        Self::CollectionError(msg.into())
    }

    /// Create a collection not found error.
    pub fn collection_not_found(name: &str) -> Self {
        Self::CollectionNotFound(name.to_string())
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a payload error.
    pub fn payload(msg: impl Into<String>) -> Self {
        Self::PayloadError(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::OperationError(msg.into())
    }
}
