//! Qdrant implementation of the vector backend.
//!
//! This module provides a concrete implementation of `VectorBackend`
//! using the official Qdrant client.

mod backend;

pub use backend::QdrantBackend;
