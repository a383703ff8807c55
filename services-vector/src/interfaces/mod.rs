//! Interface definitions for vector store backends.
//!
//! This module defines the abstract `VectorBackend` trait that allows the
//! client to run against Qdrant or an in-memory store.

mod vector_backend;

pub use vector_backend::VectorBackend;
