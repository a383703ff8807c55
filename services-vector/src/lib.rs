//! # Services Vector
//!
//! Vector store client for a single named collection. It provides the
//! `VectorBackend` interface, a Qdrant implementation, an in-memory
//! implementation, and the `VectorStoreClient` that application code uses.
//!
//! The client never returns `Err`: writes report a
//! [`StatusEnvelope`](services_shared::StatusEnvelope), searches fall back to
//! an empty list, and health checks answer `false`.

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod qdrant;
pub mod types;

pub use client::{VectorStoreClient, DEFAULT_SEARCH_LIMIT};
pub use config::{ConnectionTarget, VectorStoreConfig};
pub use errors::StoreError;
pub use interfaces::VectorBackend;
pub use memory::MemoryBackend;
pub use qdrant::QdrantBackend;
pub use types::{CollectionInfo, CollectionParams, Distance};
