//! Error types for the vector store.

mod store_error;

pub use store_error::StoreError;
