//! # Services Check
//!
//! Startup validation harness for the backend's external dependencies.
//!
//! The harness probes the relational store, the Context7 search API, and the
//! Qdrant vector store in sequence, prints one line per check and a summary
//! table, and derives the process exit code from the outcomes.

pub mod checks;
pub mod config;
pub mod relational;
pub mod report;

pub use checks::{run_checks, SeverityPolicy};
pub use config::Dependencies;
pub use relational::{PostgresStore, RelationalStore};
pub use report::{CheckOutcome, CheckResult, ValidationReport};

use thiserror::Error;

/// Errors raised while wiring or probing the harness dependencies.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Relational store error.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Vector store error.
    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] services_vector::StoreError),
}

impl CheckError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
