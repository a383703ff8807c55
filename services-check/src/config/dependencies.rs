//! Dependency initialization and wiring for the harness.

use std::env;
use std::sync::Arc;

use tracing::{info, warn};

use crate::relational::{PostgresStore, RelationalStore};
use crate::CheckError;
use services_context::{Context7Client, ContextProvider};
use services_vector::{VectorStoreClient, VectorStoreConfig};

/// Environment variable holding the relational store URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// The three collaborators a harness run probes.
///
/// Construction never fails as a whole: a collaborator that cannot be built
/// is kept as its error so the matching check reports it.
pub struct Dependencies {
    pub relational: Result<Arc<dyn RelationalStore>, CheckError>,
    pub context: Arc<dyn ContextProvider>,
    pub vector: Result<VectorStoreClient, CheckError>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection URL, unless `database_url` is given
    /// - `CONTEXT7_API_KEY`, `CONTEXT7_BASE_URL`: Context7 API settings
    /// - `QDRANT_URL`, `QDRANT_API_KEY`: vector store settings
    ///
    /// # Arguments
    ///
    /// * `database_url` - Overrides `DATABASE_URL` when present
    pub async fn from_env(database_url: Option<String>) -> Self {
        let database_url = database_url
            .or_else(|| env::var(DATABASE_URL_VAR).ok())
            .filter(|url| !url.trim().is_empty());

        let relational = match database_url {
            Some(url) => PostgresStore::connect_lazy(&url)
                .map(|store| Arc::new(store) as Arc<dyn RelationalStore>),
            None => Err(CheckError::config(format!(
                "{} not configured",
                DATABASE_URL_VAR
            ))),
        };

        let context: Arc<dyn ContextProvider> = Arc::new(Context7Client::from_env());

        let vector_config = VectorStoreConfig::from_env();
        info!(
            vector_target = %vector_config.target(),
            collection = %vector_config.collection_name,
            search_configured = context.is_configured(),
            "Initializing dependencies"
        );

        let vector = VectorStoreClient::connect(vector_config)
            .await
            .map_err(CheckError::from);

        if let Err(e) = &relational {
            warn!(error = %e, "Relational store not available");
        }
        if let Err(e) = &vector {
            warn!(error = %e, "Vector store client not available");
        }

        Self {
            relational,
            context,
            vector,
        }
    }
}
