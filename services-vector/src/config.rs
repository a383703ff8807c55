//! Configuration types for the vector store client.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::types::{CollectionParams, Distance};

/// Environment variable holding the Qdrant URL.
pub const URL_VAR: &str = "QDRANT_URL";

/// Environment variable holding the Qdrant API key.
pub const API_KEY_VAR: &str = "QDRANT_API_KEY";

/// Host used when no URL is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Qdrant gRPC port used when no URL is configured.
pub const DEFAULT_PORT: u16 = 6334;

/// Collection holding task vectors.
pub const DEFAULT_COLLECTION: &str = "tasks";

/// Embedding dimensionality of the deployment's embedding model.
pub const DEFAULT_VECTOR_SIZE: usize = 1536;

/// Connection timeout handed to the underlying client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the vector store client.
#[derive(Clone)]
pub struct VectorStoreConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub collection_name: String,
    pub vector_size: usize,
    pub distance: Distance,
    pub timeout: Duration,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            collection_name: DEFAULT_COLLECTION.to_string(),
            vector_size: DEFAULT_VECTOR_SIZE,
            distance: Distance::Cosine,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl VectorStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QDRANT_URL`: Qdrant server URL (unset: local default)
    /// - `QDRANT_API_KEY`: API key, only used together with `QDRANT_URL`
    pub fn from_env() -> Self {
        let non_empty = |var: &str| env::var(var).ok().filter(|v| !v.trim().is_empty());

        Self {
            url: non_empty(URL_VAR),
            api_key: non_empty(API_KEY_VAR),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    pub fn with_vector_size(mut self, vector_size: usize) -> Self {
        self.vector_size = vector_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parameters used when provisioning the collection.
    pub fn collection_params(&self) -> CollectionParams {
        CollectionParams {
            vector_size: self.vector_size,
            distance: self.distance,
        }
    }

    pub fn target(&self) -> ConnectionTarget {
        ConnectionTarget::resolve(self)
    }
}

impl fmt::Debug for VectorStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorStoreConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("collection_name", &self.collection_name)
            .field("vector_size", &self.vector_size)
            .field("distance", &self.distance)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Where the vector store client connects.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Remote instance with an API key.
    Authenticated { url: String, api_key: String },
    /// Instance reachable without an API key.
    Url { url: String },
    /// Local instance on the default host and port.
    Local { host: String, port: u16 },
}

impl ConnectionTarget {
    /// Resolve the target: URL and key, then URL alone, then the local default.
    ///
    /// A key without a URL is ignored.
    pub fn resolve(config: &VectorStoreConfig) -> Self {
        match (&config.url, &config.api_key) {
            (Some(url), Some(api_key)) => ConnectionTarget::Authenticated {
                url: url.clone(),
                api_key: api_key.clone(),
            },
            (Some(url), None) => ConnectionTarget::Url { url: url.clone() },
            (None, _) => ConnectionTarget::Local {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
        }
    }

    /// URL the client dials.
    pub fn url(&self) -> String {
        match self {
            ConnectionTarget::Authenticated { url, .. } | ConnectionTarget::Url { url } => {
                url.clone()
            }
            ConnectionTarget::Local { host, port } => format!("http://{}:{}", host, port),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        match self {
            ConnectionTarget::Authenticated { api_key, .. } => Some(api_key),
            _ => None,
        }
    }
}

impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::Authenticated { url, .. } => write!(f, "{} (api key)", url),
            ConnectionTarget::Url { url } => write!(f, "{}", url),
            ConnectionTarget::Local { .. } => write!(f, "{} (local)", self.url()),
        }
    }
}
