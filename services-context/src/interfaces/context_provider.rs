//! Contextual-search provider trait definition.

use async_trait::async_trait;
use serde_json::{Map, Value};

use services_shared::Envelope;

/// Abstract interface for a remote contextual-search/document API.
///
/// Unlike most repository traits, methods do not return `Result`: failures
/// are reported inside the returned [`Envelope`] so that no transport error
/// ever reaches the caller as an `Err`.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Search for contextual information.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text query
    /// * `filters` - Optional filter map; an empty map is sent when `None`
    async fn search_context(
        &self,
        query: &str,
        filters: Option<Map<String, Value>>,
    ) -> Envelope<Value>;

    /// Fetch a single document by identifier.
    ///
    /// The id is sent as one path segment; `""`, `.` and `..` are rejected.
    async fn get_document(&self, doc_id: &str) -> Envelope<Value>;

    /// Create a document.
    ///
    /// # Arguments
    ///
    /// * `content` - Document body
    /// * `metadata` - Optional metadata; an empty map is sent when `None`
    async fn add_document(
        &self,
        content: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Envelope<Value>;

    /// Probe the API without mutating it.
    ///
    /// Returns `true` only if the probe succeeded and its payload carries no
    /// `error` key.
    async fn health_check(&self) -> bool;

    /// Whether a credential is available. When `false`, every call
    /// short-circuits with a configuration failure.
    fn is_configured(&self) -> bool;
}
