//! Context7 client implementation.
//!
//! This module provides the concrete implementation of `ContextProvider`
//! using `reqwest`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::{ContextSearchConfig, API_KEY_VAR};
use crate::interfaces::ContextProvider;
use services_shared::{Envelope, ErrorKind, ServiceError};

/// Context7 API client.
///
/// Each request builds its own HTTP client, so the connection is released on
/// every exit path and no state is shared between calls.
///
/// # Example
///
/// ```ignore
/// let client = Context7Client::new(ContextSearchConfig::from_env());
/// match client.search_context("rust async traits", None).await {
///     Envelope::Success(results) => println!("{}", results),
///     Envelope::Failure(err) => eprintln!("search failed: {}", err),
/// }
/// ```
pub struct Context7Client {
    config: ContextSearchConfig,
    base_url: Result<Url, url::ParseError>,
}

impl Context7Client {
    /// Create a new client. A missing API key or a malformed base URL is
    /// logged, not rejected; every call then fails without I/O.
    pub fn new(config: ContextSearchConfig) -> Self {
        let base_url = Url::parse(&config.base_url);
        if let Err(e) = &base_url {
            error!(base_url = %config.base_url, error = %e, "Invalid Context7 base URL");
        }

        if config.is_configured() {
            info!(base_url = %config.base_url, "Created Context7 client");
        } else {
            warn!(
                "{} not found in settings. Context7 API will not function.",
                API_KEY_VAR
            );
        }

        Self { config, base_url }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Self {
        Self::new(ContextSearchConfig::from_env())
    }

    pub fn config(&self) -> &ContextSearchConfig {
        &self.config
    }

    /// Append `segments` to the base URL path. Each segment is percent-encoded,
    /// so `/`, `?` and `#` inside a segment stay inside it.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let invalid = || {
            ServiceError::new(
                ErrorKind::Configuration,
                format!("Invalid base URL: {}", self.config.base_url),
            )
        };

        let mut url = self.base_url.clone().map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Send one authenticated request and normalize the outcome.
    #[instrument(skip(self, body))]
    async fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Envelope<Value> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Envelope::Failure(ServiceError::not_configured(API_KEY_VAR));
        };

        let url = match self.endpoint(segments) {
            Ok(url) => url,
            Err(e) => return Envelope::Failure(e),
        };

        let client = match reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "Failed to create HTTP client");
                return Envelope::Failure(ServiceError::transport(format!(
                    "Request error: {}",
                    e
                )));
            }
        };

        let mut request = client
            .request(method, url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Request error occurred");
                return Envelope::Failure(ServiceError::transport(format!(
                    "Request error: {}",
                    e
                )));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %error_body, "HTTP error occurred");
            return Envelope::Failure(ServiceError::remote(
                status.as_u16(),
                format!("HTTP error: {}", status.as_u16()),
            ));
        }

        match response.json::<Value>().await {
            Ok(payload) => {
                debug!(status = status.as_u16(), "Request succeeded");
                Envelope::Success(payload)
            }
            Err(e) if e.is_decode() => {
                error!(error = %e, "Failed to decode response");
                Envelope::Failure(ServiceError::decode(format!("Decode error: {}", e)))
            }
            Err(e) => {
                error!(error = %e, "Failed to read response body");
                Envelope::Failure(ServiceError::transport(format!("Request error: {}", e)))
            }
        }
    }
}

#[async_trait]
impl ContextProvider for Context7Client {
    async fn search_context(
        &self,
        query: &str,
        filters: Option<Map<String, Value>>,
    ) -> Envelope<Value> {
        let payload = json!({
            "query": query,
            "filters": filters.unwrap_or_default(),
        });

        self.request(Method::POST, &["v1", "search"], Some(payload)).await
    }

    async fn get_document(&self, doc_id: &str) -> Envelope<Value> {
        // Dot segments would be dropped from the path and hit the collection.
        if matches!(doc_id, "" | "." | "..") {
            warn!(doc_id = %doc_id, "Rejected document id");
            return Envelope::Failure(ServiceError::invalid_request(format!(
                "Invalid document id: {:?}",
                doc_id
            )));
        }

        self.request(Method::GET, &["v1", "documents", doc_id], None).await
    }

    async fn add_document(
        &self,
        content: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Envelope<Value> {
        let payload = json!({
            "content": content,
            "metadata": metadata.unwrap_or_default(),
        });

        self.request(Method::POST, &["v1", "documents"], Some(payload)).await
    }

    async fn health_check(&self) -> bool {
        match self.request(Method::GET, &["v1", "health"], None).await {
            // A 2xx body that itself reports an error still counts as unhealthy.
            Envelope::Success(payload) => payload.get("error").is_none(),
            Envelope::Failure(_) => false,
        }
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{any, body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Context7Client {
        Context7Client::new(
            ContextSearchConfig::default()
                .with_api_key("test-key")
                .with_base_url(server.uri()),
        )
    }

    #[tokio::test]
    async fn test_unconfigured_client_short_circuits() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            Context7Client::new(ContextSearchConfig::default().with_base_url(server.uri()));

        let expected = json!({ "error": "CONTEXT7_API_KEY not configured" });
        assert_eq!(client.search_context("q", None).await.to_json(), expected);
        assert_eq!(client.get_document("doc-1").await.to_json(), expected);
        assert_eq!(client.add_document("text", None).await.to_json(), expected);
        assert!(!client.health_check().await);

        let failure = client.get_document("doc-1").await;
        assert_eq!(
            failure.error().map(|e| e.kind),
            Some(ErrorKind::Configuration)
        );
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_search_sends_query_filters_and_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/search"))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "query": "tasks due today", "filters": {} })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": ["a"] })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).search_context("tasks due today", None).await;

        assert_eq!(result, Envelope::Success(json!({ "results": ["a"] })));
    }

    #[tokio::test]
    async fn test_search_forwards_filters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/search"))
            .and(body_json(json!({ "query": "q", "filters": { "project": "alpha" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let mut filters = Map::new();
        filters.insert("project".to_string(), json!("alpha"));

        assert!(client_for(&server)
            .search_context("q", Some(filters))
            .await
            .is_success());
    }

    #[tokio::test]
    async fn test_get_and_add_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/documents/doc-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "doc-42" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/documents"))
            .and(body_json(json!({ "content": "hello", "metadata": {} })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "new" })))
            .mount(&server)
            .await;

        let client = client_for(&server);

        assert_eq!(
            client.get_document("doc-42").await.success(),
            Some(&json!({ "id": "doc-42" }))
        );
        assert_eq!(
            client.add_document("hello", None).await.success(),
            Some(&json!({ "id": "new" }))
        );
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/documents/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let result = client_for(&server).get_document("missing").await;

        let err = result.error().cloned().unwrap();
        assert_eq!(err.kind, ErrorKind::Remote { status: 404 });
        assert_eq!(result.to_json(), json!({ "error": "HTTP error: 404" }));
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/documents/doc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).get_document("doc-1").await;

        assert_eq!(result.error().map(|e| e.kind), Some(ErrorKind::Decode));
    }

    #[tokio::test]
    async fn test_unreachable_host_becomes_transport_error() {
        let client = Context7Client::new(
            ContextSearchConfig::default()
                .with_api_key("test-key")
                .with_base_url("http://127.0.0.1:1"),
        );

        let result = client.search_context("q", None).await;

        let err = result.error().cloned().unwrap();
        assert_eq!(err.kind, ErrorKind::Transport);
        assert!(err.message.starts_with("Request error:"));
    }

    #[tokio::test]
    async fn test_timeout_becomes_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ok" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = Context7Client::new(
            ContextSearchConfig::default()
                .with_api_key("test-key")
                .with_base_url(server.uri())
                .with_timeout(Duration::from_millis(50)),
        );

        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&server)
            .await;

        assert!(client_for(&server).health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_rejects_error_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "degraded" })))
            .mount(&server)
            .await;

        assert!(!client_for(&server).health_check().await);
    }

    #[tokio::test]
    async fn test_document_id_stays_inside_documents_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .expect(0)
            .mount(&server)
            .await;
        for (encoded, id) in [
            ("/v1/documents/a%2Fb", "a/b"),
            ("/v1/documents/..%2Fhealth", "../health"),
            ("/v1/documents/abc%3Fx=1", "abc?x=1"),
        ] {
            Mock::given(method("GET"))
                .and(path(encoded))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);

        for id in ["a/b", "../health", "abc?x=1"] {
            assert_eq!(
                client.get_document(id).await.success(),
                Some(&json!({ "id": id }))
            );
        }
        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.iter().all(|r| r.url.query().is_none()));
    }

    #[tokio::test]
    async fn test_dot_document_ids_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);

        for id in ["", ".", ".."] {
            let result = client.get_document(id).await;
            assert_eq!(result.error().map(|e| e.kind), Some(ErrorKind::InvalidRequest));
        }
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = Context7Client::new(
            ContextSearchConfig::default().with_base_url("http://localhost:9000/"),
        );
        let prefixed =
            Context7Client::new(ContextSearchConfig::default().with_base_url("http://proxy/api"));

        assert_eq!(
            client.endpoint(&["v1", "health"]).unwrap().as_str(),
            "http://localhost:9000/v1/health"
        );
        assert_eq!(
            prefixed.endpoint(&["v1", "documents", "x y"]).unwrap().as_str(),
            "http://proxy/api/v1/documents/x%20y"
        );
    }

    #[tokio::test]
    async fn test_malformed_base_url_fails_without_request() {
        let client = Context7Client::new(
            ContextSearchConfig::default()
                .with_api_key("test-key")
                .with_base_url("not a url"),
        );

        let result = client.search_context("q", None).await;

        assert_eq!(result.error().map(|e| e.kind), Some(ErrorKind::Configuration));
        assert_eq!(
            result.to_json(),
            json!({ "error": "Invalid base URL: not a url" })
        );
        assert!(!client.health_check().await);
    }
}
