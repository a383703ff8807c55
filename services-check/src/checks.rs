//! The three dependency checks and the sequential run that drives them.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::Dependencies;
use crate::relational::RelationalStore;
use crate::report::{CheckOutcome, ValidationReport};
use crate::CheckError;
use services_context::config::API_KEY_VAR;
use services_context::ContextProvider;
use services_vector::VectorStoreClient;

/// Name under which the relational check is reported.
pub const RELATIONAL_CHECK: &str = "PostgreSQL";

/// Name under which the search API check is reported.
pub const SEARCH_CHECK: &str = "Context7 API";

/// Name under which the vector store check is reported.
pub const VECTOR_CHECK: &str = "Qdrant Service";

/// Which failures count against the run.
///
/// The defaults tolerate a missing search API key and an unreachable vector
/// store; the relational store is always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityPolicy {
    /// Report an unhealthy vector store as a failure instead of a warning.
    pub vector_store_fatal: bool,
    /// Skip the search check when no API key is configured.
    pub skip_unconfigured_search: bool,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            vector_store_fatal: false,
            skip_unconfigured_search: true,
        }
    }
}

impl SeverityPolicy {
    fn vector_failure(&self, reason: impl Into<String>) -> CheckOutcome {
        if self.vector_store_fatal {
            CheckOutcome::Fail(reason.into())
        } else {
            CheckOutcome::Warn(reason.into())
        }
    }
}

/// Create the schema, then round-trip `SELECT 1`.
pub async fn check_relational(store: &dyn RelationalStore) -> CheckOutcome {
    if let Err(e) = store.ensure_schema().await {
        error!(error = %e, "Relational schema setup failed");
        return CheckOutcome::Fail(e.to_string());
    }

    match store.ping().await {
        Ok(Some(_)) => CheckOutcome::Pass,
        Ok(None) => CheckOutcome::Fail("SELECT 1 returned no row".to_string()),
        Err(e) => {
            error!(error = %e, "Relational ping failed");
            CheckOutcome::Fail(e.to_string())
        }
    }
}

/// Probe the search API, or skip it when no key is configured.
pub async fn check_context_search(
    provider: &dyn ContextProvider,
    policy: &SeverityPolicy,
) -> CheckOutcome {
    if !provider.is_configured() {
        if policy.skip_unconfigured_search {
            return CheckOutcome::Skipped("API key not configured".to_string());
        }
        return CheckOutcome::Fail(format!("{} not configured", API_KEY_VAR));
    }

    if provider.health_check().await {
        CheckOutcome::Pass
    } else {
        CheckOutcome::Fail("health check failed".to_string())
    }
}

/// Probe the vector collection.
pub async fn check_vector_store(
    client: Result<&VectorStoreClient, &CheckError>,
    policy: &SeverityPolicy,
) -> CheckOutcome {
    let client = match client {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Vector store client unavailable");
            return policy.vector_failure(format!("May be unavailable - {}", e));
        }
    };

    if client.health_check().await {
        CheckOutcome::Pass
    } else {
        warn!(
            collection = %client.collection_name(),
            "Vector store unhealthy; a local instance may not be running"
        );
        policy.vector_failure("May be unavailable (local instance not running)")
    }
}

/// Run every check in order and collect the report.
pub async fn run_checks(deps: &Dependencies, policy: &SeverityPolicy) -> ValidationReport {
    let mut report = ValidationReport::new();
    info!(?policy, "Starting service validation");

    report.start(RELATIONAL_CHECK);
    let started = Utc::now();
    let outcome = match &deps.relational {
        Ok(store) => check_relational(store.as_ref()).await,
        Err(e) => CheckOutcome::Fail(e.to_string()),
    };
    report.record(RELATIONAL_CHECK, outcome, elapsed_ms(started));

    report.start(SEARCH_CHECK);
    let started = Utc::now();
    let outcome = check_context_search(deps.context.as_ref(), policy).await;
    report.record(SEARCH_CHECK, outcome, elapsed_ms(started));

    report.start(VECTOR_CHECK);
    let started = Utc::now();
    let outcome = check_vector_store(deps.vector.as_ref(), policy).await;
    report.record(VECTOR_CHECK, outcome, elapsed_ms(started));

    info!(passed = report.all_passed(), "Service validation finished");
    report
}

fn elapsed_ms(started: chrono::DateTime<Utc>) -> i64 {
    (Utc::now() - started).num_milliseconds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use services_shared::{Envelope, ServiceError};
    use services_vector::{MemoryBackend, VectorStoreConfig};
    use std::sync::Arc;

    struct StubProvider {
        configured: bool,
        healthy: bool,
    }

    #[async_trait]
    impl ContextProvider for StubProvider {
        async fn search_context(&self, _: &str, _: Option<Map<String, Value>>) -> Envelope<Value> {
            Envelope::Failure(ServiceError::transport("unused"))
        }

        async fn get_document(&self, _: &str) -> Envelope<Value> {
            Envelope::Failure(ServiceError::transport("unused"))
        }

        async fn add_document(&self, _: &str, _: Option<Map<String, Value>>) -> Envelope<Value> {
            Envelope::Failure(ServiceError::transport("unused"))
        }

        async fn health_check(&self) -> bool {
            self.healthy
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    struct StubStore {
        schema_ok: bool,
        row: Option<i32>,
    }

    #[async_trait]
    impl RelationalStore for StubStore {
        async fn ensure_schema(&self) -> Result<(), CheckError> {
            if self.schema_ok {
                Ok(())
            } else {
                Err(CheckError::config("permission denied"))
            }
        }

        async fn ping(&self) -> Result<Option<i32>, CheckError> {
            Ok(self.row)
        }
    }

    #[tokio::test]
    async fn test_relational_outcomes() {
        let ok = StubStore { schema_ok: true, row: Some(1) };
        let no_row = StubStore { schema_ok: true, row: None };
        let no_schema = StubStore { schema_ok: false, row: Some(1) };

        assert_eq!(check_relational(&ok).await, CheckOutcome::Pass);
        assert!(matches!(check_relational(&no_row).await, CheckOutcome::Fail(_)));
        assert_eq!(
            check_relational(&no_schema).await,
            CheckOutcome::Fail("Configuration error: permission denied".to_string())
        );
    }

    #[tokio::test]
    async fn test_unconfigured_search_follows_policy() {
        let provider = StubProvider { configured: false, healthy: false };
        let strict = SeverityPolicy {
            skip_unconfigured_search: false,
            ..SeverityPolicy::default()
        };

        let lenient = check_context_search(&provider, &SeverityPolicy::default()).await;
        let strict = check_context_search(&provider, &strict).await;

        assert!(matches!(lenient, CheckOutcome::Skipped(_)));
        assert_eq!(
            strict,
            CheckOutcome::Fail("CONTEXT7_API_KEY not configured".to_string())
        );
    }

    #[tokio::test]
    async fn test_configured_search_uses_health_check() {
        let healthy = StubProvider { configured: true, healthy: true };
        let unhealthy = StubProvider { configured: true, healthy: false };
        let policy = SeverityPolicy::default();

        assert_eq!(check_context_search(&healthy, &policy).await, CheckOutcome::Pass);
        assert!(!check_context_search(&unhealthy, &policy).await.counts_as_pass());
    }

    #[tokio::test]
    async fn test_vector_failure_follows_policy() {
        let client = VectorStoreClient::new(
            Arc::new(MemoryBackend::unreachable()),
            VectorStoreConfig::default(),
        )
        .await;
        let fatal = SeverityPolicy {
            vector_store_fatal: true,
            ..SeverityPolicy::default()
        };

        let lenient = check_vector_store(Ok(&client), &SeverityPolicy::default()).await;
        let fatal = check_vector_store(Ok(&client), &fatal).await;

        assert!(matches!(lenient, CheckOutcome::Warn(_)));
        assert!(matches!(fatal, CheckOutcome::Fail(_)));
    }

    #[tokio::test]
    async fn test_healthy_vector_store_passes() {
        let client = VectorStoreClient::new(
            Arc::new(MemoryBackend::new()),
            VectorStoreConfig::default(),
        )
        .await;

        let outcome = check_vector_store(Ok(&client), &SeverityPolicy::default()).await;

        assert_eq!(outcome, CheckOutcome::Pass);
    }

    #[tokio::test]
    async fn test_missing_vector_client_is_a_warning() {
        let err = CheckError::config("bad url");

        let outcome = check_vector_store(Err(&err), &SeverityPolicy::default()).await;

        assert!(matches!(outcome, CheckOutcome::Warn(_)));
    }
}
