//! Audit orchestration
//!
//! `AuditService` runs the full cycle for one query: validate, dispatch to
//! all providers, score agreement, build the immutable record, persist it.
//! History retrieval delegates straight to the store.

use crate::config::AuditParams;
use crate::ports::history_store::{HistoryStore, PersistenceError};
use crate::ports::provider_client::ProviderClient;
use crate::use_cases::dispatch::Dispatcher;
use concord_domain::{AuditRecord, ConsensusTally, HistoryFilter, Query};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors surfaced to the caller of an audit operation
///
/// Provider-level failures never appear here — they are contained inside
/// the record's outcomes.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Rejected before dispatch: no provider was called, nothing persisted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store failed after the providers were already queried. The audit
    /// is not retried automatically; resubmitting re-queries (and re-bills)
    /// every provider.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Orchestrates dispatch, scoring, and persistence for audit runs
pub struct AuditService {
    dispatcher: Dispatcher,
    store: Arc<dyn HistoryStore>,
    params: AuditParams,
}

impl AuditService {
    pub fn new(
        clients: Vec<Arc<dyn ProviderClient>>,
        store: Arc<dyn HistoryStore>,
        params: AuditParams,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(clients, params.dispatch_timeout),
            store,
            params,
        }
    }

    /// Run one audit: dispatch, score, flag, persist
    ///
    /// At-most-once persist: if the store rejects the write the error is
    /// surfaced, the provider calls are not repeated, and nothing is
    /// silently dropped.
    pub async fn run_audit(&self, query: &str) -> Result<AuditRecord, AuditError> {
        let query =
            Query::try_new(query).map_err(|e| AuditError::InvalidInput(e.to_string()))?;

        let outcomes = self.dispatcher.dispatch_all(query.content()).await;

        let tally = ConsensusTally::from_outcomes(outcomes.values());
        let score = tally.score();
        info!(
            "Audit scored {:.2} ({} of {} voters agree, {} providers total)",
            score,
            tally.largest_bloc,
            tally.voters,
            outcomes.len()
        );

        let record = AuditRecord::new(
            &query,
            outcomes.into_values(),
            score,
            self.params.flag_threshold,
        );

        if record.flagged {
            warn!("Audit {} flagged for review (score {:.2})", record.id, score);
        }

        self.store.save(&record).await?;

        Ok(record)
    }

    /// Retrieve persisted records, newest first
    ///
    /// Straight delegation to the store; no caching.
    pub async fn history(&self, filter: &HistoryFilter) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(self.store.query(filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider_client::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Mutex;

    struct CountingProvider {
        name: String,
        answer: Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    impl CountingProvider {
        fn answering(name: &str, answer: &str, calls: &Arc<AtomicUsize>) -> Arc<dyn ProviderClient> {
            Arc::new(Self {
                name: name.to_string(),
                answer: Ok(answer.to_string()),
                calls: Arc::clone(calls),
            })
        }

        fn failing(name: &str, error: &str, calls: &Arc<AtomicUsize>) -> Arc<dyn ProviderClient> {
            Arc::new(Self {
                name: name.to_string(),
                answer: Err(error.to_string()),
                calls: Arc::clone(calls),
            })
        }
    }

    #[async_trait]
    impl ProviderClient for CountingProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn ask(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(answer) => Ok(answer.clone()),
                Err(e) => Err(ProviderError::Other(e.clone())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        records: Mutex<Vec<AuditRecord>>,
    }

    #[async_trait]
    impl HistoryStore for RecordingStore {
        async fn save(&self, record: &AuditRecord) -> Result<(), PersistenceError> {
            self.records.lock().await.push(record.clone());
            Ok(())
        }

        async fn query(
            &self,
            filter: &HistoryFilter,
        ) -> Result<Vec<AuditRecord>, PersistenceError> {
            let mut records: Vec<AuditRecord> = self
                .records
                .lock()
                .await
                .iter()
                .filter(|r| filter.matches(r.flagged))
                .cloned()
                .collect();
            records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            Ok(records)
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl HistoryStore for BrokenStore {
        async fn save(&self, _record: &AuditRecord) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("database offline".into()))
        }

        async fn query(
            &self,
            _filter: &HistoryFilter,
        ) -> Result<Vec<AuditRecord>, PersistenceError> {
            Err(PersistenceError::Unavailable("database offline".into()))
        }
    }

    fn service(
        clients: Vec<Arc<dyn ProviderClient>>,
        store: Arc<dyn HistoryStore>,
        threshold: f64,
    ) -> AuditService {
        let params = AuditParams::default()
            .with_timeout(Duration::from_secs(5))
            .with_flag_threshold(threshold);
        AuditService::new(clients, store, params)
    }

    #[tokio::test]
    async fn test_three_of_four_agree_is_flagged_at_default_threshold() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![
            CountingProvider::answering("chatgpt", "42", &calls),
            CountingProvider::answering("bard", "42", &calls),
            CountingProvider::answering("copilot", "42", &calls),
            CountingProvider::answering("deepseek", "41", &calls),
        ];
        let store = Arc::new(RecordingStore::default());
        let service = service(clients, store.clone(), 1.0);

        let record = service.run_audit("What is 6 x 7?").await.unwrap();

        assert_eq!(record.outcomes.len(), 4);
        assert_eq!(record.consensus_score, 0.75);
        assert!(record.flagged);
        assert_eq!(store.records.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unanimous_pair_is_not_flagged() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![
            CountingProvider::answering("a", "42", &calls),
            CountingProvider::answering("b", "42", &calls),
        ];
        let service = service(clients, Arc::new(RecordingStore::default()), 1.0);

        let record = service.run_audit("q").await.unwrap();

        assert_eq!(record.consensus_score, 1.0);
        assert!(!record.flagged);
    }

    #[tokio::test]
    async fn test_single_witness_after_failure_scores_one() {
        // One provider fails, leaving a single voter. The score is 1.0 by
        // design: single-witness consensus is trivially unanimous.
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![
            CountingProvider::failing("a", "timeout", &calls),
            CountingProvider::answering("b", "42", &calls),
        ];
        let service = service(clients, Arc::new(RecordingStore::default()), 1.0);

        let record = service.run_audit("q").await.unwrap();

        assert_eq!(record.outcomes.len(), 2);
        assert_eq!(record.voters().count(), 1);
        assert_eq!(record.consensus_score, 1.0);
        assert!(!record.flagged);
    }

    #[tokio::test]
    async fn test_all_providers_failed_scores_zero_and_flags() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![
            CountingProvider::failing("a", "down", &calls),
            CountingProvider::failing("b", "down", &calls),
        ];
        let service = service(clients, Arc::new(RecordingStore::default()), 1.0);

        let record = service.run_audit("q").await.unwrap();

        assert_eq!(record.consensus_score, 0.0);
        assert!(record.flagged);
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![CountingProvider::answering("a", "42", &calls)];
        let store = Arc::new(RecordingStore::default());
        let service = service(clients, store.clone(), 1.0);

        let err = service.run_audit("   ").await.unwrap_err();

        // The domain's empty-query rejection surfaces as InvalidInput.
        assert!(matches!(err, AuditError::InvalidInput(_)));
        assert!(err.to_string().contains("Query cannot be empty"));
        // No provider was called and nothing was persisted.
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(store.records.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces_after_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![CountingProvider::answering("a", "42", &calls)];
        let service = service(clients, Arc::new(BrokenStore), 1.0);

        let err = service.run_audit("q").await.unwrap_err();

        assert!(matches!(err, AuditError::Persistence(_)));
        // The providers were already queried; the audit is not retried.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_looser_threshold_unflags_partial_majority() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![
            CountingProvider::answering("a", "42", &calls),
            CountingProvider::answering("b", "42", &calls),
            CountingProvider::answering("c", "42", &calls),
            CountingProvider::answering("d", "41", &calls),
        ];
        let service = service(clients, Arc::new(RecordingStore::default()), 0.75);

        let record = service.run_audit("q").await.unwrap();

        assert_eq!(record.consensus_score, 0.75);
        assert!(!record.flagged);
    }

    #[tokio::test]
    async fn test_history_round_trip() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clients = vec![
            CountingProvider::answering("a", "42", &calls),
            CountingProvider::answering("b", "41", &calls),
        ];
        let store = Arc::new(RecordingStore::default());
        let service = service(clients, store, 1.0);

        let saved = service.run_audit("What is 6 x 7?").await.unwrap();
        let history = service.history(&HistoryFilter::all()).await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, saved.id);
        assert_eq!(history[0].query, "What is 6 x 7?");
        assert_eq!(history[0].consensus_score, saved.consensus_score);
    }

    #[tokio::test]
    async fn test_history_flagged_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let agreeing = vec![
            CountingProvider::answering("a", "42", &calls),
            CountingProvider::answering("b", "42", &calls),
        ];
        let disagreeing = vec![
            CountingProvider::answering("a", "42", &calls),
            CountingProvider::answering("b", "41", &calls),
        ];
        let store: Arc<dyn HistoryStore> = Arc::new(RecordingStore::default());

        service(agreeing, Arc::clone(&store), 1.0)
            .run_audit("clean")
            .await
            .unwrap();
        let flagged_service = service(disagreeing, Arc::clone(&store), 1.0);
        flagged_service.run_audit("split").await.unwrap();

        let flagged = flagged_service
            .history(&HistoryFilter::flagged())
            .await
            .unwrap();

        assert_eq!(flagged.len(), 1);
        assert!(flagged.iter().all(|r| r.flagged));
        assert_eq!(flagged[0].query, "split");
    }
}
