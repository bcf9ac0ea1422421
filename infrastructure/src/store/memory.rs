//! In-memory history store
//!
//! Satisfies the `HistoryStore` port for local operation and tests. A
//! durable relational store plugs into the same port; the record's serde
//! shape already matches its schema (`id`, `query`, `model_responses`,
//! `consensus_score`, `flagged`, `timestamp`).

use async_trait::async_trait;
use concord_application::ports::history_store::{HistoryStore, PersistenceError};
use concord_domain::{AuditRecord, HistoryFilter};
use tokio::sync::RwLock;

/// Process-local `HistoryStore`
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: RwLock<Vec<AuditRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn save(&self, record: &AuditRecord) -> Result<(), PersistenceError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn query(&self, filter: &HistoryFilter) -> Result<Vec<AuditRecord>, PersistenceError> {
        let records = self.records.read().await;

        let mut matching: Vec<AuditRecord> = records
            .iter()
            .filter(|r| filter.matches(r.flagged))
            .cloned()
            .collect();

        // Stable sort: equal timestamps keep insertion order.
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(matching)
    }
}
