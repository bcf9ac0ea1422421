//! History store port
//!
//! Narrow interface to the persistence collaborator. The durable storage
//! engine itself is external; only this contract matters to the audit core.

use async_trait::async_trait;
use concord_domain::{AuditRecord, HistoryFilter};
use thiserror::Error;

/// Failures of the persistence collaborator
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected the write: {0}")]
    Rejected(String),
}

/// Persistence collaborator for audit records
///
/// A record is owned by the store once `save` returns. `query` answers the
/// review surface: timestamp-descending order, ties broken by insertion
/// order.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist one audit record
    async fn save(&self, record: &AuditRecord) -> Result<(), PersistenceError>;

    /// Retrieve records matching the filter, newest first
    async fn query(&self, filter: &HistoryFilter) -> Result<Vec<AuditRecord>, PersistenceError>;
}
