//! Application layer for concord
//!
//! Use cases orchestrate the audit flow over ports (traits) whose adapters
//! live in the infrastructure layer:
//!
//! - [`ports::ProviderClient`] — one opaque model provider
//! - [`ports::HistoryStore`] — the persistence collaborator
//! - [`ports::Authenticator`] — the authentication collaborator
//!
//! The central use case is [`AuditService::run_audit`]: fan the query out
//! to every provider concurrently, score agreement, persist the record.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::AuditParams;
pub use ports::{
    authenticator::{AuthError, Authenticator, Identity},
    history_store::{HistoryStore, PersistenceError},
    provider_client::{ProviderClient, ProviderError},
};
pub use use_cases::{
    audit_service::{AuditError, AuditService},
    dispatch::Dispatcher,
};
