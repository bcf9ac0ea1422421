//! Domain layer for concord
//!
//! This crate contains the core business logic, entities, and value objects
//! for auditing AI model providers. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Audit
//!
//! One audit sends the same query to every configured provider, collects a
//! [`ProviderOutcome`] per provider, and scores how strongly the successful
//! answers agree. The result is an immutable [`AuditRecord`] kept for
//! human review.
//!
//! ## Consensus
//!
//! The consensus score is the fraction of voters (providers that answered)
//! whose normalized answer matches the most common answer. A record whose
//! score falls below the configured threshold is flagged.

pub mod audit;
pub mod core;

// Re-export commonly used types
pub use audit::{
    consensus::ConsensusTally,
    history::HistoryFilter,
    outcome::ProviderOutcome,
    record::AuditRecord,
};
pub use core::{error::DomainError, query::Query};
