//! Immutable audit records

use super::outcome::ProviderOutcome;
use crate::core::query::Query;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The permanent result of one audit run
///
/// Constructed exactly once after scoring and never mutated afterwards.
/// Ownership passes to the history store on persistence; the audit service
/// keeps no long-lived reference.
///
/// The serialized shape matches the storage schema: `id`, `query`,
/// `model_responses` (provider → outcome), `consensus_score`, `flagged`,
/// `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Globally unique identifier, assigned at creation
    pub id: Uuid,
    /// The original prompt text
    pub query: String,
    /// Per-provider outcomes captured at dispatch time
    #[serde(rename = "model_responses")]
    pub outcomes: BTreeMap<String, ProviderOutcome>,
    /// Agreement score in [0.0, 1.0]
    pub consensus_score: f64,
    /// Whether this record is marked for human review
    pub flagged: bool,
    /// Creation time (UTC)
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    /// Build a record from a completed audit run
    ///
    /// `flagged` is derived here and nowhere else:
    /// `consensus_score < flag_threshold`.
    pub fn new(
        query: &Query,
        outcomes: impl IntoIterator<Item = ProviderOutcome>,
        consensus_score: f64,
        flag_threshold: f64,
    ) -> Self {
        let outcomes: BTreeMap<String, ProviderOutcome> = outcomes
            .into_iter()
            .map(|o| (o.provider().to_string(), o))
            .collect();

        Self {
            id: Uuid::new_v4(),
            query: query.content().to_string(),
            outcomes,
            consensus_score,
            flagged: consensus_score < flag_threshold,
            timestamp: Utc::now(),
        }
    }

    /// Override the creation timestamp (history ordering tests)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Provider → answer mapping, `None` where the provider failed
    ///
    /// This is the nullable-per-provider shape exposed on the public
    /// response surface.
    pub fn responses(&self) -> BTreeMap<&str, Option<&str>> {
        self.outcomes
            .iter()
            .map(|(name, outcome)| (name.as_str(), outcome.answer()))
            .collect()
    }

    /// Outcomes that count as voters
    pub fn voters(&self) -> impl Iterator<Item = &ProviderOutcome> {
        self.outcomes.values().filter(|o| o.is_voter())
    }

    /// Outcomes where the provider failed
    pub fn failures(&self) -> impl Iterator<Item = &ProviderOutcome> {
        self.outcomes.values().filter(|o| !o.is_voter())
    }
}
