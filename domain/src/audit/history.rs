//! History query parameters

use serde::{Deserialize, Serialize};

/// Filter for retrieving persisted audit records
///
/// `flagged_only` restricts the result to flagged records; when false all
/// records are returned. Extensible in principle (time range, provider),
/// but this is the only dimension the current contract exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryFilter {
    /// Return only records marked for review
    pub flagged_only: bool,
}

impl HistoryFilter {
    /// Filter matching every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching only flagged records
    pub fn flagged() -> Self {
        Self { flagged_only: true }
    }

    /// Whether a record with the given flag passes this filter
    pub fn matches(&self, flagged: bool) -> bool {
        !self.flagged_only || flagged
    }
}
