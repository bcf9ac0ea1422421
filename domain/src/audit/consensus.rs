//! Consensus scoring over provider outcomes
//!
//! The score is the fraction of voters (providers that answered) whose
//! normalized answer matches the most common answer. This generalizes the
//! naive "1.0 if all equal else 0.5" rule: with two disagreeing voters the
//! largest bloc is 1 of 2, so the naive 0.5 falls out of the same formula.

use super::outcome::ProviderOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated consensus measure for one audit run
///
/// Providers that failed are not voters; they are excluded from the tally
/// but remain visible in the persisted record.
///
/// # Example
///
/// ```
/// use concord_domain::{ConsensusTally, ProviderOutcome};
///
/// let outcomes = vec![
///     ProviderOutcome::answered("chatgpt", "42"),
///     ProviderOutcome::answered("bard", "42"),
///     ProviderOutcome::answered("copilot", "42"),
///     ProviderOutcome::answered("deepseek", "41"),
/// ];
/// let tally = ConsensusTally::from_outcomes(outcomes.iter());
/// assert_eq!(tally.voters, 4);
/// assert_eq!(tally.largest_bloc, 3);
/// assert_eq!(tally.score(), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusTally {
    /// Number of providers that produced an answer
    pub voters: usize,
    /// Size of the largest group of voters with identical normalized answers
    pub largest_bloc: usize,
}

impl ConsensusTally {
    /// Tally the outcomes of one audit run
    ///
    /// Answers are compared after normalization (trimmed, lowercased).
    /// When several blocs tie for largest, the score is unaffected by
    /// which one wins, so the tie is broken arbitrarily.
    pub fn from_outcomes<'a>(outcomes: impl Iterator<Item = &'a ProviderOutcome>) -> Self {
        let mut blocs: HashMap<String, usize> = HashMap::new();
        let mut voters = 0;

        for outcome in outcomes {
            if let Some(answer) = outcome.answer() {
                voters += 1;
                *blocs.entry(normalize_answer(answer)).or_insert(0) += 1;
            }
        }

        let largest_bloc = blocs.values().copied().max().unwrap_or(0);

        Self {
            voters,
            largest_bloc,
        }
    }

    /// Consensus score in [0.0, 1.0]
    ///
    /// Zero voters score 0.0: with no data there is nothing to trust.
    /// A single voter scores 1.0 — trivially "unanimous". That is a known
    /// limitation of single-witness consensus, not a bug.
    pub fn score(&self) -> f64 {
        if self.voters == 0 {
            0.0
        } else {
            self.largest_bloc as f64 / self.voters as f64
        }
    }

    /// Whether every voter gave the same normalized answer
    pub fn is_unanimous(&self) -> bool {
        self.voters > 0 && self.largest_bloc == self.voters
    }
}

/// Normalize an answer for comparison: trimmed, case-insensitive
fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}
