//! Per-provider outcome of one audit dispatch

use serde::{Deserialize, Serialize};

/// Result of asking a single provider during one audit run
///
/// Exactly one of `answer`/`error` is present: a provider either answered
/// or failed (transport error, bad status, malformed payload, timeout).
/// Failures are data, not exceptions — they stay visible in the persisted
/// record but are excluded from consensus voting.
///
/// # Example
///
/// ```
/// use concord_domain::ProviderOutcome;
///
/// let ok = ProviderOutcome::answered("chatgpt", "42");
/// assert!(ok.is_voter());
///
/// let bad = ProviderOutcome::failed("bard", "timeout");
/// assert!(!bad.is_voter());
/// assert_eq!(bad.error(), Some("timeout"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOutcome {
    /// Provider identifier, unique within one audit run
    provider: String,
    /// The provider's answer, present iff the call succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    /// Failure description, present iff the call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ProviderOutcome {
    /// Create a successful outcome carrying the provider's answer
    pub fn answered(provider: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            answer: Some(answer.into()),
            error: None,
        }
    }

    /// Create a failed outcome carrying a failure description
    pub fn failed(provider: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            answer: None,
            error: Some(error.into()),
        }
    }

    /// The provider this outcome belongs to
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// The answer, if the call succeeded
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// The failure description, if the call failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether this outcome counts as a voter in consensus scoring
    pub fn is_voter(&self) -> bool {
        self.answer.is_some()
    }
}

/// Wire shape accepted before invariant validation
#[derive(Deserialize)]
struct RawOutcome {
    provider: String,
    answer: Option<String>,
    error: Option<String>,
}

impl<'de> Deserialize<'de> for ProviderOutcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawOutcome::deserialize(deserializer)?;
        match (raw.answer.is_some(), raw.error.is_some()) {
            (true, false) | (false, true) => Ok(Self {
                provider: raw.provider,
                answer: raw.answer,
                error: raw.error,
            }),
            _ => Err(serde::de::Error::custom(
                "provider outcome must carry exactly one of answer or error",
            )),
        }
    }
}
