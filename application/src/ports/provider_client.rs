//! Provider client port
//!
//! Defines the interface for asking one model provider a question.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a provider call can produce
///
/// These never cross the dispatch boundary as errors: the dispatcher turns
/// every one of them into a failed `ProviderOutcome`.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// A single opaque model provider
///
/// Stateless capability: one call sends one prompt to the external provider
/// and returns its answer. No state is retained between calls, and no
/// protocol detail leaks through this port.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Provider identifier, unique within the configured roster
    fn name(&self) -> &str;

    /// Send a prompt and return the provider's answer
    async fn ask(&self, prompt: &str) -> Result<String, ProviderError>;
}
