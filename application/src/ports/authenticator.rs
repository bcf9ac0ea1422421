//! Authentication port
//!
//! The audit core never evaluates credentials itself; it trusts whatever
//! identity the authentication collaborator hands it. Adapters range from a
//! static token table to a real identity provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A verified caller identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
}

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Authentication failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid or unknown token")]
    InvalidToken,
}

/// Authentication collaborator
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify a bearer token and return the caller's identity
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}
