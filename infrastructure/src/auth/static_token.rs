//! Static token authenticator
//!
//! Token → username table loaded from configuration at process start and
//! immutable afterwards. Request handling never mutates it. A real identity
//! provider plugs into the same `Authenticator` port.

use async_trait::async_trait;
use concord_application::ports::authenticator::{AuthError, Authenticator, Identity};
use std::collections::HashMap;
use tracing::debug;

/// `Authenticator` backed by a fixed token table
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuthenticator {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    /// Number of configured tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        match self.tokens.get(token) {
            Some(username) => {
                debug!("Authenticated caller {}", username);
                Ok(Identity::new(username))
            }
            None => Err(AuthError::InvalidToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> StaticTokenAuthenticator {
        let mut tokens = HashMap::new();
        tokens.insert("secret-token".to_string(), "reviewer".to_string());
        StaticTokenAuthenticator::new(tokens)
    }

    #[tokio::test]
    async fn test_known_token() {
        let identity = authenticator().authenticate("secret-token").await.unwrap();
        assert_eq!(identity.username, "reviewer");
    }

    #[tokio::test]
    async fn test_unknown_token_rejected() {
        let err = authenticator().authenticate("wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
