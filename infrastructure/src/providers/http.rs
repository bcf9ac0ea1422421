//! Generic HTTP provider adapter
//!
//! Treats a model provider as an opaque capability behind one endpoint:
//! POST `{"prompt": ...}`, read `{"answer": ...}`. Provider-specific
//! protocols stay out of scope; anything that needs more than this shape
//! gets its own adapter implementing the same port.

use async_trait::async_trait;
use concord_application::ports::provider_client::{ProviderClient, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct AskRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: Option<String>,
}

/// `ProviderClient` adapter for a single HTTP model endpoint
pub struct HttpProviderClient {
    name: String,
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpProviderClient {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach a bearer credential sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ask(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!("Asking provider {} at {}", self.name, self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&AskRequest { prompt });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        body.answer
            .ok_or_else(|| ProviderError::MalformedResponse("missing answer field".to_string()))
    }
}
