//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Everything the core needs from the outside lives here: the provider
//! roster, the dispatch timeout, the flag threshold, and the auth token
//! table. Nothing in this file is mutated after process start.
//!
//! Example configuration:
//!
//! ```toml
//! [audit]
//! timeout_secs = 30
//! flag_threshold = 1.0
//!
//! [[providers]]
//! name = "chatgpt"
//! endpoint = "https://api.example.com/v1/ask"
//! api_key_env = "CHATGPT_API_KEY"
//!
//! [auth.tokens]
//! "dev-token" = "reviewer"
//! ```

use crate::providers::HttpProviderClient;
use concord_application::{AuditParams, ProviderClient};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Audit execution settings
    pub audit: FileAuditConfig,
    /// Provider roster
    pub providers: Vec<FileProviderConfig>,
    /// Authentication settings
    pub auth: FileAuthConfig,
}

/// `[audit]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Per-provider dispatch timeout in seconds
    pub timeout_secs: u64,
    /// Records scoring below this are flagged for review
    pub flag_threshold: f64,
}

impl Default for FileAuditConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            flag_threshold: 1.0,
        }
    }
}

/// One `[[providers]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Provider identifier, unique within the roster
    pub name: String,
    /// Endpoint URL the adapter posts prompts to
    pub endpoint: String,
    /// Name of the environment variable holding the provider credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

/// `[auth]` section: token → username table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    pub tokens: HashMap<String, String>,
}

impl FileConfig {
    /// Convert the `[audit]` section into execution parameters
    pub fn audit_params(&self) -> AuditParams {
        AuditParams::default()
            .with_timeout(Duration::from_secs(self.audit.timeout_secs))
            .with_flag_threshold(self.audit.flag_threshold)
    }

    /// Build the provider roster from configuration
    ///
    /// Credentials are resolved from the environment at build time; a
    /// missing variable leaves the provider without a key rather than
    /// failing, so a partially-credentialed roster still dispatches.
    pub fn build_roster(&self) -> Vec<Arc<dyn ProviderClient>> {
        self.providers
            .iter()
            .map(|p| {
                let mut client = HttpProviderClient::new(&p.name, &p.endpoint);
                if let Some(var) = &p.api_key_env
                    && let Ok(key) = std::env::var(var)
                {
                    client = client.with_api_key(key);
                }
                Arc::new(client) as Arc<dyn ProviderClient>
            })
            .collect()
    }

    /// Validate the configuration, returning human-readable warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.providers.is_empty() {
            warnings.push("no providers configured; audits will have no voters".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for provider in &self.providers {
            if provider.name.trim().is_empty() {
                warnings.push("provider with empty name".to_string());
            }
            if !seen.insert(provider.name.as_str()) {
                warnings.push(format!("duplicate provider name: {}", provider.name));
            }
        }

        if !(0.0..=1.0).contains(&self.audit.flag_threshold) {
            warnings.push(format!(
                "flag_threshold {} outside [0.0, 1.0]; it will be clamped",
                self.audit.flag_threshold
            ));
        }

        warnings
    }
}
