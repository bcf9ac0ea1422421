//! Concurrent provider dispatch
//!
//! Fans one query out to every configured provider in parallel and collects
//! a complete outcome set: one `ProviderOutcome` per roster entry, whether
//! the provider answered, errored, or timed out. A slow or failing provider
//! never blocks or aborts the others.

use crate::ports::provider_client::ProviderClient;
use concord_domain::ProviderOutcome;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Error text recorded when a provider exceeds the dispatch timeout
pub const TIMEOUT_ERROR: &str = "timeout";

/// Fans a query out to a roster of providers with a uniform timeout
///
/// Worst-case latency of [`dispatch_all`](Dispatcher::dispatch_all) is the
/// timeout, not the sum of provider latencies: every call runs on its own
/// task and is bounded by the same deadline.
pub struct Dispatcher {
    clients: Vec<Arc<dyn ProviderClient>>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(clients: Vec<Arc<dyn ProviderClient>>, timeout: Duration) -> Self {
        Self { clients, timeout }
    }

    /// Query every provider concurrently and collect all outcomes
    ///
    /// Returns only after every per-provider task has completed or timed
    /// out; no background work leaks past this call. The result always has
    /// exactly one entry per configured client. There is no retry here —
    /// retry policy, if any, belongs to the client itself.
    pub async fn dispatch_all(&self, query: &str) -> BTreeMap<String, ProviderOutcome> {
        info!("Dispatching query to {} providers", self.clients.len());

        let mut join_set = JoinSet::new();

        for client in &self.clients {
            let client = Arc::clone(client);
            let prompt = query.to_string();
            let timeout = self.timeout;

            join_set.spawn(async move {
                let name = client.name().to_string();
                match tokio::time::timeout(timeout, client.ask(&prompt)).await {
                    Ok(Ok(answer)) => {
                        debug!("Provider {} answered", name);
                        ProviderOutcome::answered(name, answer)
                    }
                    Ok(Err(e)) => {
                        warn!("Provider {} failed: {}", name, e);
                        ProviderOutcome::failed(name, e.to_string())
                    }
                    Err(_) => {
                        warn!("Provider {} timed out after {:?}", name, timeout);
                        ProviderOutcome::failed(name, TIMEOUT_ERROR)
                    }
                }
            });
        }

        let mut outcomes = BTreeMap::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok(outcome) => {
                    outcomes.insert(outcome.provider().to_string(), outcome);
                }
                Err(e) => {
                    warn!("Provider task join error: {}", e);
                }
            }
        }

        // A panicked task still owes the roster an outcome.
        for client in &self.clients {
            if !outcomes.contains_key(client.name()) {
                outcomes.insert(
                    client.name().to_string(),
                    ProviderOutcome::failed(client.name(), "provider task aborted"),
                );
            }
        }

        outcomes
    }
}
