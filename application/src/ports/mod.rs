//! Ports: interfaces to external collaborators
//!
//! Adapters implementing these traits live in the infrastructure layer.

pub mod authenticator;
pub mod history_store;
pub mod provider_client;

pub use authenticator::{AuthError, Authenticator, Identity};
pub use history_store::{HistoryStore, PersistenceError};
pub use provider_client::{ProviderClient, ProviderError};
