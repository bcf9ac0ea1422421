//! Infrastructure layer for concord
//!
//! Adapters for the application layer's ports:
//!
//! - [`providers::HttpProviderClient`] — generic HTTP adapter for one model
//!   provider endpoint
//! - [`store::MemoryHistoryStore`] — in-process history store
//! - [`auth::StaticTokenAuthenticator`] — token-table authenticator
//! - [`config`] — TOML configuration loading and merging

pub mod auth;
pub mod config;
pub mod providers;
pub mod store;

pub use auth::StaticTokenAuthenticator;
pub use config::{ConfigLoader, FileConfig};
pub use providers::HttpProviderClient;
pub use store::MemoryHistoryStore;
