//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileAuditConfig, FileAuthConfig, FileConfig, FileProviderConfig};
pub use loader::ConfigLoader;
