//! Provider adapters

pub mod http;

pub use http::HttpProviderClient;
