//! Authentication adapters

pub mod static_token;

pub use static_token::StaticTokenAuthenticator;
