//! Use cases

pub mod audit_service;
pub mod dispatch;

pub use audit_service::{AuditError, AuditService};
pub use dispatch::Dispatcher;
