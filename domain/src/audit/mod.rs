//! Audit entities and consensus scoring
//!
//! One audit run produces a [`ProviderOutcome`] per configured provider,
//! a [`ConsensusTally`] over those outcomes, and finally an immutable
//! [`AuditRecord`] persisted for review.

pub mod consensus;
pub mod history;
pub mod outcome;
pub mod record;

pub use consensus::ConsensusTally;
pub use history::HistoryFilter;
pub use outcome::ProviderOutcome;
pub use record::AuditRecord;
