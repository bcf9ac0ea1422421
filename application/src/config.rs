//! Audit execution parameters
//!
//! Supplied by the configuration layer at process start; never mutated by
//! request handling.

use std::time::Duration;

/// Default per-provider dispatch timeout
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default flag threshold: anything short of full agreement is flagged
pub const DEFAULT_FLAG_THRESHOLD: f64 = 1.0;

/// Tunables for one audit service instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditParams {
    /// Uniform timeout applied to every provider call in a dispatch
    pub dispatch_timeout: Duration,
    /// Records scoring below this are flagged for review
    pub flag_threshold: f64,
}

impl Default for AuditParams {
    fn default() -> Self {
        Self {
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
            flag_threshold: DEFAULT_FLAG_THRESHOLD,
        }
    }
}

impl AuditParams {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_timeout = timeout;
        self
    }

    pub fn with_flag_threshold(mut self, threshold: f64) -> Self {
        self.flag_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}
