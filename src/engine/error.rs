// ==========================================
// Perdas Dashboard - Engine Error Types
// ==========================================
// The only error path into the aggregation layer: a period specification
// that cannot be constructed. Everything past spec validation is total.
// ==========================================

use thiserror::Error;

/// Malformed period specification. Fatal to the filter request; the
/// caller must re-prompt rather than silently default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid period spec `{input}`: {reason}")]
pub struct InvalidPeriodSpec {
    pub input: String,
    pub reason: String,
}

impl InvalidPeriodSpec {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
