//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations detected while turning a taxonomy
/// into a layout. These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed taxonomy at {location}: {reason}")]
    MalformedInput { location: String, reason: String },

    #[error("branches '{first}' and '{second}' both map to payload key '{slug}'")]
    DuplicateBranch {
        slug: String,
        first: String,
        second: String,
    },

    #[error("invalid layout parameter: {0}")]
    InvalidLayout(String),
}

impl DomainError {
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            location: location.into(),
            reason: reason.into(),
        }
    }
}
