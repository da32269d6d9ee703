//! Error types for the access-control layer.

use thiserror::Error;

/// Result type for access-control operations.
pub type RbacResult<T> = Result<T, RbacError>;

/// Errors that can occur in access-control operations.
///
/// Evaluation itself never fails; errors only surface from the pluggable
/// storage seams.
#[derive(Debug, Error)]
pub enum RbacError {
    /// Error reported by a rule or role store implementation.
    #[error("storage error: {0}")]
    Storage(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl RbacError {
    /// Wraps a plain message as a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into().into())
    }
}
