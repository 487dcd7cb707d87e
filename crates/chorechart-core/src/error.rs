//! Centralized error types for Chorechart.

use thiserror::Error;

/// Main error type for Chorechart operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Chore not found: {0}")]
    ChoreNotFound(i64),

    #[error("Claim not found: {0}")]
    ClaimNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] chorechart_db::DbError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Chorechart operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the error is a rejected business operation rather than a fault.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ChoreNotFound(_) | Self::ClaimNotFound(_) | Self::Validation(_) | Self::Conflict(_)
        )
    }
}
