//! Unified error handling for client operations.
//!
//! Provides a unified `AppError` type covering every failure class a screen
//! can see: local validation, transport faults, server-reported errors, and
//! on-device store problems. All operations return `Result<T, AppError>`;
//! nothing is fatal to the process, and a screen surfaces
//! [`AppError::user_message`] directly.

use thiserror::Error;

use crate::api::ApiError;
use crate::store::StoreError;

/// Application-level error type for the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// On-device store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No session record exists; the user must sign in first.
    #[error("not signed in")]
    NotSignedIn,

    /// Locally rejected input, caught before any network call.
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    /// The single user-facing message string for this failure.
    ///
    /// Every failure class is collapsed to one displayable string; there
    /// are no structured error codes and no retry affordance beyond the
    /// user repeating the operation.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Store(_) => "Saved data could not be read. Please sign in again.".to_owned(),
            Self::NotSignedIn => "Please sign in first.".to_owned(),
            Self::InvalidInput(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_passes_through() {
        let err = AppError::InvalidInput("Please fill in every field.".to_owned());
        assert_eq!(err.user_message(), "Please fill in every field.");
    }

    #[test]
    fn test_not_signed_in_message() {
        assert_eq!(AppError::NotSignedIn.user_message(), "Please sign in first.");
    }
}
