//! # Console Error Type
//!
//! Unified error type for console views.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View method                                                            │
//! │       │                                                                 │
//! │       ├── form/paging check fails ──► Validation(ValidationError)       │
//! │       ├── local rule refuses input ─► InvalidInput("Quantity cannot..") │
//! │       ├── action settles Rejected ──► Rejected(reason)                  │
//! │       │                               (notice already shown by the      │
//! │       │                                failure observer)                │
//! │       └── config / identity / URL ──► Api(ApiError)                     │
//! │                                                                         │
//! │  main: exit code from ConsoleError::exit_code()                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_api::ApiError;
use storefront_core::ValidationError;
use thiserror::Error;

/// Result type alias for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Input failed a client-side check before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Input refused by a view rule.
    #[error("{0}")]
    InvalidInput(String),

    /// A dispatched action settled as rejected.
    #[error("{0}")]
    Rejected(String),

    /// Setup failed (configuration, identity file, client construction).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl ConsoleError {
    /// Returns true if the user has already been shown this failure.
    pub fn already_reported(&self) -> bool {
        matches!(self, ConsoleError::Rejected(_))
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConsoleError::Validation(_) | ConsoleError::InvalidInput(_) => 2,
            ConsoleError::Rejected(_) => 1,
            ConsoleError::Api(err) if err.is_config_error() => 78,
            ConsoleError::Api(_) | ConsoleError::Output(_) => 1,
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = ConsoleError::from(ValidationError::Required {
            field: "name".into(),
        });
        assert_eq!(err.exit_code(), 2);
        assert!(!err.already_reported());

        let err = ConsoleError::Rejected("Failed to fetch cart".into());
        assert_eq!(err.exit_code(), 1);
        assert!(err.already_reported());

        let err = ConsoleError::from(ApiError::Config("bad".into()));
        assert_eq!(err.exit_code(), 78);
    }
}
