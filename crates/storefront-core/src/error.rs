//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── BusinessError    - `success: false` envelope from the server      │
//! │  ├── ValidationError  - Client-side form failures                      │
//! │  └── CoreError        - Wraps both for callers that need one type      │
//! │                                                                         │
//! │  storefront-api errors (separate crate)                                │
//! │  └── ApiError         - Transport, status, business, decode            │
//! │                                                                         │
//! │  Flow: BusinessError → ApiError → Transition::Rejected(String) → slice │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Message used when a failed envelope carries no `message` of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "API request failed";

// =============================================================================
// Business Error
// =============================================================================

/// A request reached the server and was answered, but the envelope reported
/// `success: false`.
///
/// ## Display
/// The `Display` output is exactly the server message. Slices store this
/// string verbatim as their `error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BusinessError {
    /// Application-level code from the envelope, when present.
    pub code: Option<i32>,

    /// Server message, or [`GENERIC_FAILURE_MESSAGE`].
    pub message: String,
}

impl BusinessError {
    /// Builds a business error, falling back to the generic message when the
    /// server sent none (or an empty one).
    pub fn new(code: Option<i32>, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        BusinessError { code, message }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced by pure core logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The server rejected a request at the business level.
    #[error(transparent)]
    Business(#[from] BusinessError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before a mutation is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is below its minimum.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: String },

    /// Invalid format (e.g., unparsable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
