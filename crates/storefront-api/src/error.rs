//! # API Error Types
//!
//! Error types for REST operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Transport     │  │   HTTP Status   │  │     Business            │ │
//! │  │  (no response)  │  │  (non-2xx)      │  │  (success: false)       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Transport      │  │  Status {       │  │  Business(BusinessError)│ │
//! │  │  Timeout        │  │    status,      │  │                         │ │
//! │  │                 │  │    message }    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Protocol     │  │  Configuration  │  │      Identity           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Decode         │  │  Config         │  │  Identity               │ │
//! │  │                 │  │  InvalidUrl     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of an `ApiError` is what a slice stores as `error`.

use storefront_core::BusinessError;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a request can fail.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// No response was received (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Transport(String),

    /// The configured request timeout elapsed.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The server answered with a non-2xx status.
    ///
    /// `message` is the `message` (or `error`) field of the JSON body, when
    /// the body had one.
    #[error("{}", status_text(.status, .message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// The envelope reported `success: false`.
    #[error(transparent)]
    Business(#[from] BusinessError),

    /// The body could not be decoded into the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client configuration is invalid or unreadable.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// The identity token could not be read or persisted.
    #[error("Identity store error: {0}")]
    Identity(String),
}

fn status_text(status: &u16, message: Option<&str>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => format!("Request failed with status code {}", status),
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ApiError {
    fn from(err: toml::ser::Error) -> Self {
        ApiError::Config(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ApiError {
    /// The HTTP status, for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-provided message, for `Status` and `Business` errors.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Business(err) => Some(&err.message),
            _ => None,
        }
    }

    /// Returns true if no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout(_))
    }

    /// Returns true if repeating the same request may succeed.
    ///
    /// Nothing in this crate retries; the flag is informational for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::Timeout(_) => true,
            ApiError::Status { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Returns true if this error indicates a local configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ApiError::Config(_) | ApiError::InvalidUrl(_) | ApiError::Identity(_)
        )
    }
}
