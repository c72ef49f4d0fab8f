//! # User Notices
//!
//! Short messages shown to the user after an action.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  success path:  view ──► Notice::success("Added to cart") ──► Notifier  │
//! │                                                                         │
//! │  failure path:  HttpClient ──► FailureObserver::on_failure(&ApiError)   │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                          failure_notice(&err) ──► Notifier              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failure text is chosen by HTTP status, so every view reports transport
//! problems the same way without handling them itself.

use std::io::Write;
use std::sync::Arc;

use storefront_api::{ApiError, FailureObserver};
use tracing::debug;

// =============================================================================
// Notice
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// One message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Notice {
            level: Level::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: Level::Error,
            text: text.into(),
        }
    }
}

/// Somewhere notices go.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

// =============================================================================
// Terminal Notifier
// =============================================================================

/// Writes notices to stderr, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let tag = match notice.level {
            Level::Success => "ok",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        // best effort
        let _ = writeln!(std::io::stderr(), "[{}] {}", tag, notice.text);
    }
}

// =============================================================================
// Failure Notices
// =============================================================================

/// Forwards request failures to a [`Notifier`].
pub struct NoticeObserver {
    notifier: Arc<dyn Notifier>,
}

impl NoticeObserver {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        NoticeObserver { notifier }
    }
}

impl FailureObserver for NoticeObserver {
    fn on_failure(&self, endpoint: &str, error: &ApiError) {
        let notice = failure_notice(error);
        debug!(endpoint = %endpoint, notice = %notice.text, "Raising failure notice");
        self.notifier.notify(notice);
    }
}

/// The user-facing notice for a failed request.
pub fn failure_notice(error: &ApiError) -> Notice {
    let server = error.server_message().filter(|m| !m.trim().is_empty());

    match error {
        ApiError::Status { status, .. } => match status {
            400 => Notice::error(server.unwrap_or("Request parameter error")),
            401 => Notice::error("Unauthorized access, please login again"),
            403 => Notice::error("Access denied, insufficient permissions"),
            404 => Notice::error("Requested resource not found"),
            409 => Notice::error(server.unwrap_or("Data conflict")),
            422 => Notice::error(server.unwrap_or("Data validation failed")),
            429 => Notice::warning("Too many requests, please try again later"),
            500 => Notice::error("Internal server error, please try again later"),
            502 => Notice::error("Service temporarily unavailable, please try again later"),
            503 => Notice::error("Service under maintenance, please try again later"),
            other => Notice::error(
                server
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Request failed ({})", other)),
            ),
        },
        ApiError::Transport(_) | ApiError::Timeout(_) => {
            Notice::error("Network connection error, please check network settings")
        }
        other => Notice::error(other.to_string()),
    }
}
