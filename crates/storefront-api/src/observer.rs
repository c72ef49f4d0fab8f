//! Failure observer hook.
//!
//! The transport reports every failed request here before returning the
//! error, so a front end can raise a notice without each caller doing it.

use crate::error::ApiError;

/// Receives every request failure.
pub trait FailureObserver: Send + Sync {
    /// Called once per failed request. `endpoint` is `METHOD path`.
    fn on_failure(&self, endpoint: &str, error: &ApiError);
}

/// Observer that ignores failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl FailureObserver for NoOpObserver {
    fn on_failure(&self, _endpoint: &str, _error: &ApiError) {}
}
