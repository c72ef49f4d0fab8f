//! # Async Action Transitions
//!
//! Each asynchronous action moves through exactly one of two paths:
//!
//! ```text
//!                 ┌──────────────► Fulfilled(value)
//!   Pending ──────┤
//!                 └──────────────► Rejected(reason)
//! ```
//!
//! The store dispatches `Pending` before awaiting a service call and one of
//! the terminal transitions afterwards. Reducers match on the transition;
//! callers receive the terminal outcome as a [`Settled`].

use std::fmt;

/// One step of an in-flight asynchronous action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    /// The request has been issued and not yet answered.
    Pending,

    /// The request succeeded with `T`.
    Fulfilled(T),

    /// The request failed; the reason is what the slice stores as `error`.
    Rejected(String),
}

impl<T> Transition<T> {
    /// Converts a service result into its terminal transition.
    ///
    /// An error whose text is empty is replaced by `fallback`.
    pub fn settle<E: fmt::Display>(result: Result<T, E>, fallback: &str) -> Self {
        match result {
            Ok(value) => Transition::Fulfilled(value),
            Err(err) => Transition::Rejected(rejection_reason(&err, fallback)),
        }
    }

    /// Returns true for `Pending`.
    pub fn is_pending(&self) -> bool {
        matches!(self, Transition::Pending)
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Transition::Pending => "pending",
            Transition::Fulfilled(_) => "fulfilled",
            Transition::Rejected(_) => "rejected",
        }
    }
}

/// The terminal outcome of a dispatched action, handed back to the caller.
///
/// Failures never escape as errors: a rejected action is a value the caller
/// may inspect or ignore, and the same reason is already stored in the slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T> {
    Fulfilled(T),
    Rejected(String),
}

impl<T> Settled<T> {
    /// Returns true if the action succeeded.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    /// Returns the rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Settled::Fulfilled(_) => None,
            Settled::Rejected(reason) => Some(reason),
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Settled::Fulfilled(value) => Ok(value),
            Settled::Rejected(reason) => Err(reason),
        }
    }
}

impl<T: Clone> Transition<T> {
    /// The caller-facing outcome of a terminal transition.
    ///
    /// `Pending` has no outcome and yields `None`.
    pub fn outcome(&self) -> Option<Settled<T>> {
        match self {
            Transition::Pending => None,
            Transition::Fulfilled(value) => Some(Settled::Fulfilled(value.clone())),
            Transition::Rejected(reason) => Some(Settled::Rejected(reason.clone())),
        }
    }
}

fn rejection_reason<E: fmt::Display>(err: &E, fallback: &str) -> String {
    let reason = err.to_string();
    if reason.trim().is_empty() {
        fallback.to_string()
    } else {
        reason
    }
}
