//! # Views
//!
//! Each view drives the store the way a screen of the storefront does:
//!
//! - [`admin`] - catalog listing, search, paging and product mutations
//! - [`shop`] - visible products and the cart

pub mod admin;
pub mod shop;

use storefront_core::state::Settled;

use crate::error::{ConsoleError, ConsoleResult};

/// Turns a rejected action into an error. The failure notice has already
/// been raised by the transport.
pub(crate) fn settled<T>(outcome: Settled<T>) -> ConsoleResult<T> {
    outcome.into_result().map_err(ConsoleError::Rejected)
}
