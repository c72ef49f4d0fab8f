//! # Cart Slice
//!
//! Holds the current cart snapshot. The snapshot is only ever replaced by a
//! successful `FetchCart`, or dropped by a successful `ClearCart`.
//!
//! ```text
//!   FetchCart ── Fulfilled(cart) ──► cart = cart (the server may answer null)
//!   AddItem / UpdateItem / RemoveItem ── Fulfilled ──► loading = false
//!                                                     (cart untouched)
//!   ClearCart ── Fulfilled ──► cart = None
//! ```
//!
//! Line totals, the cart total and stock levels are computed server-side, so
//! item mutations leave the snapshot stale on purpose; the view follows each
//! one with `FetchCart`.

use serde::{Deserialize, Serialize};

use super::transition::Transition;
use crate::types::Cart;

pub const FETCH_CART_FAILED: &str = "Failed to fetch cart";
pub const ADD_TO_CART_FAILED: &str = "Failed to add to cart";
pub const UPDATE_CART_ITEM_FAILED: &str = "Failed to update cart item";
pub const REMOVE_FROM_CART_FAILED: &str = "Failed to remove from cart";
pub const CLEAR_CART_FAILED: &str = "Failed to clear cart";

/// The cart slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub cart: Option<Cart>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Everything that can happen to the cart slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    FetchCart(Transition<Option<Cart>>),
    AddItem(Transition<()>),
    UpdateItem(Transition<()>),
    RemoveItem(Transition<()>),
    ClearCart(Transition<()>),
    ClearError,
}

impl CartAction {
    /// Action name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::FetchCart(_) => "cart/fetchCart",
            CartAction::AddItem(_) => "cart/addToCart",
            CartAction::UpdateItem(_) => "cart/updateCartItem",
            CartAction::RemoveItem(_) => "cart/removeFromCart",
            CartAction::ClearCart(_) => "cart/clearCart",
            CartAction::ClearError => "cart/clearError",
        }
    }
}

/// Computes the next cart state.
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::FetchCart(t) => {
            if let Some(cart) = settle(&mut state, t) {
                state.cart = cart;
            }
        }
        CartAction::AddItem(t) | CartAction::UpdateItem(t) | CartAction::RemoveItem(t) => {
            settle(&mut state, t);
        }
        CartAction::ClearCart(t) => {
            if settle(&mut state, t).is_some() {
                state.cart = None;
            }
        }
        CartAction::ClearError => state.error = None,
    }
    state
}

fn settle<T>(state: &mut CartState, transition: Transition<T>) -> Option<T> {
    match transition {
        Transition::Pending => {
            state.loading = true;
            state.error = None;
            None
        }
        Transition::Fulfilled(value) => {
            state.loading = false;
            Some(value)
        }
        Transition::Rejected(reason) => {
            state.loading = false;
            state.error = Some(reason);
            None
        }
    }
}
