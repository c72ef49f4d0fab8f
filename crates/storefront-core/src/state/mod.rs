//! # State Module
//!
//! The two slices and the root state that combines them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           RootState                                     │
//! │                                                                         │
//! │   ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │   │        ProductsState         │   │          CartState           │   │
//! │   │  products, pagination,       │   │  cart: Option<Cart>          │   │
//! │   │  filter, should_refresh,     │   │  loading, error              │   │
//! │   │  loading, error              │   │                              │   │
//! │   └──────────────▲───────────────┘   └──────────────▲───────────────┘   │
//! │                  │ products::reduce                 │ cart::reduce      │
//! │                  └──────────────┬───────────────────┘                   │
//! │                                 │                                       │
//! │                      reduce(RootState, Action)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reducers are plain functions of `(state, action)`. Whoever owns the state
//! (the console's `Store`) applies them one at a time.

pub mod cart;
pub mod products;
pub mod transition;

use serde::{Deserialize, Serialize};

pub use cart::{CartAction, CartState};
pub use products::{ProductQuery, ProductsAction, ProductsState, VisibleQuery};
pub use transition::{Settled, Transition};

/// Combined application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootState {
    pub products: ProductsState,
    pub cart: CartState,
}

/// An action addressed to one of the slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Products(ProductsAction),
    Cart(CartAction),
}

impl Action {
    /// Action name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Products(a) => a.name(),
            Action::Cart(a) => a.name(),
        }
    }
}

impl From<ProductsAction> for Action {
    fn from(action: ProductsAction) -> Self {
        Action::Products(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

/// Routes `action` to its slice; the other slice is returned unchanged.
pub fn reduce(state: RootState, action: Action) -> RootState {
    match action {
        Action::Products(a) => RootState {
            products: products::reduce(state.products, a),
            cart: state.cart,
        },
        Action::Cart(a) => RootState {
            products: state.products,
            cart: cart::reduce(state.cart, a),
        },
    }
}
