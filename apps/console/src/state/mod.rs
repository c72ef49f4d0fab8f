//! # State Module
//!
//! The console keeps a single explicitly owned [`Store`]. It is built once
//! in `run` and handed by reference to whichever view runs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Store                                         │
//! │                                                                         │
//! │   watch::Sender<RootState> ──► subscribe() ──► watch::Receiver          │
//! │            ▲                                                            │
//! │            │ send_modify(reduce)                                        │
//! │            │                                                            │
//! │   fetch_products / add_to_cart / ...  ──► Arc<dyn ProductsApi/CartApi>  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod store;

pub use store::{Store, DEFAULT_ADD_QUANTITY};
