//! # storefront-api: REST Transport
//!
//! Talks to the storefront backend. Everything above this crate sees only
//! the [`ProductsApi`] and [`CartApi`] traits.
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::load ──► IdentityStore::load ──► HttpClient::new            │
//! │                                                  │                      │
//! │                                  ┌───────────────┴──────────────┐       │
//! │                                  ▼                              ▼       │
//! │                           ProductService                   CartService  │
//! │                          (dyn ProductsApi)                (dyn CartApi) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_api::{ApiConfig, CartApi, CartService, HttpClient, IdentityStore};
//!
//! # async fn demo() -> storefront_api::ApiResult<()> {
//! let config = ApiConfig::default();
//! let identity = Arc::new(IdentityStore::in_memory("1712345678901"));
//! let http = Arc::new(HttpClient::new(&config, identity)?);
//!
//! let cart = CartService::new(http).get_cart().await?;
//! println!("{} line(s)", cart.map(|c| c.items.len()).unwrap_or(0));
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod observer;
pub mod products;

pub use cart::{CartApi, CartService};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpClient;
pub use identity::IdentityStore;
pub use observer::{FailureObserver, NoOpObserver};
pub use products::{ProductService, ProductsApi};
