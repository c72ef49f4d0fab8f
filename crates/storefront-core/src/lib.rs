//! # storefront-core: Pure State Logic for the Storefront Client
//!
//! This crate is the **heart** of the storefront client. It holds the wire
//! types, the response envelope decoder and the two state slices (products,
//! cart) as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Client Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Console views (apps/console)                    │   │
//! │  │    Admin catalog ──► Shop listing ──► Cart                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Store::fetch_products, add_to_cart..  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ envelope  │  │   state   │  │ validation│  │   │
//! │  │   │  Product  │  │ Envelope  │  │ products  │  │   forms   │  │   │
//! │  │   │   Cart    │  │ Business  │  │   cart    │  │  paging   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE REDUCERS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-api (REST transport)                 │   │
//! │  │           ProductService, CartService, identity header          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Product, Cart, Pagination, filters, forms)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`envelope`] - `{success, data, message}` response decoding
//! - [`error`] - Domain error types
//! - [`validation`] - Client-side form and paging checks
//! - [`state`] - Products and cart slices with their pure reducers
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::state::products::{self, ProductsAction, ProductsState};
//! use storefront_core::types::ProductFilter;
//!
//! let state = ProductsState::default();
//! let state = products::reduce(
//!     state,
//!     ProductsAction::SetFilter(ProductFilter {
//!         name: Some("tea".to_string()),
//!         ..ProductFilter::default()
//!     }),
//! );
//!
//! // A filter change always rewinds to the first page.
//! assert_eq!(state.pagination.page_num, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod envelope;
pub mod error;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use envelope::Envelope;
pub use error::{BusinessError, CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page number used when a caller does not ask for one.
pub const DEFAULT_PAGE_NUM: u32 = 1;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size the server accepts.
pub const MAX_PAGE_SIZE: u32 = 100;
