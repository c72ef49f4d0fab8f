//! # Shop View
//!
//! Visible products plus the cart. Every successful cart mutation is
//! followed by a reload of both the cart and the current listing, because
//! line totals and stock levels only change server-side.
//!
//! ```text
//!   add / update / remove / clear ── Fulfilled ──► notice
//!                                                  ├─► fetch_cart
//!                                                  └─► listing reload (stock)
//! ```

use storefront_core::state::VisibleQuery;
use storefront_core::validation::{validate_cart_quantity, validate_page_num, validate_page_size};
use tracing::{debug, info};

use super::settled;
use crate::error::{ConsoleError, ConsoleResult};
use crate::notify::{Notice, Notifier};
use crate::state::Store;

pub const ADDED: &str = "Added to cart";
pub const QUANTITY_UPDATED: &str = "Quantity updated successfully";
pub const REMOVED: &str = "Removed from cart";
pub const CLEARED: &str = "Cart cleared";

/// Which product listing the shop shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Every visible product, unpaginated.
    All,
    /// One page of visible products, optionally searched by name.
    Search(VisibleQuery),
}

impl Default for Listing {
    fn default() -> Self {
        Listing::Search(VisibleQuery::default())
    }
}

/// The shop view over a store.
pub struct ShopView<'a> {
    store: &'a Store,
    notifier: &'a dyn Notifier,
    listing: Listing,
}

impl<'a> ShopView<'a> {
    pub fn new(store: &'a Store, notifier: &'a dyn Notifier, listing: Listing) -> ConsoleResult<Self> {
        if let Listing::Search(query) = &listing {
            validate_page_num(query.page_num)?;
            validate_page_size(query.page_size)?;
        }
        Ok(ShopView {
            store,
            notifier,
            listing,
        })
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Loads the listing and the cart concurrently.
    pub async fn load(&self) -> ConsoleResult<()> {
        let (listing, cart) = tokio::join!(self.load_listing(), self.store.fetch_cart());
        listing?;
        settled(cart).map(|_| ())
    }

    async fn load_listing(&self) -> ConsoleResult<()> {
        match &self.listing {
            Listing::All => settled(self.store.fetch_visible_products().await).map(|_| ()),
            Listing::Search(query) => {
                settled(self.store.fetch_visible_products_with_search(query.clone()).await)
                    .map(|_| ())
            }
        }
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Adds a product; `None` adds one unit.
    pub async fn add(&self, product_id: i64, quantity: Option<i64>) -> ConsoleResult<()> {
        if let Some(quantity) = quantity {
            validate_cart_quantity(quantity)?;
        }
        settled(self.store.add_to_cart(product_id, quantity).await)?;
        info!(product_id, "Added to cart");
        self.succeed(ADDED).await
    }

    /// Sets a line's quantity. Zero or less removes the line; more than the
    /// listed stock plus what the line already holds is refused.
    pub async fn update_quantity(&self, item_id: i64, quantity: i64) -> ConsoleResult<()> {
        if quantity <= 0 {
            return self.remove(item_id).await;
        }

        if let Some(available) = self.available_stock(item_id) {
            if quantity > available {
                return Err(ConsoleError::InvalidInput(format!(
                    "Quantity cannot exceed available stock: {}",
                    available
                )));
            }
        }

        settled(self.store.update_cart_item(item_id, quantity).await)?;
        info!(item_id, quantity, "Cart quantity updated");
        self.succeed(QUANTITY_UPDATED).await
    }

    pub async fn remove(&self, item_id: i64) -> ConsoleResult<()> {
        settled(self.store.remove_from_cart(item_id).await)?;
        info!(item_id, "Removed from cart");
        self.succeed(REMOVED).await
    }

    pub async fn clear(&self) -> ConsoleResult<()> {
        settled(self.store.clear_cart().await)?;
        info!("Cart cleared");
        self.succeed(CLEARED).await
    }

    /// Listed stock of the line's product plus the units already in the
    /// line. `None` when the line is not in the loaded cart.
    pub fn available_stock(&self, item_id: i64) -> Option<i64> {
        let cart = self.store.cart().cart?;
        let item = cart.item(item_id)?;
        let listed = self
            .store
            .products()
            .product(item.product_id)
            .map(|p| p.quantity)
            .unwrap_or(0);
        Some(listed + item.quantity)
    }

    async fn succeed(&self, text: &str) -> ConsoleResult<()> {
        self.notifier.notify(Notice::success(text));
        debug!("Reloading cart and listing after cart change");
        self.load().await
    }
}
