//! # Admin Catalog View
//!
//! Lists the full catalog and applies product mutations.
//!
//! ## Refresh Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update / delete / visibility                                  │
//! │        │                                                                │
//! │        ▼ Fulfilled                                                      │
//! │  should_refresh = true  (products untouched)                            │
//! │        │                                                                │
//! │        ▼ sync_refresh()                                                 │
//! │  reset_refresh_flag() ──► fetch_products(current pagination + filter)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::state::ProductQuery;
use storefront_core::types::{PaginationPatch, ProductFilter, ProductFormData, ProductUpdate};
use storefront_core::validation::{
    validate_page_num, validate_page_size, validate_product_form, validate_product_update,
};
use tracing::{debug, info};

use super::settled;
use crate::error::{ConsoleError, ConsoleResult};
use crate::notify::{Notice, Notifier};
use crate::state::Store;

pub const CREATED: &str = "Product created successfully";
pub const UPDATED: &str = "Product updated successfully";
pub const DELETED: &str = "Product deleted successfully";

/// The admin catalog view over a store.
pub struct AdminView<'a> {
    store: &'a Store,
    notifier: &'a dyn Notifier,
}

impl<'a> AdminView<'a> {
    pub fn new(store: &'a Store, notifier: &'a dyn Notifier) -> Self {
        AdminView { store, notifier }
    }

    /// Fetches the page described by the current pagination and filter.
    pub async fn load(&self) -> ConsoleResult<()> {
        let query = self.store.products().current_query();
        debug!(page = query.page_num, size = query.page_size, "Loading catalog");
        settled(self.store.fetch_products(query).await).map(|_| ())
    }

    /// Loads an explicit query without touching the stored filter.
    pub async fn load_query(&self, query: ProductQuery) -> ConsoleResult<()> {
        settled(self.store.fetch_products(query).await).map(|_| ())
    }

    /// Answers a raised refresh flag. Returns true if a reload was issued.
    pub async fn sync_refresh(&self) -> ConsoleResult<bool> {
        if !self.store.products().should_refresh {
            return Ok(false);
        }
        // cleared as soon as the reload is issued, whatever its outcome
        self.store.reset_refresh_flag();
        self.load().await?;
        Ok(true)
    }

    // =========================================================================
    // Filtering and Paging
    // =========================================================================

    /// Name search. An empty term clears the name constraint.
    pub async fn search(&self, name: &str) -> ConsoleResult<()> {
        self.apply_filter(ProductFilter {
            name: Some(name.to_string()),
            ..ProductFilter::default()
        })
        .await
    }

    /// Merges `partial` into the filter (back to page 1) and reloads.
    pub async fn apply_filter(&self, partial: ProductFilter) -> ConsoleResult<()> {
        self.store.set_filter(partial);
        self.load().await
    }

    /// Moves to another page, optionally changing the page size.
    pub async fn go_to_page(&self, page_num: u32, page_size: Option<u32>) -> ConsoleResult<()> {
        validate_page_num(page_num)?;
        if let Some(size) = page_size {
            validate_page_size(size)?;
        }
        self.store.set_pagination(PaginationPatch {
            page_num: Some(page_num),
            page_size,
        });
        self.load().await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn create(&self, form: ProductFormData) -> ConsoleResult<()> {
        validate_product_form(&form)?;
        let name = form.name.clone();
        settled(self.store.create_product(form).await)?;
        info!(name = %name, "Product created");
        self.succeed(CREATED).await
    }

    pub async fn update(&self, id: i64, update: ProductUpdate) -> ConsoleResult<()> {
        if update.is_empty() {
            return Err(ConsoleError::InvalidInput("Nothing to update".into()));
        }
        validate_product_update(&update)?;
        settled(self.store.update_product(id, update).await)?;
        info!(id, "Product updated");
        self.succeed(UPDATED).await
    }

    pub async fn delete(&self, id: i64) -> ConsoleResult<()> {
        settled(self.store.delete_product(id).await)?;
        info!(id, "Product deleted");
        self.succeed(DELETED).await
    }

    pub async fn set_visibility(&self, id: i64, visible: bool) -> ConsoleResult<()> {
        settled(self.store.toggle_product_visibility(id, visible).await)?;
        info!(id, visible, "Product visibility changed");
        self.succeed(&visibility_notice(visible)).await
    }

    async fn succeed(&self, text: &str) -> ConsoleResult<()> {
        self.notifier.notify(Notice::success(text));
        self.sync_refresh().await.map(|_| ())
    }
}

/// `Product shown successfully` / `Product hidden successfully`.
pub fn visibility_notice(visible: bool) -> String {
    format!(
        "Product {} successfully",
        if visible { "shown" } else { "hidden" }
    )
}
