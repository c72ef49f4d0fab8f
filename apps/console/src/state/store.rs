//! # Store
//!
//! Owns the application state and runs the asynchronous actions.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    store.fetch_products(query)                          │
//! │                                                                         │
//! │  1. dispatch(FetchProducts(Pending))      loading = true, error = None  │
//! │                                                                         │
//! │  2. products_api.list_products(..).await  (no lock held while waiting)  │
//! │                                                                         │
//! │  3. dispatch(FetchProducts(Fulfilled(page)))   or   Rejected(reason)    │
//! │                                                                         │
//! │  4. return Settled::Fulfilled(page)            or   Settled::Rejected   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every dispatch runs `reduce` inside `watch::Sender::send_modify`, so
//! transitions are applied one at a time and every subscriber sees each
//! resulting snapshot. Concurrent actions on the same slice are not
//! sequenced: whichever request completes last writes last.

use std::future::Future;
use std::sync::Arc;

use storefront_api::{ApiResult, CartApi, ProductsApi};
use storefront_core::state::cart::{
    ADD_TO_CART_FAILED, CLEAR_CART_FAILED, FETCH_CART_FAILED, REMOVE_FROM_CART_FAILED,
    UPDATE_CART_ITEM_FAILED,
};
use storefront_core::state::products::{
    CREATE_PRODUCT_FAILED, DELETE_PRODUCT_FAILED, FETCH_PRODUCTS_FAILED, FETCH_VISIBLE_FAILED,
    FETCH_VISIBLE_SEARCH_FAILED, TOGGLE_VISIBILITY_FAILED, UPDATE_PRODUCT_FAILED,
};
use storefront_core::state::{
    self as root, Action, CartAction, CartState, ProductQuery, ProductsAction, ProductsState,
    RootState, Settled, Transition, VisibleQuery,
};
use storefront_core::types::{
    Cart, Page, PaginationPatch, Product, ProductFilter, ProductFormData, ProductUpdate,
};
use tokio::sync::watch;
use tracing::debug;

/// Quantity used by `add_to_cart` when none is given.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;

/// The application store.
pub struct Store {
    state: watch::Sender<RootState>,
    products_api: Arc<dyn ProductsApi>,
    cart_api: Arc<dyn CartApi>,
}

impl Store {
    /// Creates a store with default state.
    pub fn new(products_api: Arc<dyn ProductsApi>, cart_api: Arc<dyn CartApi>) -> Self {
        let (state, _) = watch::channel(RootState::default());
        Store {
            state,
            products_api,
            cart_api,
        }
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// Applies one action to the state.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        debug!(action = action.name(), "Dispatching");
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = root::reduce(current, action);
        });
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> RootState {
        self.state.borrow().clone()
    }

    /// A copy of the products slice.
    pub fn products(&self) -> ProductsState {
        self.state.borrow().products.clone()
    }

    /// A copy of the cart slice.
    pub fn cart(&self) -> CartState {
        self.state.borrow().cart.clone()
    }

    /// Receives every state change until the store shuts down.
    pub fn subscribe(&self) -> watch::Receiver<RootState> {
        self.state.subscribe()
    }

    /// Drops the store; subscribers observe the channel closing.
    pub fn shutdown(self) {
        debug!(subscribers = self.state.receiver_count(), "Store shutting down");
    }

    // =========================================================================
    // Products Actions
    // =========================================================================

    /// Loads one page of the catalog.
    pub async fn fetch_products(&self, query: ProductQuery) -> Settled<Page<Product>> {
        let api = Arc::clone(&self.products_api);
        self.run(ProductsAction::FetchProducts, FETCH_PRODUCTS_FAILED, async move {
            api.list_products(query.page_num, query.page_size, &query.filter)
                .await
        })
        .await
    }

    /// Loads every visible product. Pagination is left as it was.
    pub async fn fetch_visible_products(&self) -> Settled<Vec<Product>> {
        let api = Arc::clone(&self.products_api);
        self.run(ProductsAction::FetchVisibleProducts, FETCH_VISIBLE_FAILED, async move {
            api.list_visible_products().await
        })
        .await
    }

    /// Loads one page of visible products, optionally filtered by name.
    pub async fn fetch_visible_products_with_search(
        &self,
        query: VisibleQuery,
    ) -> Settled<Page<Product>> {
        let api = Arc::clone(&self.products_api);
        self.run(
            ProductsAction::FetchVisibleProductsWithSearch,
            FETCH_VISIBLE_SEARCH_FAILED,
            async move {
                api.list_visible_products_with_search(
                    query.name.as_deref(),
                    query.page_num,
                    query.page_size,
                )
                .await
            },
        )
        .await
    }

    pub async fn create_product(&self, data: ProductFormData) -> Settled<()> {
        let api = Arc::clone(&self.products_api);
        self.run(ProductsAction::CreateProduct, CREATE_PRODUCT_FAILED, async move {
            api.create_product(&data).await
        })
        .await
    }

    pub async fn update_product(&self, id: i64, data: ProductUpdate) -> Settled<()> {
        let api = Arc::clone(&self.products_api);
        self.run(ProductsAction::UpdateProduct, UPDATE_PRODUCT_FAILED, async move {
            api.update_product(id, &data).await
        })
        .await
    }

    pub async fn delete_product(&self, id: i64) -> Settled<()> {
        let api = Arc::clone(&self.products_api);
        self.run(ProductsAction::DeleteProduct, DELETE_PRODUCT_FAILED, async move {
            api.delete_product(id).await
        })
        .await
    }

    pub async fn toggle_product_visibility(&self, id: i64, visible: bool) -> Settled<()> {
        let api = Arc::clone(&self.products_api);
        self.run(ProductsAction::ToggleVisibility, TOGGLE_VISIBILITY_FAILED, async move {
            api.set_visibility(id, visible).await
        })
        .await
    }

    /// Merges `partial` into the filter and rewinds to page 1.
    pub fn set_filter(&self, partial: ProductFilter) {
        self.dispatch(ProductsAction::SetFilter(partial));
    }

    pub fn set_pagination(&self, patch: PaginationPatch) {
        self.dispatch(ProductsAction::SetPagination(patch));
    }

    pub fn reset_refresh_flag(&self) {
        self.dispatch(ProductsAction::ResetRefreshFlag);
    }

    pub fn clear_products_error(&self) {
        self.dispatch(ProductsAction::ClearError);
    }

    // =========================================================================
    // Cart Actions
    // =========================================================================

    pub async fn fetch_cart(&self) -> Settled<Option<Cart>> {
        let api = Arc::clone(&self.cart_api);
        self.run(CartAction::FetchCart, FETCH_CART_FAILED, async move {
            api.get_cart().await
        })
        .await
    }

    /// Adds `quantity` (default 1) of a product. The cart snapshot is not
    /// updated; follow with [`Store::fetch_cart`].
    pub async fn add_to_cart(&self, product_id: i64, quantity: Option<i64>) -> Settled<()> {
        let quantity = quantity.unwrap_or(DEFAULT_ADD_QUANTITY);
        let api = Arc::clone(&self.cart_api);
        self.run(CartAction::AddItem, ADD_TO_CART_FAILED, async move {
            api.add_item(product_id, quantity).await
        })
        .await
    }

    pub async fn update_cart_item(&self, item_id: i64, quantity: i64) -> Settled<()> {
        let api = Arc::clone(&self.cart_api);
        self.run(CartAction::UpdateItem, UPDATE_CART_ITEM_FAILED, async move {
            api.update_item(item_id, quantity).await
        })
        .await
    }

    pub async fn remove_from_cart(&self, item_id: i64) -> Settled<()> {
        let api = Arc::clone(&self.cart_api);
        self.run(CartAction::RemoveItem, REMOVE_FROM_CART_FAILED, async move {
            api.remove_item(item_id).await
        })
        .await
    }

    pub async fn clear_cart(&self) -> Settled<()> {
        let api = Arc::clone(&self.cart_api);
        self.run(CartAction::ClearCart, CLEAR_CART_FAILED, async move {
            api.clear().await
        })
        .await
    }

    pub fn clear_cart_error(&self) {
        self.dispatch(CartAction::ClearError);
    }

    // =========================================================================
    // Action Runner
    // =========================================================================

    /// Dispatches `Pending`, awaits `request`, dispatches the terminal
    /// transition and returns it to the caller.
    async fn run<T, A, F>(
        &self,
        wrap: impl Fn(Transition<T>) -> A,
        fallback: &str,
        request: F,
    ) -> Settled<T>
    where
        T: Clone,
        A: Into<Action>,
        F: Future<Output = ApiResult<T>>,
    {
        self.dispatch(wrap(Transition::Pending));

        let transition = Transition::settle(request.await, fallback);
        let outcome = transition
            .outcome()
            .unwrap_or_else(|| Settled::Rejected(fallback.to_string()));

        self.dispatch(wrap(transition));
        outcome
    }
}
