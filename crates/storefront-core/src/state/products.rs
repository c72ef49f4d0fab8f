//! # Products Slice
//!
//! Owns the product list, its pagination and filter, the loading/error pair
//! and the refresh flag.
//!
//! ## Transition Table
//! ```text
//! ┌───────────────────────────────┬──────────────────────────────────────────┐
//! │ Action                        │ Effect                                   │
//! ├───────────────────────────────┼──────────────────────────────────────────┤
//! │ any async ── Pending          │ loading = true,  error = None            │
//! │ any async ── Rejected(r)      │ loading = false, error = Some(r)         │
//! │ FetchProducts ── Fulfilled    │ products = page.list, pagination = page  │
//! │ FetchVisibleWithSearch ── Ful │ products = page.list, pagination = page  │
//! │ FetchVisible ── Fulfilled     │ products = list, pagination untouched    │
//! │ Create/Update/Delete/Toggle   │ loading = false, should_refresh = true   │
//! │ SetFilter(partial)            │ filter.merge(partial), page_num = 1      │
//! │ SetPagination(patch)          │ pagination.merge(patch)                  │
//! │ ResetRefreshFlag              │ should_refresh = false                   │
//! │ ClearError                    │ error = None                             │
//! └───────────────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! ## Refresh Flag
//! Mutations never touch `products`. They only raise `should_refresh`, and
//! the consuming view answers by issuing a fresh `FetchProducts` and then
//! `ResetRefreshFlag`. Creating or deleting shifts totals and page
//! boundaries, which only the server can compute.

use serde::{Deserialize, Serialize};

use super::transition::Transition;
use crate::types::{Page, Pagination, PaginationPatch, Product, ProductFilter};
use crate::{DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE};

// =============================================================================
// Rejection Fallbacks
// =============================================================================

pub const FETCH_PRODUCTS_FAILED: &str = "Failed to fetch products";
pub const CREATE_PRODUCT_FAILED: &str = "Failed to create product";
pub const UPDATE_PRODUCT_FAILED: &str = "Failed to update product";
pub const DELETE_PRODUCT_FAILED: &str = "Failed to delete product";
pub const TOGGLE_VISIBILITY_FAILED: &str = "Failed to toggle product visibility";
pub const FETCH_VISIBLE_FAILED: &str = "Failed to fetch visible products";
pub const FETCH_VISIBLE_SEARCH_FAILED: &str = "Failed to fetch visible products with search";

// =============================================================================
// State
// =============================================================================

/// The products slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsState {
    /// Result of the most recent successful list fetch, in either query mode.
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub filter: ProductFilter,
    pub should_refresh: bool,
}

impl Default for ProductsState {
    fn default() -> Self {
        ProductsState {
            products: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination::default(),
            filter: ProductFilter::default(),
            should_refresh: false,
        }
    }
}

impl ProductsState {
    /// The admin listing query matching the slice's current position.
    pub fn current_query(&self) -> ProductQuery {
        ProductQuery {
            page_num: self.pagination.page_num,
            page_size: self.pagination.page_size,
            filter: self.filter.clone(),
        }
    }

    /// Looks up a product in the current list.
    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

// =============================================================================
// Action Arguments
// =============================================================================

/// Arguments of the paginated admin listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page_num: u32,
    pub page_size: u32,
    pub filter: ProductFilter,
}

impl Default for ProductQuery {
    fn default() -> Self {
        ProductQuery {
            page_num: DEFAULT_PAGE_NUM,
            page_size: DEFAULT_PAGE_SIZE,
            filter: ProductFilter::default(),
        }
    }
}

/// Arguments of the paginated visible-products search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleQuery {
    pub name: Option<String>,
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for VisibleQuery {
    fn default() -> Self {
        VisibleQuery {
            name: None,
            page_num: DEFAULT_PAGE_NUM,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Everything that can happen to the products slice.
///
/// The paginated and unpaginated listings are separate variants, so the
/// reducer never has to inspect a payload's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductsAction {
    FetchProducts(Transition<Page<Product>>),
    FetchVisibleProducts(Transition<Vec<Product>>),
    FetchVisibleProductsWithSearch(Transition<Page<Product>>),
    CreateProduct(Transition<()>),
    UpdateProduct(Transition<()>),
    DeleteProduct(Transition<()>),
    ToggleVisibility(Transition<()>),
    SetFilter(ProductFilter),
    SetPagination(PaginationPatch),
    ResetRefreshFlag,
    ClearError,
}

impl ProductsAction {
    /// Action name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ProductsAction::FetchProducts(_) => "products/fetchProducts",
            ProductsAction::FetchVisibleProducts(_) => "products/fetchVisibleProducts",
            ProductsAction::FetchVisibleProductsWithSearch(_) => {
                "products/fetchVisibleProductsWithSearch"
            }
            ProductsAction::CreateProduct(_) => "products/createProduct",
            ProductsAction::UpdateProduct(_) => "products/updateProduct",
            ProductsAction::DeleteProduct(_) => "products/deleteProduct",
            ProductsAction::ToggleVisibility(_) => "products/toggleProductVisibility",
            ProductsAction::SetFilter(_) => "products/setFilter",
            ProductsAction::SetPagination(_) => "products/setPagination",
            ProductsAction::ResetRefreshFlag => "products/resetRefreshFlag",
            ProductsAction::ClearError => "products/clearError",
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Computes the next products state.
pub fn reduce(mut state: ProductsState, action: ProductsAction) -> ProductsState {
    match action {
        ProductsAction::FetchProducts(t) | ProductsAction::FetchVisibleProductsWithSearch(t) => {
            if let Some(page) = settle(&mut state, t) {
                state.products = page.list;
                state.pagination = page.pagination;
            }
        }
        ProductsAction::FetchVisibleProducts(t) => {
            if let Some(list) = settle(&mut state, t) {
                state.products = list;
            }
        }
        ProductsAction::CreateProduct(t)
        | ProductsAction::UpdateProduct(t)
        | ProductsAction::DeleteProduct(t)
        | ProductsAction::ToggleVisibility(t) => {
            if settle(&mut state, t).is_some() {
                state.should_refresh = true;
            }
        }
        ProductsAction::SetFilter(partial) => {
            state.filter.merge(partial);
            state.pagination.page_num = DEFAULT_PAGE_NUM;
        }
        ProductsAction::SetPagination(patch) => {
            state.pagination.merge(patch);
        }
        ProductsAction::ResetRefreshFlag => {
            state.should_refresh = false;
        }
        ProductsAction::ClearError => {
            state.error = None;
        }
    }
    state
}

/// Applies the loading/error bookkeeping shared by every async action and
/// hands back the fulfilled value, if any.
fn settle<T>(state: &mut ProductsState, transition: Transition<T>) -> Option<T> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Money::from_cents(999),
            quantity: 5,
            visible: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn page(list: Vec<Product>, total: u64) -> Page<Product> {
        Page {
            list,
            pagination: Pagination::new(1, 10, total),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = ProductsState::default();
        assert!(state.products.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.pagination, Pagination::new(1, 10, 0));
        assert_eq!(state.filter, ProductFilter::default());
        assert!(!state.should_refresh);
    }

    #[test]
    fn test_pending_sets_loading_and_clears_error() {
        let state = ProductsState {
            error: Some("old".into()),
            ..ProductsState::default()
        };
        let state = reduce(state, ProductsAction::FetchProducts(Transition::Pending));
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_fetch_products_fulfilled() {
        let state = reduce(
            ProductsState::default(),
            ProductsAction::FetchProducts(Transition::Fulfilled(page(
                vec![product(1, "P1"), product(2, "P2")],
                2,
            ))),
        );
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.pagination.total, 2);
        assert_eq!(state.pagination.total_pages, 1);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_rejected_stores_reason_and_keeps_products() {
        let state = reduce(
            ProductsState::default(),
            ProductsAction::FetchProducts(Transition::Fulfilled(page(vec![product(1, "P1")], 1))),
        );
        let state = reduce(
            state,
            ProductsAction::FetchProducts(Transition::Rejected("Network down".into())),
        );
        assert_eq!(state.error.as_deref(), Some("Network down"));
        assert!(!state.loading);
        assert_eq!(state.products.len(), 1);
    }

    #[test]
    fn test_visible_list_leaves_pagination_alone() {
        let state = ProductsState {
            pagination: Pagination::new(3, 20, 55),
            ..ProductsState::default()
        };
        let state = reduce(
            state,
            ProductsAction::FetchVisibleProducts(Transition::Fulfilled(vec![product(9, "V")])),
        );
        assert_eq!(state.products, vec![product(9, "V")]);
        assert_eq!(state.pagination, Pagination::new(3, 20, 55));
    }

    #[test]
    fn test_modes_overwrite_each_other() {
        let state = reduce(
            ProductsState::default(),
            ProductsAction::FetchVisibleProducts(Transition::Fulfilled(vec![
                product(1, "A"),
                product(2, "B"),
            ])),
        );
        let state = reduce(
            state,
            ProductsAction::FetchVisibleProductsWithSearch(Transition::Fulfilled(page(
                vec![product(3, "C")],
                1,
            ))),
        );
        assert_eq!(state.products, vec![product(3, "C")]);
        assert_eq!(state.pagination.total, 1);
    }

    #[test]
    fn test_mutations_raise_refresh_flag_only_on_fulfilled() {
        let mutations: Vec<fn(Transition<()>) -> ProductsAction> = vec![
            ProductsAction::CreateProduct,
            ProductsAction::UpdateProduct,
            ProductsAction::DeleteProduct,
            ProductsAction::ToggleVisibility,
        ];
        for make in mutations {
            let before = ProductsState {
                products: vec![product(1, "P1")],
                ..ProductsState::default()
            };

            let pending = reduce(before.clone(), make(Transition::Pending));
            assert!(!pending.should_refresh);

            let rejected = reduce(pending.clone(), make(Transition::Rejected("no".into())));
            assert!(!rejected.should_refresh);

            let done = reduce(pending, make(Transition::Fulfilled(())));
            assert!(done.should_refresh);
            assert!(!done.loading);
            assert_eq!(done.products, before.products);

            let reset = reduce(done, ProductsAction::ResetRefreshFlag);
            assert!(!reset.should_refresh);
        }
    }

    #[test]
    fn test_fetches_never_touch_refresh_flag() {
        let state = ProductsState {
            should_refresh: true,
            ..ProductsState::default()
        };
        let state = reduce(
            state,
            ProductsAction::FetchProducts(Transition::Fulfilled(page(vec![], 0))),
        );
        assert!(state.should_refresh);
    }

    #[test]
    fn test_set_filter_always_rewinds_to_first_page() {
        let filters = [
            ProductFilter {
                name: Some("tea".into()),
                ..ProductFilter::default()
            },
            ProductFilter::default(),
            ProductFilter {
                visible: Some(false),
                ..ProductFilter::default()
            },
            ProductFilter {
                min_price: Some(Money::from_cents(0)),
                max_price: Some(Money::from_cents(5000)),
                ..ProductFilter::default()
            },
        ];

        let mut state = ProductsState::default();
        for (i, filter) in filters.into_iter().enumerate() {
            state = reduce(
                state,
                ProductsAction::SetPagination(PaginationPatch {
                    page_num: Some(i as u32 + 4),
                    page_size: None,
                }),
            );
            state = reduce(state, ProductsAction::SetFilter(filter));
            assert_eq!(state.pagination.page_num, 1);
        }
        assert_eq!(state.filter.name.as_deref(), Some("tea"));
        assert_eq!(state.filter.visible, Some(false));
        assert_eq!(state.filter.max_price, Some(Money::from_cents(5000)));
    }

    #[test]
    fn test_set_pagination_keeps_filter() {
        let state = reduce(
            ProductsState::default(),
            ProductsAction::SetFilter(ProductFilter {
                name: Some("tea".into()),
                ..ProductFilter::default()
            }),
        );
        let state = reduce(
            state,
            ProductsAction::SetPagination(PaginationPatch {
                page_num: Some(2),
                page_size: Some(20),
            }),
        );
        assert_eq!(state.pagination.page_num, 2);
        assert_eq!(state.pagination.page_size, 20);
        assert_eq!(state.filter.name.as_deref(), Some("tea"));
        assert_eq!(
            state.current_query(),
            ProductQuery {
                page_num: 2,
                page_size: 20,
                filter: state.filter.clone(),
            }
        );
    }

    #[test]
    fn test_clear_error() {
        let state = ProductsState {
            error: Some("boom".into()),
            ..ProductsState::default()
        };
        assert_eq!(reduce(state, ProductsAction::ClearError).error, None);
    }
}
