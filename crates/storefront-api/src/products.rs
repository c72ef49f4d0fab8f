//! # Products Service
//!
//! Catalog endpoints.
//!
//! ```text
//! GET    /products?pageNum=&pageSize=&name=&minPrice=&maxPrice=&visible=
//! POST   /products
//! PUT    /products/{id}
//! DELETE /products/{id}
//! PATCH  /products/{id}/visibility          {visible}
//! GET    /products/visible/simple
//! GET    /products/visible?name=&pageNum=&pageSize=
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use storefront_core::types::{Page, Product, ProductFilter, ProductFormData, ProductUpdate};

use crate::error::ApiResult;
use crate::http::{HttpClient, Query};

/// Catalog operations used by the store.
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// One page of the full catalog. Absent filter fields are not sent.
    async fn list_products(
        &self,
        page_num: u32,
        page_size: u32,
        filter: &ProductFilter,
    ) -> ApiResult<Page<Product>>;

    async fn create_product(&self, data: &ProductFormData) -> ApiResult<()>;

    async fn update_product(&self, id: i64, data: &ProductUpdate) -> ApiResult<()>;

    async fn delete_product(&self, id: i64) -> ApiResult<()>;

    async fn set_visibility(&self, id: i64, visible: bool) -> ApiResult<()>;

    /// Every visible product, unpaginated. A non-list payload yields an
    /// empty list.
    async fn list_visible_products(&self) -> ApiResult<Vec<Product>>;

    /// One page of visible products, optionally filtered by name.
    async fn list_visible_products_with_search(
        &self,
        name: Option<&str>,
        page_num: u32,
        page_size: u32,
    ) -> ApiResult<Page<Product>>;
}

/// [`ProductsApi`] over HTTP.
#[derive(Clone)]
pub struct ProductService {
    http: Arc<HttpClient>,
}

impl ProductService {
    pub fn new(http: Arc<HttpClient>) -> Self {
        ProductService { http }
    }
}

#[derive(Serialize)]
struct VisibilityBody {
    visible: bool,
}

#[async_trait]
impl ProductsApi for ProductService {
    async fn list_products(
        &self,
        page_num: u32,
        page_size: u32,
        filter: &ProductFilter,
    ) -> ApiResult<Page<Product>> {
        self.http
            .get_required("/products", list_query(page_num, page_size, filter))
            .await
    }

    async fn create_product(&self, data: &ProductFormData) -> ApiResult<()> {
        self.http.execute(Method::POST, "/products", Some(data)).await
    }

    async fn update_product(&self, id: i64, data: &ProductUpdate) -> ApiResult<()> {
        self.http
            .execute(Method::PUT, &format!("/products/{}", id), Some(data))
            .await
    }

    async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.http
            .execute::<()>(Method::DELETE, &format!("/products/{}", id), None)
            .await
    }

    async fn set_visibility(&self, id: i64, visible: bool) -> ApiResult<()> {
        self.http
            .execute(
                Method::PATCH,
                &format!("/products/{}/visibility", id),
                Some(&VisibilityBody { visible }),
            )
            .await
    }

    async fn list_visible_products(&self) -> ApiResult<Vec<Product>> {
        self.http
            .get_sequence("/products/visible/simple", Query::new())
            .await
    }

    async fn list_visible_products_with_search(
        &self,
        name: Option<&str>,
        page_num: u32,
        page_size: u32,
    ) -> ApiResult<Page<Product>> {
        self.http
            .get_required("/products/visible", visible_query(name, page_num, page_size))
            .await
    }
}

// =============================================================================
// Query Builders
// =============================================================================

/// Query for `GET /products`. Present-but-zero prices are sent.
///
/// The name is trimmed and dropped when blank rather than passed through
/// verbatim, so `"  tea "` is sent as `tea` and `"  "` sends no `name`.
pub(crate) fn list_query(page_num: u32, page_size: u32, filter: &ProductFilter) -> Query {
    let mut query: Query = vec![
        ("pageNum", page_num.to_string()),
        ("pageSize", page_size.to_string()),
    ];
    if let Some(name) = filter.name_term() {
        query.push(("name", name.to_string()));
    }
    if let Some(min) = filter.min_price {
        query.push(("minPrice", min.to_decimal_string()));
    }
    if let Some(max) = filter.max_price {
        query.push(("maxPrice", max.to_decimal_string()));
    }
    if let Some(visible) = filter.visible {
        query.push(("visible", visible.to_string()));
    }
    query
}

/// Query for `GET /products/visible`. A blank name is omitted.
pub(crate) fn visible_query(name: Option<&str>, page_num: u32, page_size: u32) -> Query {
    let mut query = Query::new();
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        query.push(("name", name.to_string()));
    }
    query.push(("pageNum", page_num.to_string()));
    query.push(("pageSize", page_size.to_string()));
    query
}
