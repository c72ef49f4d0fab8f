//! # Cart Service
//!
//! ```text
//! GET    /cart
//! POST   /cart/items            {productId, quantity}
//! PUT    /cart/items/{itemId}   {quantity}
//! DELETE /cart/items/{itemId}
//! DELETE /cart
//! ```
//!
//! The cart is resolved server-side from the identity header.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use storefront_core::types::Cart;

use crate::error::ApiResult;
use crate::http::{HttpClient, Query};

/// Cart operations used by the store.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// The current cart. `None` when the server answers with null data.
    async fn get_cart(&self) -> ApiResult<Option<Cart>>;

    async fn add_item(&self, product_id: i64, quantity: i64) -> ApiResult<()>;

    async fn update_item(&self, item_id: i64, quantity: i64) -> ApiResult<()>;

    async fn remove_item(&self, item_id: i64) -> ApiResult<()>;

    async fn clear(&self) -> ApiResult<()>;
}

/// [`CartApi`] over HTTP.
#[derive(Clone)]
pub struct CartService {
    http: Arc<HttpClient>,
}

impl CartService {
    pub fn new(http: Arc<HttpClient>) -> Self {
        CartService { http }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemBody {
    product_id: i64,
    quantity: i64,
}

#[derive(Serialize)]
struct QuantityBody {
    quantity: i64,
}

#[async_trait]
impl CartApi for CartService {
    async fn get_cart(&self) -> ApiResult<Option<Cart>> {
        self.http.get_data("/cart", Query::new()).await
    }

    async fn add_item(&self, product_id: i64, quantity: i64) -> ApiResult<()> {
        self.http
            .execute(
                Method::POST,
                "/cart/items",
                Some(&AddItemBody {
                    product_id,
                    quantity,
                }),
            )
            .await
    }

    async fn update_item(&self, item_id: i64, quantity: i64) -> ApiResult<()> {
        self.http
            .execute(
                Method::PUT,
                &format!("/cart/items/{}", item_id),
                Some(&QuantityBody { quantity }),
            )
            .await
    }

    async fn remove_item(&self, item_id: i64) -> ApiResult<()> {
        self.http
            .execute::<()>(Method::DELETE, &format!("/cart/items/{}", item_id), None)
            .await
    }

    async fn clear(&self) -> ApiResult<()> {
        self.http.execute::<()>(Method::DELETE, "/cart", None).await
    }
}
