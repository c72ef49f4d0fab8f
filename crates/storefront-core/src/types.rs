//! # Domain Types
//!
//! Wire types exchanged with the storefront REST API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Cart       │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │◄──│  items[] ───────┼──►│  product_id(FK) │       │
//! │  │  price (Money)  │   │  total_amount   │   │  product_name   │       │
//! │  │  quantity       │   │  item_count     │   │  price/total    │       │
//! │  │  visible        │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Pagination    │   │    Page<T>      │   │  ProductFilter  │       │
//! │  │  page_num ≥ 1   │   │  list: Vec<T>   │   │  name?          │       │
//! │  │  page_size ≥ 1  │   │  pagination     │   │  min/max_price? │       │
//! │  │  total, pages   │   └─────────────────┘   │  visible?       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Server-Computed Fields
//! `CartItem::total_price`, `Cart::total_amount` and `Cart::item_count` are
//! computed by the server and trusted as-is. Nothing in this crate derives
//! them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE};

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Products are never edited in place by the client: every change goes
/// through the products service and is followed by a reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Money,

    /// Units in stock.
    pub quantity: i64,

    /// Whether the product appears in the shop listing.
    pub visible: bool,

    #[serde(default, with = "local_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default, with = "local_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the cart.
///
/// `product_name` and `price` are snapshots taken when the item was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub price: Money,
    pub quantity: i64,
    pub total_price: Money,
}

/// The cart belonging to the current client identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: i64,

    #[serde(default)]
    pub items: Vec<CartItem>,

    #[serde(default)]
    pub total_amount: Money,

    #[serde(default)]
    pub item_count: i64,
}

impl Cart {
    /// Finds the line holding `item_id`.
    pub fn item(&self, item_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Page position and totals for a paginated listing.
///
/// ## Invariant
/// `total_pages = ceil(total / page_size)`, which is 0 when `total` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_num: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Builds a pagination record, deriving `total_pages`.
    pub fn new(page_num: u32, page_size: u32, total: u64) -> Self {
        Pagination {
            page_num,
            page_size,
            total,
            total_pages: total_pages(total, page_size),
        }
    }

    /// Applies a partial update of page number and/or page size.
    ///
    /// Totals are left alone; they only ever come from the server.
    pub fn merge(&mut self, patch: PaginationPatch) {
        if let Some(page_num) = patch.page_num {
            self.page_num = page_num;
        }
        if let Some(page_size) = patch.page_size {
            self.page_size = page_size;
        }
    }

    /// Returns true if a page after the current one exists.
    pub fn has_next(&self) -> bool {
        self.page_num < self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE, 0)
    }
}

/// `ceil(total / page_size)`; a zero page size yields zero pages.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Partial pagination update, used by `SetPagination`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
}

/// A page of results as returned by paginated endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub pagination: Pagination,
}

// =============================================================================
// Filters and Forms
// =============================================================================

/// Catalog filter for the admin listing.
///
/// Absent fields impose no constraint. A blank `name` is treated as absent
/// when the query string is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ProductFilter {
    /// Overwrites every field present in `partial`; absent fields keep their
    /// current value.
    pub fn merge(&mut self, partial: ProductFilter) {
        if partial.name.is_some() {
            self.name = partial.name;
        }
        if partial.min_price.is_some() {
            self.min_price = partial.min_price;
        }
        if partial.max_price.is_some() {
            self.max_price = partial.max_price;
        }
        if partial.visible.is_some() {
            self.visible = partial.visible;
        }
    }

    /// The name constraint, trimmed, or `None` when blank.
    pub fn name_term(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormData {
    pub name: String,
    pub price: Money,
    pub quantity: i64,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Body of `PUT /products/{id}`: any subset of the form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ProductUpdate {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none() && self.visible.is_none()
    }
}

impl From<ProductFormData> for ProductUpdate {
    fn from(form: ProductFormData) -> Self {
        ProductUpdate {
            name: Some(form.name),
            price: Some(form.price),
            quantity: Some(form.quantity),
            visible: Some(form.visible),
        }
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// The server writes local timestamps as `yyyy-MM-dd HH:mm:ss`; ISO-8601
/// (`T` separator, optional fraction) is accepted as well.
mod local_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(&s, FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
