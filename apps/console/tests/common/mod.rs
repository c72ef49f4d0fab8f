//! In-memory stand-ins for the REST services.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storefront_api::{ApiError, ApiResult, CartApi, ProductsApi};
use storefront_console::notify::{Notice, Notifier};
use storefront_console::Store;
use storefront_core::types::{
    Cart, CartItem, Page, Pagination, Product, ProductFilter, ProductFormData, ProductUpdate,
};
use storefront_core::Money;
use tokio::sync::Notify;

pub fn product(id: i64, name: &str, quantity: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: Money::from_cents(1000 + id),
        quantity,
        visible: true,
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Default)]
pub struct FakeCatalog {
    pub products: Mutex<Vec<Product>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<ApiError>>,
    /// Listings whose name filter is `"slow"` wait for this before answering.
    pub slow_gate: Arc<Notify>,
}

impl FakeCatalog {
    pub fn with(products: Vec<Product>) -> Arc<Self> {
        let catalog = FakeCatalog::default();
        *catalog.products.lock().unwrap() = products;
        Arc::new(catalog)
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn page(list: Vec<Product>, page_num: u32, page_size: u32) -> Page<Product> {
        let total = list.len() as u64;
        let start = ((page_num.max(1) - 1) * page_size) as usize;
        Page {
            list: list.into_iter().skip(start).take(page_size as usize).collect(),
            pagination: Pagination::new(page_num, page_size, total),
        }
    }
}

#[async_trait]
impl ProductsApi for FakeCatalog {
    async fn list_products(
        &self,
        page_num: u32,
        page_size: u32,
        filter: &ProductFilter,
    ) -> ApiResult<Page<Product>> {
        let name = filter.name_term().map(str::to_string);
        self.record(format!("list_products {} {} {:?}", page_num, page_size, name))?;
        if name.as_deref() == Some("slow") {
            self.slow_gate.notified().await;
        }
        let list = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| name.as_deref().map_or(true, |n| p.name.contains(n) || n == "slow"))
            .filter(|p| filter.visible.map_or(true, |v| p.visible == v))
            .cloned()
            .collect();
        Ok(Self::page(list, page_num, page_size))
    }

    async fn create_product(&self, data: &ProductFormData) -> ApiResult<()> {
        self.record(format!("create_product {}", data.name))?;
        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        products.push(Product {
            id,
            name: data.name.clone(),
            price: data.price,
            quantity: data.quantity,
            visible: data.visible,
            created_at: None,
            updated_at: None,
        });
        Ok(())
    }

    async fn update_product(&self, id: i64, data: &ProductUpdate) -> ApiResult<()> {
        self.record(format!("update_product {}", id))?;
        let mut products = self.products.lock().unwrap();
        if let Some(p) = products.iter_mut().find(|p| p.id == id) {
            if let Some(name) = &data.name {
                p.name = name.clone();
            }
            if let Some(price) = data.price {
                p.price = price;
            }
            if let Some(quantity) = data.quantity {
                p.quantity = quantity;
            }
            if let Some(visible) = data.visible {
                p.visible = visible;
            }
        }
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.record(format!("delete_product {}", id))?;
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn set_visibility(&self, id: i64, visible: bool) -> ApiResult<()> {
        self.record(format!("set_visibility {} {}", id, visible))?;
        if let Some(p) = self.products.lock().unwrap().iter_mut().find(|p| p.id == id) {
            p.visible = visible;
        }
        Ok(())
    }

    async fn list_visible_products(&self) -> ApiResult<Vec<Product>> {
        self.record("list_visible_products".to_string())?;
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.visible)
            .cloned()
            .collect())
    }

    async fn list_visible_products_with_search(
        &self,
        name: Option<&str>,
        page_num: u32,
        page_size: u32,
    ) -> ApiResult<Page<Product>> {
        self.record(format!(
            "list_visible_products_with_search {:?} {} {}",
            name, page_num, page_size
        ))?;
        let list = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.visible)
            .filter(|p| name.map_or(true, |n| p.name.contains(n)))
            .cloned()
            .collect();
        Ok(Self::page(list, page_num, page_size))
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A cart server: totals are computed here, never by the client.
#[derive(Default)]
pub struct FakeCart {
    pub cart: Mutex<Option<Cart>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<ApiError>>,
}

impl FakeCart {
    pub fn empty() -> Arc<Self> {
        Arc::new(FakeCart::default())
    }

    pub fn with_line(item_id: i64, product_id: i64, quantity: i64) -> Arc<Self> {
        let fake = FakeCart::default();
        let mut cart = Cart {
            id: 1,
            items: vec![CartItem {
                id: item_id,
                product_id,
                product_name: format!("Product {}", product_id),
                price: Money::from_cents(1000),
                quantity,
                total_price: Money::zero(),
            }],
            total_amount: Money::zero(),
            item_count: 0,
        };
        recompute(&mut cart);
        *fake.cart.lock().unwrap() = Some(cart);
        Arc::new(fake)
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn recompute(cart: &mut Cart) {
    for item in &mut cart.items {
        item.total_price = Money::from_cents(item.price.cents() * item.quantity);
    }
    cart.total_amount = Money::from_cents(cart.items.iter().map(|i| i.total_price.cents()).sum());
    cart.item_count = cart.items.iter().map(|i| i.quantity).sum();
}

#[async_trait]
impl CartApi for FakeCart {
    async fn get_cart(&self) -> ApiResult<Option<Cart>> {
        self.record("get_cart".to_string())?;
        Ok(self.cart.lock().unwrap().clone())
    }

    async fn add_item(&self, product_id: i64, quantity: i64) -> ApiResult<()> {
        self.record(format!("add_item {} {}", product_id, quantity))?;
        let mut guard = self.cart.lock().unwrap();
        let cart = guard.get_or_insert_with(|| Cart {
            id: 1,
            items: Vec::new(),
            total_amount: Money::zero(),
            item_count: 0,
        });
        let next_id = cart.items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        cart.items.push(CartItem {
            id: next_id,
            product_id,
            product_name: format!("Product {}", product_id),
            price: Money::from_cents(1000),
            quantity,
            total_price: Money::zero(),
        });
        recompute(cart);
        Ok(())
    }

    async fn update_item(&self, item_id: i64, quantity: i64) -> ApiResult<()> {
        self.record(format!("update_item {} {}", item_id, quantity))?;
        if let Some(cart) = self.cart.lock().unwrap().as_mut() {
            if let Some(item) = cart.items.iter_mut().find(|i| i.id == item_id) {
                item.quantity = quantity;
            }
            recompute(cart);
        }
        Ok(())
    }

    async fn remove_item(&self, item_id: i64) -> ApiResult<()> {
        self.record(format!("remove_item {}", item_id))?;
        if let Some(cart) = self.cart.lock().unwrap().as_mut() {
            cart.items.retain(|i| i.id != item_id);
            recompute(cart);
        }
        Ok(())
    }

    async fn clear(&self) -> ApiResult<()> {
        self.record("clear".to_string())?;
        if let Some(cart) = self.cart.lock().unwrap().as_mut() {
            cart.items.clear();
            recompute(cart);
        }
        Ok(())
    }
}

// =============================================================================
// Notices
// =============================================================================

#[derive(Default)]
pub struct RecordingNotifier(pub Mutex<Vec<Notice>>);

impl RecordingNotifier {
    pub fn texts(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|n| n.text.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

pub fn store(catalog: &Arc<FakeCatalog>, cart: &Arc<FakeCart>) -> Store {
    Store::new(catalog.clone(), cart.clone())
}
