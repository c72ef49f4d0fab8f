//! Plain-text rendering of slice state.
//!
//! Renderers return strings; views decide where they go.

use std::fmt::Write;

use storefront_core::state::{CartState, ProductsState};
use storefront_core::types::{Cart, CartItem, Pagination, Product};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Catalog table as seen by the admin view.
pub fn admin_products(state: &ProductsState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<28} {:>12} {:>8}  {:<8} {:<19}",
        "ID", "Name", "Price", "Stock", "Visible", "Updated"
    );
    for p in &state.products {
        let _ = writeln!(
            out,
            "{:>6}  {:<28} {:>12} {:>8}  {:<8} {:<19}",
            p.id,
            truncate(&p.name, 28),
            p.price.to_string(),
            p.quantity,
            if p.visible { "shown" } else { "hidden" },
            p.updated_at
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    out.push_str(&pagination_line(&state.pagination));
    out
}

/// Product listing as seen by the shop view.
pub fn shop_products(products: &[Product]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>6}  {:<28} {:>12} {:>14}", "ID", "Name", "Price", "Stock");
    for p in products {
        let _ = writeln!(
            out,
            "{:>6}  {:<28} {:>12} {:>14}",
            p.id,
            truncate(&p.name, 28),
            p.price.to_string(),
            stock_label(p),
        );
    }
    out
}

/// "Out of Stock" for empty stock, the count otherwise.
pub fn stock_label(product: &Product) -> String {
    if product.quantity > 0 {
        product.quantity.to_string()
    } else {
        "Out of Stock".to_string()
    }
}

pub fn pagination_line(p: &Pagination) -> String {
    format!(
        "Page {}/{} ({} total, {} per page)\n",
        p.page_num,
        p.total_pages.max(1),
        p.total,
        p.page_size
    )
}

/// One page of the cart lines plus the server totals.
///
/// Cart lines are paged locally; the cart endpoint always returns all of them.
pub fn cart(state: &CartState, page_num: u32, page_size: u32) -> String {
    let Some(cart) = state.cart.as_ref().filter(|c| !c.is_empty()) else {
        return "Cart is empty\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<28} {:>12} {:>5} {:>12}",
        "Item", "Product", "Price", "Qty", "Subtotal"
    );
    for item in cart_page(cart, page_num, page_size) {
        let _ = writeln!(
            out,
            "{:>6}  {:<28} {:>12} {:>5} {:>12}",
            item.id,
            truncate(&item.product_name, 28),
            item.price.to_string(),
            item.quantity,
            item.total_price.to_string(),
        );
    }
    let pages = storefront_core::types::total_pages(cart.items.len() as u64, page_size).max(1);
    let _ = writeln!(
        out,
        "Lines page {}/{}  |  {} item(s)  |  Total {}",
        page_num, pages, cart.item_count, cart.total_amount
    );
    out
}

/// The cart lines on 1-based page `page_num`.
pub fn cart_page(cart: &Cart, page_num: u32, page_size: u32) -> &[CartItem] {
    let size = page_size.max(1) as usize;
    let start = (page_num.max(1) as usize - 1).saturating_mul(size);
    if start >= cart.items.len() {
        return &[];
    }
    let end = (start + size).min(cart.items.len());
    &cart.items[start..end]
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Money;

    fn item(id: i64) -> CartItem {
        CartItem {
            id,
            product_id: id * 10,
            product_name: format!("Tea {}", id),
            price: Money::from_cents(500),
            quantity: 1,
            total_price: Money::from_cents(500),
        }
    }

    fn cart_of(n: i64) -> Cart {
        Cart {
            id: 1,
            items: (1..=n).map(item).collect(),
            total_amount: Money::from_cents(500 * n),
            item_count: n,
        }
    }

    #[test]
    fn test_cart_page_slices_locally() {
        let cart = cart_of(7);
        let ids = |page: &[CartItem]| page.iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(ids(cart_page(&cart, 1, 3)), vec![1, 2, 3]);
        assert_eq!(ids(cart_page(&cart, 3, 3)), vec![7]);
        assert!(cart_page(&cart, 4, 3).is_empty());
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(cart(&CartState::default(), 1, 10), "Cart is empty\n");
        let state = CartState {
            cart: Some(cart_of(0)),
            ..CartState::default()
        };
        assert_eq!(cart(&state, 1, 10), "Cart is empty\n");
    }

    #[test]
    fn test_cart_totals_are_servers() {
        let state = CartState {
            cart: Some(cart_of(2)),
            ..CartState::default()
        };
        let text = cart(&state, 1, 10);
        assert!(text.contains("Tea 2"));
        assert!(text.contains("Total ¥10.00"));
    }

    #[test]
    fn test_stock_label() {
        let mut p = Product {
            id: 1,
            name: "Oolong".into(),
            price: Money::from_cents(100),
            quantity: 0,
            visible: true,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(stock_label(&p), "Out of Stock");
        p.quantity = 4;
        assert_eq!(stock_label(&p), "4");
    }
}
