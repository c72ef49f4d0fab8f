//! Cart service against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use storefront_api::{CartApi, CartService, HttpClient, IdentityStore};
use storefront_core::Money;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> CartService {
    let http = HttpClient::with_base_url(
        &format!("{}/api", server.uri()),
        Duration::from_secs(5),
        Arc::new(IdentityStore::in_memory("1700000000000")),
    )
    .unwrap();
    CartService::new(Arc::new(http))
}

#[tokio::test]
async fn test_get_cart_decodes_server_totals() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("X-User-ID", "1700000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 4,
                "items": [{
                    "id": 11,
                    "productId": 2,
                    "productName": "Puer",
                    "price": 30,
                    "quantity": 3,
                    "totalPrice": 90
                }],
                "totalAmount": 90,
                "itemCount": 3
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cart = service(&server).get_cart().await.unwrap().unwrap();
    assert_eq!(cart.id, 4);
    assert_eq!(cart.items[0].product_name, "Puer");
    assert_eq!(cart.items[0].total_price, Money::from_cents(9000));
    assert_eq!(cart.total_amount, Money::from_cents(9000));
    assert_eq!(cart.item_count, 3);
}

#[tokio::test]
async fn test_null_cart_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
        .mount(&server)
        .await;

    assert_eq!(service(&server).get_cart().await.unwrap(), None);
}

#[tokio::test]
async fn test_item_mutations() {
    let server = MockServer::start().await;
    let ok = || ResponseTemplate::new(200).set_body_json(json!({"success": true}));

    Mock::given(method("POST"))
        .and(path("/api/cart/items"))
        .and(body_json(json!({"productId": 1, "quantity": 2})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/items/11"))
        .and(body_json(json!({"quantity": 5})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/items/11"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    svc.add_item(1, 2).await.unwrap();
    svc.update_item(11, 5).await.unwrap();
    svc.remove_item(11).await.unwrap();
    svc.clear().await.unwrap();
}

#[tokio::test]
async fn test_update_sends_zero_and_negative_quantities_as_is() {
    let server = MockServer::start().await;
    let ok = || ResponseTemplate::new(200).set_body_json(json!({"success": true}));

    Mock::given(method("PUT"))
        .and(path("/api/cart/items/11"))
        .and(body_json(json!({"quantity": 0})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/items/11"))
        .and(body_json(json!({"quantity": -1})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    svc.update_item(11, 0).await.unwrap();
    svc.update_item(11, -1).await.unwrap();
}

#[tokio::test]
async fn test_insufficient_stock_message_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cart/items"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Insufficient stock"
        })))
        .mount(&server)
        .await;

    let err = service(&server).add_item(1, 500).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Insufficient stock");
}
