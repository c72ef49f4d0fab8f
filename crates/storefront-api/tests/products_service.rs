//! Products service against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use storefront_api::{ApiError, HttpClient, IdentityStore, ProductService, ProductsApi};
use storefront_core::types::{ProductFilter, ProductFormData, ProductUpdate};
use storefront_core::Money;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> ProductService {
    let http = HttpClient::with_base_url(
        &format!("{}/api", server.uri()),
        Duration::from_secs(5),
        Arc::new(IdentityStore::in_memory("1700000000000")),
    )
    .unwrap();
    ProductService::new(Arc::new(http))
}

fn product(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "price": 12.5,
        "quantity": 40,
        "visible": true,
        "createdAt": "2024-03-01 09:30:00",
        "updatedAt": "2024-03-02 10:00:00"
    })
}

#[tokio::test]
async fn test_list_products_sends_filter_and_decodes_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("pageNum", "2"))
        .and(query_param("pageSize", "5"))
        .and(query_param("name", "tea"))
        .and(query_param("minPrice", "0.00"))
        .and(query_param_is_missing("maxPrice"))
        .and(query_param_is_missing("visible"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "success": true,
            "data": {
                "list": [product(6, "Green tea"), product(7, "Black tea")],
                "pagination": {"pageNum": 2, "pageSize": 5, "total": 7, "totalPages": 2}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = ProductFilter {
        name: Some(" tea ".into()),
        min_price: Some(Money::zero()),
        ..ProductFilter::default()
    };
    let page = service(&server).list_products(2, 5, &filter).await.unwrap();

    assert_eq!(page.list.len(), 2);
    assert_eq!(page.list[0].name, "Green tea");
    assert_eq!(page.list[0].price, Money::from_cents(1250));
    assert_eq!(page.pagination.total, 7);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn test_visible_simple_tolerates_non_list_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/visible/simple"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"unexpected": "shape"}
        })))
        .mount(&server)
        .await;

    let products = service(&server).list_visible_products().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_visible_simple_decodes_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/visible/simple"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [product(1, "Oolong")]
        })))
        .mount(&server)
        .await;

    let products = service(&server).list_visible_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 1);
}

#[tokio::test]
async fn test_visible_search_omits_blank_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/visible"))
        .and(query_param_is_missing("name"))
        .and(query_param("pageNum", "1"))
        .and(query_param("pageSize", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "list": [],
                "pagination": {"pageNum": 1, "pageSize": 12, "total": 0, "totalPages": 0}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = service(&server)
        .list_visible_products_with_search(Some("  "), 1, 12)
        .await
        .unwrap();
    assert!(page.list.is_empty());
}

#[tokio::test]
async fn test_mutations_hit_their_endpoints() {
    let server = MockServer::start().await;
    let ok = || ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null}));

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(json!({"name": "Jasmine", "price": 8.8, "quantity": 3, "visible": true})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/products/9"))
        .and(body_json(json!({"quantity": 0})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/9/visibility"))
        .and(body_json(json!({"visible": false})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    svc.create_product(&ProductFormData {
        name: "Jasmine".into(),
        price: Money::from_cents(880),
        quantity: 3,
        visible: true,
    })
    .await
    .unwrap();
    svc.update_product(
        9,
        &ProductUpdate {
            quantity: Some(0),
            ..ProductUpdate::default()
        },
    )
    .await
    .unwrap();
    svc.set_visibility(9, false).await.unwrap();
    svc.delete_product(9).await.unwrap();
}

#[tokio::test]
async fn test_business_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 409,
            "success": false,
            "message": "Product is in a cart"
        })))
        .mount(&server)
        .await;

    let err = service(&server).delete_product(3).await.unwrap_err();
    assert!(matches!(err, ApiError::Business(_)));
    assert_eq!(err.to_string(), "Product is in a cart");
}
