// Contract tests for vendor, customer, receipt and invoice endpoints.
// Only validation paths are exercised; no database is needed.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test};
use helpers::*;
use serde_json::{json, Value};

async fn post_json(uri: &str, payload: Value) -> (StatusCode, Value) {
    let app = test::init_service(test_app(create_lazy_pool())).await;
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(payload)
        .to_request();

    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

async fn get_status(uri: &str) -> StatusCode {
    let app = test::init_service(test_app(create_lazy_pool())).await;
    let req = test::TestRequest::get().uri(uri).to_request();
    test::call_service(&app, req).await.status()
}

#[actix_web::test]
async fn test_health_is_served_outside_api_scope() {
    let app = test::init_service(test_app(create_lazy_pool())).await;
    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("X-Request-ID", "contract-health"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "contract-health");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_create_vendor_requires_name() {
    let (status, body) = post_json("/api/vendors", json!({ "name": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Name is required"));
}

#[actix_web::test]
async fn test_create_customer_rejects_bad_email() {
    let (status, _) = post_json(
        "/api/customers",
        json!({ "name": "Walk-in Account", "email": "nobody" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_receipt_requires_items() {
    let (status, body) = post_json(
        "/api/vendors/v-1/receipts",
        json!({ "reference": "GRN-1", "items": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("at least one item"));
}

#[actix_web::test]
async fn test_receipt_rejects_bad_quantity() {
    let (status, _) = post_json(
        "/api/vendors/v-1/receipts",
        json!({ "items": [{ "productName": "Eggs", "quantity": 0, "unitCost": 3 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        "/api/vendors/v-1/receipts",
        json!({ "items": [{ "productName": "Cheese", "quantity": "0.1234", "unitCost": 3 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_invoice_rejects_negative_price() {
    let (status, _) = post_json(
        "/api/customers/c-1/invoices",
        json!({ "items": [{ "description": "Bread", "quantity": 2, "unitPrice": -1 }] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_document_status_filter_is_validated() {
    assert_eq!(
        get_status("/api/vendors/v-1/receipts?status=overdue").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        get_status("/api/customers/c-1/invoices?status=void").await,
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_list_paging_is_validated() {
    assert_eq!(
        get_status("/api/vendors?limit=500").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        get_status("/api/customers?offset=-1").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        get_status("/api/customers?limit=abc").await,
        StatusCode::BAD_REQUEST
    );
}
