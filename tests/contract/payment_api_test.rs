// Contract tests for the payment endpoints.
//
// Every case here is rejected by request validation, so the lazily
// connected pool is never used and no database is needed.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test};
use helpers::*;
use serde_json::{json, Value};

const VENDOR_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

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

fn error_message(body: &Value) -> String {
    body["error"]["message"].as_str().unwrap_or_default().to_string()
}

fn vendor_payments_uri() -> String {
    format!("/api/vendors/{}/payments", VENDOR_ID)
}

#[actix_web::test]
async fn test_vendor_payment_rejects_non_positive_amount() {
    for amount in ["0", "-5", "-0.01"] {
        let (status, body) =
            post_json(&vendor_payments_uri(), json!({ "amount": amount, "method": "cash" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {}", amount);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], 400);
        assert!(error_message(&body).contains("must be positive"));
    }
}

#[actix_web::test]
async fn test_vendor_payment_rejects_sub_cent_amount() {
    let (status, body) =
        post_json(&vendor_payments_uri(), json!({ "amount": "10.005", "method": "cash" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("decimal places"));
}

#[actix_web::test]
async fn test_vendor_payment_rejects_oversized_allocations() {
    let huge = "79228162514264337593543950335";
    let (status, body) = post_json(
        &vendor_payments_uri(),
        json!({
            "amount": huge,
            "method": "cash",
            "allocations": [
                { "receiptId": "r1", "amount": huge },
                { "receiptId": "r2", "amount": huge }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("cannot exceed"));

    let (status, _) = post_json(
        &vendor_payments_uri(),
        json!({ "amount": "10000000000000.00", "method": "cash" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_vendor_payment_rejects_unknown_method() {
    let (status, body) =
        post_json(&vendor_payments_uri(), json!({ "amount": 50, "method": "crypto" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("crypto"));
}

#[actix_web::test]
async fn test_non_cash_payment_requires_transaction_id() {
    for method in ["bank_transfer", "digital", "cheque"] {
        let (status, body) =
            post_json(&vendor_payments_uri(), json!({ "amount": 50, "method": method })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "method {}", method);
        assert!(error_message(&body).contains("Transaction ID is required"));
    }

    // Blank ids count as missing
    let (status, _) = post_json(
        &vendor_payments_uri(),
        json!({ "amount": 50, "method": "bank_transfer", "transactionId": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_transaction_id_length_is_limited() {
    let (status, body) = post_json(
        &vendor_payments_uri(),
        json!({ "amount": 50, "method": "digital", "transactionId": "x".repeat(101) }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("cannot exceed 100"));
}

#[actix_web::test]
async fn test_directed_allocations_must_match_amount() {
    let (status, body) = post_json(
        &vendor_payments_uri(),
        json!({
            "amount": 100,
            "method": "cash",
            "allocations": [
                { "receiptId": "r-1", "amount": 60 },
                { "receiptId": "r-2", "amount": 30 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("must add up to the payment amount"));
}

#[actix_web::test]
async fn test_directed_allocations_reject_duplicates() {
    let (status, body) = post_json(
        &vendor_payments_uri(),
        json!({
            "amount": 100,
            "method": "cash",
            "allocations": [
                { "receiptId": "r-1", "amount": 50 },
                { "receiptId": "r-1", "amount": 50 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("more than once"));
}

#[actix_web::test]
async fn test_malformed_body_gets_error_envelope() {
    let app = test::init_service(test_app(create_lazy_pool())).await;
    let req = test::TestRequest::post()
        .uri(&vendor_payments_uri())
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"amount\": ")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(error_message(&body).contains("Invalid request body"));
}

#[actix_web::test]
async fn test_customer_payment_route_is_not_taken_for_customer_id() {
    let (status, body) = post_json(
        "/api/customers/payments",
        json!({ "customerId": "c-1", "amount": 0, "paymentMethod": "cash" }),
    )
    .await;

    // 400 from payment validation, not 405 from the customer resource
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("must be positive"));
}

#[actix_web::test]
async fn test_customer_payment_requires_customer_id() {
    let (status, _) = post_json(
        "/api/customers/payments",
        json!({ "amount": 10, "paymentMethod": "cash" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        "/api/customers/payments",
        json!({ "customerId": " ", "amount": 10, "paymentMethod": "cash" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("Customer ID is required"));
}

#[actix_web::test]
async fn test_customer_payment_accepts_method_alias() {
    // `method` is accepted in place of `paymentMethod`; validation still applies
    let (status, body) = post_json(
        "/api/customers/payments",
        json!({ "customerId": "c-1", "amount": 10, "method": "cheque" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("Transaction ID is required"));
}

#[actix_web::test]
async fn test_payment_history_paging_is_validated() {
    let app = test::init_service(test_app(create_lazy_pool())).await;
    let req = test::TestRequest::get()
        .uri(&format!("{}?limit=0", vendor_payments_uri()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
