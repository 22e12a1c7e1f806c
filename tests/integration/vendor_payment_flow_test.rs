// Vendor payment flow against a real MySQL database.
//
// Run with: TEST_DATABASE_URL=mysql://... cargo test -- --ignored

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test};
use helpers::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

fn dec(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
#[ignore = "Requires test database configuration"]
async fn test_payment_spreads_over_oldest_receipts_first() {
    let pool = create_test_pool().await;
    let app = test::init_service(test_app(pool)).await;

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/vendors")
            .set_json(TestDataFactory::vendor_payload())
    );
    assert_eq!(status, StatusCode::CREATED);
    let vendor_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["paymentStatus"], "pending");

    // Created newest first to prove ordering follows receivedAt
    let (status, r2) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/receipts", vendor_id))
            .set_json(TestDataFactory::receipt_payload("100", "2026-02-10T09:00:00Z"))
    );
    assert_eq!(status, StatusCode::CREATED);
    let (status, r1) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/receipts", vendor_id))
            .set_json(TestDataFactory::receipt_payload("200", "2026-02-01T09:00:00Z"))
    );
    assert_eq!(status, StatusCode::CREATED);
    let r1_id = r1["data"]["id"].as_str().unwrap().to_string();
    let r2_id = r2["data"]["id"].as_str().unwrap().to_string();

    let (_, vendor) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/vendors/{}", vendor_id))
    );
    assert_eq!(dec(&vendor["data"]["payableAmount"]), Decimal::from(300));

    let (status, payment) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/payments", vendor_id))
            .set_json(TestDataFactory::cash_payment("250"))
    );
    assert_eq!(status, StatusCode::CREATED);

    let allocations = payment["data"]["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    assert_eq!(allocations[0]["documentId"], r1_id.as_str());
    assert_eq!(dec(&allocations[0]["amountApplied"]), Decimal::from(200));
    assert_eq!(allocations[1]["documentId"], r2_id.as_str());
    assert_eq!(dec(&allocations[1]["amountApplied"]), Decimal::from(50));

    let (_, vendor) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/vendors/{}", vendor_id))
    );
    assert_eq!(dec(&vendor["data"]["payableAmount"]), Decimal::from(50));
    assert_eq!(vendor["data"]["paymentStatus"], "partial");

    let (_, receipt) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/receipts/{}", r2_id))
    );
    assert_eq!(receipt["data"]["paymentStatus"], "partial");
    assert_eq!(dec(&receipt["data"]["amountPaid"]), Decimal::from(50));
    assert_eq!(receipt["data"]["items"].as_array().unwrap().len(), 1);

    let (_, open) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/vendors/{}/receipts?status=paid", vendor_id))
    );
    assert_eq!(open["data"].as_array().unwrap().len(), 1);

    let (_, balance) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/vendors/{}/balance", vendor_id))
    );
    assert_eq!(dec(&balance["data"]["drift"]), Decimal::ZERO);
    assert_eq!(balance["data"]["consistent"], true);
    assert_eq!(balance["data"]["openDocuments"], 1);
}

#[actix_web::test]
#[ignore = "Requires test database configuration"]
async fn test_overpayment_leaves_state_untouched() {
    let pool = create_test_pool().await;
    let app = test::init_service(test_app(pool)).await;

    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/vendors")
            .set_json(TestDataFactory::vendor_payload())
    );
    let vendor_id = body["data"]["id"].as_str().unwrap().to_string();

    call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/receipts", vendor_id))
            .set_json(TestDataFactory::receipt_payload("100", "2026-03-01T10:00:00Z"))
    );

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/payments", vendor_id))
            .set_json(TestDataFactory::cash_payment("150"))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("exceeds payable amount"));

    let (_, vendor) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/vendors/{}", vendor_id))
    );
    assert_eq!(dec(&vendor["data"]["payableAmount"]), Decimal::from(100));
    assert_eq!(vendor["data"]["paymentStatus"], "pending");

    let (_, payments) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/vendors/{}/payments", vendor_id))
    );
    assert!(payments["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
#[ignore = "Requires test database configuration"]
async fn test_retried_transaction_id_returns_original_payment() {
    let pool = create_test_pool().await;
    let app = test::init_service(test_app(pool)).await;

    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/vendors")
            .set_json(TestDataFactory::vendor_payload())
    );
    let vendor_id = body["data"]["id"].as_str().unwrap().to_string();

    call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/receipts", vendor_id))
            .set_json(TestDataFactory::receipt_payload("500", "2026-03-01T10:00:00Z"))
    );

    let payload = json!({
        "amount": 120,
        "method": "bank_transfer",
        "transactionId": TestDataFactory::random_transaction_id()
    });

    let (status, first) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/payments", vendor_id))
            .set_json(payload.clone())
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/vendors/{}/payments", vendor_id))
            .set_json(payload)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(first["data"]["paidAt"], second["data"]["paidAt"]);

    let (_, vendor) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/vendors/{}", vendor_id))
    );
    assert_eq!(dec(&vendor["data"]["payableAmount"]), Decimal::from(380));

    let payment_id = first["data"]["id"].as_str().unwrap();
    let (status, fetched) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/payments/{}", payment_id))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["method"], "bank_transfer");
}

#[actix_web::test]
#[ignore = "Requires test database configuration"]
async fn test_payment_to_unknown_vendor_is_not_found() {
    let pool = create_test_pool().await;
    let app = test::init_service(test_app(pool)).await;

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/vendors/00000000-0000-4000-8000-000000000000/payments")
            .set_json(TestDataFactory::cash_payment("10"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}
