// Customer collection flow against a real MySQL database.

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
async fn test_collection_settles_oldest_invoice_first() {
    let pool = create_test_pool().await;
    let app = test::init_service(test_app(pool)).await;

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/customers")
            .set_json(TestDataFactory::customer_payload())
    );
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, inv1) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/customers/{}/invoices", customer_id))
            .set_json(TestDataFactory::invoice_payload("100", "2026-04-01T12:00:00Z"))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert!(inv1["data"]["invoiceNumber"]
        .as_str()
        .unwrap()
        .starts_with("INV-20260401-"));

    call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/customers/{}/invoices", customer_id))
            .set_json(TestDataFactory::invoice_payload("50", "2026-04-03T12:00:00Z"))
    );

    let (status, payment) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/customers/payments")
            .set_json(json!({
                "customerId": customer_id,
                "amount": 120,
                "paymentMethod": "cash"
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["data"]["payeeKind"], "customer");

    let allocations = payment["data"]["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    assert_eq!(dec(&allocations[0]["amountApplied"]), Decimal::from(100));
    assert_eq!(dec(&allocations[1]["amountApplied"]), Decimal::from(20));

    let (_, customer) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/customers/{}", customer_id))
    );
    assert_eq!(dec(&customer["data"]["currentDueAmount"]), Decimal::from(30));
    assert_eq!(customer["data"]["paymentStatus"], "partial");

    let (_, history) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/customers/{}/payments", customer_id))
    );
    assert_eq!(history["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
#[ignore = "Requires test database configuration"]
async fn test_directed_collection_and_full_settlement() {
    let pool = create_test_pool().await;
    let app = test::init_service(test_app(pool)).await;

    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/customers")
            .set_json(TestDataFactory::customer_payload())
    );
    let customer_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, older) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/customers/{}/invoices", customer_id))
            .set_json(TestDataFactory::invoice_payload("300", "2026-04-01T12:00:00Z"))
    );
    let (_, newer) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/customers/{}/invoices", customer_id))
            .set_json(TestDataFactory::invoice_payload("80", "2026-04-05T12:00:00Z"))
    );
    let older_id = older["data"]["id"].as_str().unwrap().to_string();
    let newer_id = newer["data"]["id"].as_str().unwrap().to_string();

    // Pay the newer invoice in full, skipping the older one
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/customers/payments")
            .set_json(json!({
                "customerId": customer_id,
                "amount": 80,
                "paymentMethod": "digital",
                "transactionId": TestDataFactory::random_transaction_id(),
                "allocations": [{ "invoiceId": newer_id, "amount": 80 }]
            }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (_, newer) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/invoices/{}", newer_id))
    );
    assert_eq!(newer["data"]["paymentStatus"], "paid");

    // A paid invoice is no longer a valid target
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/customers/payments")
            .set_json(json!({
                "customerId": customer_id,
                "amount": 10,
                "paymentMethod": "cash",
                "allocations": [{ "invoiceId": newer_id, "amount": 10 }]
            }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/customers/payments")
            .set_json(json!({ "customerId": customer_id, "amount": 300, "paymentMethod": "cash" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (_, customer) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/customers/{}", customer_id))
    );
    assert_eq!(dec(&customer["data"]["currentDueAmount"]), Decimal::ZERO);
    assert_eq!(customer["data"]["paymentStatus"], "paid");

    let (_, older) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/invoices/{}", older_id))
    );
    assert_eq!(older["data"]["paymentStatus"], "paid");

    // A new invoice reopens the account
    call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/customers/{}/invoices", customer_id))
            .set_json(TestDataFactory::invoice_payload("15", "2026-04-09T12:00:00Z"))
    );
    let (_, customer) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/customers/{}", customer_id))
    );
    assert_eq!(customer["data"]["paymentStatus"], "pending");
}
