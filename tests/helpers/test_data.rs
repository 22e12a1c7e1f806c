// Test data factory: request payloads with unique names and ids.

use serde_json::{json, Value};
use uuid::Uuid;

pub struct TestDataFactory;

impl TestDataFactory {
    pub fn random_transaction_id() -> String {
        format!("TEST-TXN-{}", Uuid::new_v4())
    }

    pub fn vendor_payload() -> Value {
        json!({
            "name": format!("Test Vendor {}", Uuid::new_v4()),
            "phone": "+1-555-0100",
            "email": "orders@vendor.test"
        })
    }

    pub fn customer_payload() -> Value {
        json!({
            "name": format!("Test Customer {}", Uuid::new_v4()),
            "phone": "+1-555-0199"
        })
    }

    /// Receipt with a single line worth exactly `total`
    pub fn receipt_payload(total: &str, received_at: &str) -> Value {
        json!({
            "reference": format!("GRN-{}", &Uuid::new_v4().simple().to_string()[..8]),
            "receivedAt": received_at,
            "items": [
                { "productName": "Mixed produce", "quantity": "1", "unitCost": total }
            ]
        })
    }

    /// Invoice with a single line worth exactly `total`
    pub fn invoice_payload(total: &str, issued_at: &str) -> Value {
        json!({
            "issuedAt": issued_at,
            "items": [
                { "description": "Groceries on account", "quantity": "1", "unitPrice": total }
            ]
        })
    }

    pub fn cash_payment(amount: &str) -> Value {
        json!({ "amount": amount, "method": "cash" })
    }
}
