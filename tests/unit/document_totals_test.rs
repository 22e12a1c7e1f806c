// Receipt and invoice pricing: line totals, document totals, status rules.

use rust_decimal_macros::dec;
use storeledger::core::{money, AppError, PaymentStatus};
use storeledger::customers::models::{CreateInvoiceRequest, InvoiceItemRequest};
use storeledger::vendors::models::{CreateReceiptRequest, ReceiptItemRequest};

#[test]
fn test_weighed_produce_is_rounded_per_line() {
    let receipt = CreateReceiptRequest {
        reference: None,
        received_at: None,
        notes: None,
        items: vec![
            ReceiptItemRequest {
                product_name: "Bananas".to_string(),
                quantity: dec!(12.375),
                unit_cost: dec!(0.89),
            },
            ReceiptItemRequest {
                product_name: "Onions".to_string(),
                quantity: dec!(4.5),
                unit_cost: dec!(1.15),
            },
        ],
    }
    .into_receipt("v-1")
    .unwrap();

    // 12.375 * 0.89 = 11.01375, 4.5 * 1.15 = 5.175 (banker's: 5.18)
    assert_eq!(receipt.items[0].line_total, dec!(11.01));
    assert_eq!(receipt.items[1].line_total, dec!(5.18));
    assert_eq!(receipt.total_amount, dec!(16.19));
    assert_eq!(receipt.items[1].position, 1);
}

#[test]
fn test_invoice_total_is_sum_of_lines() {
    let invoice = CreateInvoiceRequest {
        issued_at: None,
        notes: Some("Monthly account".to_string()),
        items: vec![
            InvoiceItemRequest {
                description: "Rice 10kg".to_string(),
                quantity: dec!(2),
                unit_price: dec!(18.50),
            },
            InvoiceItemRequest {
                description: "Cooking oil".to_string(),
                quantity: dec!(3),
                unit_price: dec!(6.25),
            },
        ],
    }
    .into_invoice("c-1")
    .unwrap();

    assert_eq!(invoice.total_amount, dec!(55.75));
    assert_eq!(invoice.due(), dec!(55.75));
    assert_eq!(invoice.payment_status, PaymentStatus::Pending);
    assert_eq!(invoice.notes.as_deref(), Some("Monthly account"));
}

#[test]
fn test_document_status_follows_amount_paid() {
    let total = dec!(128.40);
    assert_eq!(PaymentStatus::for_document(dec!(0), total), PaymentStatus::Pending);
    assert_eq!(PaymentStatus::for_document(dec!(28.40), total), PaymentStatus::Partial);
    assert_eq!(PaymentStatus::for_document(total, total), PaymentStatus::Paid);
    assert_eq!(money::remaining_due(total, dec!(28.40)), dec!(100.00));
}

#[test]
fn test_new_charge_reopens_settled_payee() {
    assert_eq!(
        PaymentStatus::Paid.for_payee_after_charge(),
        PaymentStatus::Pending
    );
    assert_eq!(
        PaymentStatus::Partial.for_payee_after_charge(),
        PaymentStatus::Partial
    );
}

#[test]
fn test_invoice_beyond_amount_range_is_rejected() {
    let err = CreateInvoiceRequest {
        issued_at: None,
        notes: None,
        items: vec![InvoiceItemRequest {
            description: "Wholesale contract".to_string(),
            quantity: dec!(100000000000000000000),
            unit_price: dec!(100000000000000000000),
        }],
    }
    .into_invoice("c-1")
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = CreateInvoiceRequest {
        issued_at: None,
        notes: None,
        items: vec![
            InvoiceItemRequest {
                description: "Catering order".to_string(),
                quantity: dec!(1),
                unit_price: dec!(9999999999999.99),
            },
            InvoiceItemRequest {
                description: "Delivery".to_string(),
                quantity: dec!(1),
                unit_price: dec!(0.01),
            },
        ],
    }
    .into_invoice("c-1")
    .unwrap_err();
    assert!(err.to_string().contains("Invoice total cannot exceed"));
}
