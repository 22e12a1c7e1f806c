// Inventory receipts: goods received from a vendor, each adding its total
// to what the store owes that vendor.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{money, AppError, PaymentStatus, Result};

const MAX_REFERENCE_LENGTH: usize = 100;
const MAX_PRODUCT_NAME_LENGTH: usize = 255;

/// One received product line
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub id: String,
    pub receipt_id: String,
    pub product_name: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub line_total: Decimal,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReceipt {
    pub id: String,
    pub vendor_id: String,
    pub reference: Option<String>,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    pub received_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub items: Vec<ReceiptItem>,
}

impl InventoryReceipt {
    /// Amount still owed on this receipt
    pub fn due(&self) -> Decimal {
        money::remaining_due(self.total_amount, self.amount_paid)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItemRequest {
    pub product_name: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

/// Body of POST /vendors/{id}/receipts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptRequest {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<ReceiptItemRequest>,
}

impl CreateReceiptRequest {
    /// Validates the request and prices every line
    ///
    /// `received_at` defaults to now. The receipt total is the sum of the
    /// rounded line totals and must be positive.
    pub fn into_receipt(self, vendor_id: &str) -> Result<InventoryReceipt> {
        if self.items.is_empty() {
            return Err(AppError::validation(
                "Receipt must have at least one item",
            ));
        }

        let reference = self
            .reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if let Some(ref r) = reference {
            if r.len() > MAX_REFERENCE_LENGTH {
                return Err(AppError::validation(format!(
                    "Reference cannot exceed {} characters",
                    MAX_REFERENCE_LENGTH
                )));
            }
        }

        let receipt_id = Uuid::new_v4().to_string();
        let mut items = Vec::with_capacity(self.items.len());

        for (idx, item) in self.items.into_iter().enumerate() {
            let product_name = item.product_name.trim().to_string();
            if product_name.is_empty() {
                return Err(AppError::validation(format!(
                    "Item {} product name cannot be empty",
                    idx
                )));
            }
            if product_name.chars().count() > MAX_PRODUCT_NAME_LENGTH {
                return Err(AppError::validation(format!(
                    "Item {} product name cannot exceed {} characters",
                    idx, MAX_PRODUCT_NAME_LENGTH
                )));
            }
            money::validate_quantity(item.quantity)?;
            money::validate_non_negative_amount("Unit cost", item.unit_cost)?;

            items.push(ReceiptItem {
                id: Uuid::new_v4().to_string(),
                receipt_id: receipt_id.clone(),
                product_name,
                quantity: item.quantity,
                unit_cost: item.unit_cost,
                line_total: money::line_total(item.quantity, item.unit_cost)?,
                position: idx as i32,
            });
        }

        let total_amount =
            money::checked_total("Receipt total", items.iter().map(|i| i.line_total))?;
        if total_amount <= Decimal::ZERO {
            return Err(AppError::validation("Receipt total must be positive"));
        }

        let now = Utc::now();
        Ok(InventoryReceipt {
            id: receipt_id,
            vendor_id: vendor_id.to_string(),
            reference,
            total_amount,
            amount_paid: Decimal::ZERO,
            payment_status: PaymentStatus::Pending,
            received_at: self.received_at.unwrap_or(now),
            notes: self
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            created_at: now,
            updated_at: now,
            items,
        })
    }
}
