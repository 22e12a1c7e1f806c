use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{money, AppError, PaymentStatus, Result};

const MAX_DESCRIPTION_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub position: i32,
}

/// A customer bill; `amount_paid` grows as collections are allocated to it
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub invoice_number: String,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    pub issued_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    pub fn due(&self) -> Decimal {
        money::remaining_due(self.total_amount, self.amount_paid)
    }

    /// `INV-YYYYMMDD-XXXXXXXX`: issue date plus eight hex digits of the id
    pub fn generate_number(id: &Uuid, issued_at: DateTime<Utc>) -> String {
        let suffix = id.simple().to_string()[..8].to_uppercase();
        format!("INV-{}-{}", issued_at.format("%Y%m%d"), suffix)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemRequest {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Body of POST /customers/{id}/invoices
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<InvoiceItemRequest>,
}

impl CreateInvoiceRequest {
    pub fn into_invoice(self, customer_id: &str) -> Result<Invoice> {
        if self.items.is_empty() {
            return Err(AppError::validation(
                "Invoice must have at least one item",
            ));
        }

        let id = Uuid::new_v4();
        let invoice_id = id.to_string();
        let mut items = Vec::with_capacity(self.items.len());

        for (idx, item) in self.items.into_iter().enumerate() {
            let description = item.description.trim().to_string();
            if description.is_empty() {
                return Err(AppError::validation(format!(
                    "Item {} description cannot be empty",
                    idx
                )));
            }
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(AppError::validation(format!(
                    "Item {} description cannot exceed {} characters",
                    idx, MAX_DESCRIPTION_LENGTH
                )));
            }
            money::validate_quantity(item.quantity)?;
            money::validate_non_negative_amount("Unit price", item.unit_price)?;

            items.push(InvoiceItem {
                id: Uuid::new_v4().to_string(),
                invoice_id: invoice_id.clone(),
                description,
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: money::line_total(item.quantity, item.unit_price)?,
                position: idx as i32,
            });
        }

        let total_amount =
            money::checked_total("Invoice total", items.iter().map(|i| i.line_total))?;
        if total_amount <= Decimal::ZERO {
            return Err(AppError::validation("Invoice total must be positive"));
        }

        let now = Utc::now();
        let issued_at = self.issued_at.unwrap_or(now);

        Ok(Invoice {
            id: invoice_id,
            customer_id: customer_id.to_string(),
            invoice_number: Invoice::generate_number(&id, issued_at),
            total_amount,
            amount_paid: Decimal::ZERO,
            payment_status: PaymentStatus::Pending,
            issued_at,
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
