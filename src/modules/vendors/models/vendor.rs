use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::core::{ContactDetails, PaymentStatus};

/// Supplier the store buys inventory from
///
/// `payable_amount` caches what the store still owes across open receipts.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub payable_amount: Decimal,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /vendors
pub type CreateVendorRequest = ContactDetails;

impl Vendor {
    /// New vendor owing nothing
    pub fn new(details: ContactDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: details.name,
            phone: details.phone,
            email: details.email,
            address: details.address,
            payable_amount: Decimal::ZERO,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
