use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Settlement state shared by payees (vendors, customers) and their documents
/// (inventory receipts, invoices)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Nothing paid yet
    Pending,
    /// Some amount paid, balance remaining
    Partial,
    /// Fully settled
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl PaymentStatus {
    /// Derives a document's status from what has been paid against its total
    ///
    /// `paid` iff amount_paid >= total, `partial` iff 0 < amount_paid < total,
    /// `pending` otherwise.
    pub fn for_document(amount_paid: Decimal, total_amount: Decimal) -> Self {
        if amount_paid >= total_amount {
            PaymentStatus::Paid
        } else if amount_paid > Decimal::ZERO {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }

    /// Status of a payee right after a payment was applied
    pub fn for_payee_after_payment(outstanding: Decimal) -> Self {
        if outstanding <= Decimal::ZERO {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }

    /// Status of a payee after a new receipt or invoice added to its balance
    pub fn for_payee_after_charge(self) -> Self {
        match self {
            PaymentStatus::Paid => PaymentStatus::Pending,
            other => other,
        }
    }

    /// Parses an optional `?status=` filter
    pub fn parse_filter(value: Option<&str>) -> Result<Option<Self>> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v.parse().map(Some).map_err(AppError::Validation),
            None => Ok(None),
        }
    }

    /// Whether a document in this state still accepts payments
    pub fn is_open(&self) -> bool {
        !matches!(self, PaymentStatus::Paid)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Partial => write!(f, "partial"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "partial" => Ok(PaymentStatus::Partial),
            "paid" => Ok(PaymentStatus::Paid),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}
