// Payment record: one immutable row per successful payment call, plus the
// ordered breakdown of how the amount was spread over receipts or invoices.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayeeKind, PaymentMethod};

/// One (document, amount applied) pair of a payment's breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationLine {
    pub document_id: String,
    pub amount_applied: Decimal,
}

impl AllocationLine {
    pub fn new(document_id: impl Into<String>, amount_applied: Decimal) -> Self {
        Self {
            document_id: document_id.into(),
            amount_applied,
        }
    }
}

/// Immutable record of one payment transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub payee_kind: PayeeKind,
    pub payee_id: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Server timestamp, microsecond precision like the stored column
    pub paid_at: DateTime<Utc>,
    pub allocations: Vec<AllocationLine>,
}

impl PaymentRecord {
    pub fn new(
        payee_kind: PayeeKind,
        payee_id: String,
        amount: Decimal,
        method: PaymentMethod,
        transaction_id: Option<String>,
        notes: Option<String>,
        allocations: Vec<AllocationLine>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            payee_kind,
            payee_id,
            amount,
            method,
            transaction_id,
            notes,
            paid_at: Utc::now().trunc_subsecs(6),
            allocations,
        }
    }

    /// Sum of the breakdown; equals `amount` for every recorded payment
    pub fn allocated_total(&self) -> Decimal {
        self.allocations.iter().map(|line| line.amount_applied).sum()
    }
}

/// What a payment call did
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Written by this call
    Recorded(PaymentRecord),
    /// Transaction id seen before; the earlier record, nothing written
    Replayed(PaymentRecord),
}
