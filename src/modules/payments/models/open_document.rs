use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::{money, PaymentStatus};

/// A receipt or invoice that can still take payments, as loaded for allocation
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OpenDocument {
    pub id: String,
    /// Creation sequence, breaks ties between documents with the same date
    pub seq: i64,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    /// Received date for receipts, issue date for invoices
    pub dated_at: DateTime<Utc>,
}

impl OpenDocument {
    pub fn new(
        id: impl Into<String>,
        seq: i64,
        total_amount: Decimal,
        amount_paid: Decimal,
        dated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            seq,
            total_amount,
            amount_paid,
            payment_status: PaymentStatus::for_document(amount_paid, total_amount),
            dated_at,
        }
    }

    /// Amount still owed on this document
    pub fn due(&self) -> Decimal {
        money::remaining_due(self.total_amount, self.amount_paid)
    }

    /// Applies up to `amount` and returns what was actually applied
    ///
    /// Never pushes `amount_paid` past `total_amount`.
    pub fn apply(&mut self, amount: Decimal) -> Decimal {
        let applied = amount.min(self.due()).max(Decimal::ZERO);
        if applied > Decimal::ZERO {
            self.amount_paid += applied;
            self.payment_status = PaymentStatus::for_document(self.amount_paid, self.total_amount);
        }
        applied
    }
}
