use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::{AppError, PaymentStatus, Result};
use crate::modules::payments::{
    models::{BalanceReport, OpenDocument, PayeeKind},
    repositories::LedgerRepository,
    services::PaymentAllocator,
};

/// Compares and heals cached payee aggregates against their open documents
pub struct BalanceService {
    repository: LedgerRepository,
}

impl BalanceService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repository: LedgerRepository::new(pool),
        }
    }

    /// Read-only comparison of the cached balance with the live sum
    pub async fn balance_report(&self, kind: PayeeKind, payee_id: &str) -> Result<BalanceReport> {
        let payee = self
            .repository
            .find_payee(kind, payee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} '{}' not found", kind.label(), payee_id)))?;

        let documents = self.repository.find_open_documents(kind, payee_id).await?;

        Ok(report(
            kind,
            payee_id,
            payee.balance,
            &documents,
            payee.payment_status,
        ))
    }

    /// Overwrites the cached balance with the live sum under lock
    pub async fn reconcile(&self, kind: PayeeKind, payee_id: &str) -> Result<BalanceReport> {
        let mut tx = self
            .repository
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let payee = LedgerRepository::lock_payee(&mut tx, kind, payee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} '{}' not found", kind.label(), payee_id)))?;

        let documents = LedgerRepository::lock_open_documents(&mut tx, kind, payee_id).await?;
        let outstanding = PaymentAllocator::outstanding(&documents);
        let status = reconciled_status(payee.payment_status, &documents);

        if outstanding != payee.balance || status != payee.payment_status {
            warn!(
                payee_kind = %kind,
                payee_id = payee_id,
                cached = %payee.balance,
                outstanding = %outstanding,
                "Correcting drifted payee balance"
            );
            LedgerRepository::update_payee_balance(&mut tx, kind, payee_id, outstanding, status)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        info!(
            payee_kind = %kind,
            payee_id = payee_id,
            balance = %outstanding,
            "Payee balance reconciled"
        );

        Ok(report(kind, payee_id, outstanding, &documents, status))
    }
}

fn report(
    kind: PayeeKind,
    payee_id: &str,
    cached_balance: Decimal,
    documents: &[OpenDocument],
    payment_status: PaymentStatus,
) -> BalanceReport {
    let outstanding_balance = PaymentAllocator::outstanding(documents);
    let drift = cached_balance - outstanding_balance;

    BalanceReport {
        payee_kind: kind,
        payee_id: payee_id.to_string(),
        cached_balance,
        outstanding_balance,
        drift,
        consistent: drift.is_zero(),
        open_documents: documents.len(),
        payment_status,
    }
}

/// Status a payee should carry given its open documents
///
/// Nothing owed keeps a never-charged payee pending and marks everyone else
/// paid. Something owed is partial once any open document has taken money.
fn reconciled_status(current: PaymentStatus, documents: &[OpenDocument]) -> PaymentStatus {
    let outstanding = PaymentAllocator::outstanding(documents);

    if outstanding.is_zero() {
        return match current {
            PaymentStatus::Pending => PaymentStatus::Pending,
            _ => PaymentStatus::Paid,
        };
    }

    if documents.iter().any(|d| d.amount_paid > Decimal::ZERO) {
        PaymentStatus::Partial
    } else {
        match current {
            PaymentStatus::Paid => PaymentStatus::Pending,
            other => other,
        }
    }
}
