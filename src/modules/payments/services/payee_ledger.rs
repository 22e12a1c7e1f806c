// Balance postings made outside a payment: a new receipt or invoice raising
// what is owed, and the settled check guarding payee removal. Both run inside
// the caller's transaction with the payee row locked.

use rust_decimal::Decimal;
use sqlx::{MySql, Transaction};
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::payments::{
    models::{PayeeAccount, PayeeKind},
    repositories::{LedgerRepository, PaymentRepository},
    services::PaymentAllocator,
};

pub struct PayeeLedger;

impl PayeeLedger {
    /// Adds a new document's total to the payee's cached balance
    ///
    /// A payee marked paid goes back to pending; other states are kept.
    pub async fn charge(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        payee_id: &str,
        amount: Decimal,
    ) -> Result<PayeeAccount> {
        let payee = LedgerRepository::lock_payee(tx, kind, payee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} '{}' not found", kind.label(), payee_id)))?;

        let balance = payee.balance + amount;
        let status = payee.payment_status.for_payee_after_charge();
        LedgerRepository::update_payee_balance(tx, kind, payee_id, balance, status).await?;

        debug!(
            payee_kind = %kind,
            payee_id = payee_id,
            charged = %amount,
            balance = %balance,
            "Payee charged"
        );

        Ok(PayeeAccount {
            id: payee.id,
            balance,
            payment_status: status,
        })
    }

    /// Locks a payee for removal and drops its payment history
    ///
    /// Fails with Conflict while anything is still owed, by either the cached
    /// balance or the open documents.
    pub async fn close(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        payee_id: &str,
    ) -> Result<()> {
        let payee = LedgerRepository::lock_payee(tx, kind, payee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} '{}' not found", kind.label(), payee_id)))?;

        let documents = LedgerRepository::lock_open_documents(tx, kind, payee_id).await?;
        let outstanding = PaymentAllocator::outstanding(&documents);

        if payee.balance > Decimal::ZERO || outstanding > Decimal::ZERO {
            return Err(AppError::conflict(format!(
                "{} '{}' still has an outstanding balance of {}",
                kind.label(),
                payee_id,
                payee.balance.max(outstanding)
            )));
        }

        let removed = PaymentRepository::delete_for_payee(tx, kind, payee_id).await?;
        debug!(
            payee_kind = %kind,
            payee_id = payee_id,
            payments = removed,
            "Payment history removed"
        );

        Ok(())
    }
}
