// Records vendor payments and customer collections.
//
// Both sides run the same flow inside one database transaction:
// lock payee -> replay check -> lock open documents -> allocate ->
// write documents -> write payee aggregate -> insert payment -> commit.
// A failure anywhere before commit rolls everything back when `tx` drops.

use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::{AppError, PaymentStatus, Result};
use crate::modules::payments::{
    models::{PayeeKind, PaymentCommand, PaymentOutcome, PaymentRecord},
    repositories::{LedgerRepository, PaymentRepository},
    services::PaymentAllocator,
};

/// Page size for payment history when the caller gives none
pub const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub struct PaymentService {
    pool: MySqlPool,
    payment_repo: PaymentRepository,
}

impl PaymentService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            payment_repo: PaymentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Pays a vendor down, oldest receipt first unless allocations are given
    pub async fn record_vendor_payment(
        &self,
        vendor_id: &str,
        command: PaymentCommand,
    ) -> Result<PaymentOutcome> {
        self.apply_payment(PayeeKind::Vendor, vendor_id, command).await
    }

    /// Collects from a customer, oldest invoice first unless allocations are given
    pub async fn collect_customer_payment(
        &self,
        customer_id: &str,
        command: PaymentCommand,
    ) -> Result<PaymentOutcome> {
        self.apply_payment(PayeeKind::Customer, customer_id, command).await
    }

    async fn apply_payment(
        &self,
        kind: PayeeKind,
        payee_id: &str,
        command: PaymentCommand,
    ) -> Result<PaymentOutcome> {
        info!(
            payee_kind = %kind,
            payee_id = payee_id,
            amount = %command.amount,
            method = %command.method,
            "Applying payment"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let payee = LedgerRepository::lock_payee(&mut tx, kind, payee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} '{}' not found", kind.label(), payee_id)))?;

        // A retried request with the same transaction id returns the first result
        if let Some(ref transaction_id) = command.transaction_id {
            if let Some(existing) =
                PaymentRepository::find_by_transaction_id(&mut tx, kind, payee_id, transaction_id)
                    .await?
            {
                if existing.amount != command.amount {
                    return Err(AppError::conflict(format!(
                        "Transaction ID '{}' was already used for a payment of {}",
                        transaction_id, existing.amount
                    )));
                }

                info!(
                    payment_id = existing.id.as_str(),
                    transaction_id = transaction_id.as_str(),
                    "Payment already recorded (idempotent request)"
                );
                return Ok(PaymentOutcome::Replayed(existing));
            }
        }

        let mut documents = LedgerRepository::lock_open_documents(&mut tx, kind, payee_id).await?;
        let outstanding = PaymentAllocator::outstanding(&documents);

        if outstanding != payee.balance {
            warn!(
                payee_kind = %kind,
                payee_id = payee_id,
                cached = %payee.balance,
                outstanding = %outstanding,
                "Cached balance drifted from open documents, using live sum"
            );
        }

        let lines =
            PaymentAllocator::allocate(kind, &mut documents, command.amount, &command.policy)?;

        for line in &lines {
            if let Some(document) = documents.iter().find(|d| d.id == line.document_id) {
                LedgerRepository::update_document(&mut tx, kind, document).await?;
            }
        }

        let new_balance = PaymentAllocator::outstanding(&documents);
        let new_status = PaymentStatus::for_payee_after_payment(new_balance);
        LedgerRepository::update_payee_balance(&mut tx, kind, payee_id, new_balance, new_status)
            .await?;

        let record = PaymentRecord::new(
            kind,
            payee_id.to_string(),
            command.amount,
            command.method,
            command.transaction_id,
            command.notes,
            lines,
        );

        // Documents must absorb exactly the paid amount
        if record.allocated_total() != record.amount {
            return Err(AppError::internal(format!(
                "Allocated {} does not match payment amount {}",
                record.allocated_total(),
                record.amount
            )));
        }

        PaymentRepository::insert(&mut tx, &record).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        info!(
            payment_id = record.id.as_str(),
            payee_kind = %kind,
            payee_id = payee_id,
            documents = record.allocations.len(),
            balance = %new_balance,
            status = %new_status,
            "Payment recorded"
        );

        Ok(PaymentOutcome::Recorded(record))
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<PaymentRecord> {
        self.payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment '{}' not found", payment_id)))
    }

    /// Payment history of a payee, newest first
    pub async fn list_payments(
        &self,
        kind: PayeeKind,
        payee_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PaymentRecord>> {
        let (limit, offset) = page(limit, offset)?;

        let ledger = LedgerRepository::new(self.pool.clone());
        if ledger.find_payee(kind, payee_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "{} '{}' not found",
                kind.label(),
                payee_id
            )));
        }

        self.payment_repo
            .list_for_payee(kind, payee_id, limit, offset)
            .await
    }
}

/// Validates optional paging parameters
pub fn page(limit: Option<i64>, offset: Option<i64>) -> Result<(i64, i64)> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = offset.unwrap_or(0);

    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(AppError::validation(format!(
            "Limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    if offset < 0 {
        return Err(AppError::validation("Offset cannot be negative"));
    }

    Ok((limit, offset))
}
