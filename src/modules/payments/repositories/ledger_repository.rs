use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, PaymentStatus, Result};
use crate::modules::payments::models::{OpenDocument, PayeeAccount, PayeeKind};

/// Storage access for the balance side of the ledger: payee aggregates and
/// the open receipts or invoices behind them
///
/// Table and column names come from `PayeeKind` and are static, never user
/// input, so formatting them into the SQL text is safe.
pub struct LedgerRepository {
    pool: MySqlPool,
}

impl LedgerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Reads a payee's cached aggregate and locks the row until commit
    pub async fn lock_payee(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        payee_id: &str,
    ) -> Result<Option<PayeeAccount>> {
        let sql = format!(
            "SELECT id, {balance} AS balance, payment_status FROM {table} WHERE id = ? FOR UPDATE",
            balance = kind.balance_column(),
            table = kind.payee_table(),
        );

        sqlx::query_as::<_, PayeeAccount>(&sql)
            .bind(payee_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| {
                AppError::Internal(format!("Failed to lock {}: {}", kind.label().to_lowercase(), e))
            })
    }

    /// Loads a payee's open documents oldest first and locks them until commit
    pub async fn lock_open_documents(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        payee_id: &str,
    ) -> Result<Vec<OpenDocument>> {
        let sql = Self::open_documents_sql(kind, true);

        sqlx::query_as::<_, OpenDocument>(&sql)
            .bind(payee_id)
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to load open documents: {}", e)))
    }

    /// Writes back the paid amount and status of one document
    pub async fn update_document(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        document: &OpenDocument,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {table} SET amount_paid = ?, payment_status = ?, updated_at = NOW(6) WHERE id = ?",
            table = kind.document_table(),
        );

        let result = sqlx::query(&sql)
            .bind(document.amount_paid)
            .bind(document.payment_status.to_string())
            .bind(&document.id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update document: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::internal(format!(
                "{} '{}' disappeared while locked",
                kind.document_label(),
                document.id
            )));
        }

        Ok(())
    }

    /// Overwrites a payee's cached aggregate and status
    pub async fn update_payee_balance(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        payee_id: &str,
        balance: Decimal,
        status: PaymentStatus,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {table} SET {balance} = ?, payment_status = ?, updated_at = NOW(6) WHERE id = ?",
            table = kind.payee_table(),
            balance = kind.balance_column(),
        );

        sqlx::query(&sql)
            .bind(balance)
            .bind(status.to_string())
            .bind(payee_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update payee balance: {}", e)))?;

        Ok(())
    }

    /// Unlocked read of a payee's cached aggregate
    pub async fn find_payee(&self, kind: PayeeKind, payee_id: &str) -> Result<Option<PayeeAccount>> {
        let sql = format!(
            "SELECT id, {balance} AS balance, payment_status FROM {table} WHERE id = ?",
            balance = kind.balance_column(),
            table = kind.payee_table(),
        );

        sqlx::query_as::<_, PayeeAccount>(&sql)
            .bind(payee_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch payee: {}", e)))
    }

    /// Unlocked read of a payee's open documents, oldest first
    pub async fn find_open_documents(
        &self,
        kind: PayeeKind,
        payee_id: &str,
    ) -> Result<Vec<OpenDocument>> {
        let sql = Self::open_documents_sql(kind, false);

        sqlx::query_as::<_, OpenDocument>(&sql)
            .bind(payee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to load open documents: {}", e)))
    }

    fn open_documents_sql(kind: PayeeKind, for_update: bool) -> String {
        format!(
            r#"
            SELECT id, seq, total_amount, amount_paid, payment_status, {dated} AS dated_at
            FROM {table}
            WHERE {owner} = ? AND payment_status IN ('pending', 'partial')
            ORDER BY {dated} ASC, seq ASC
            {lock}
            "#,
            dated = kind.dated_column(),
            table = kind.document_table(),
            owner = kind.owner_column(),
            lock = if for_update { "FOR UPDATE" } else { "" },
        )
    }
}
