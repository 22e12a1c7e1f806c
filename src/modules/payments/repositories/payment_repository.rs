use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};
use std::collections::HashMap;

use crate::core::{AppError, Result};
use crate::modules::payments::models::{AllocationLine, PayeeKind, PaymentMethod, PaymentRecord};

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: String,
    #[sqlx(try_from = "String")]
    payee_kind: PayeeKind,
    payee_id: String,
    amount: Decimal,
    #[sqlx(try_from = "String")]
    method: PaymentMethod,
    transaction_id: Option<String>,
    notes: Option<String>,
    paid_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_record(self, allocations: Vec<AllocationLine>) -> PaymentRecord {
        PaymentRecord {
            id: self.id,
            payee_kind: self.payee_kind,
            payee_id: self.payee_id,
            amount: self.amount,
            method: self.method,
            transaction_id: self.transaction_id,
            notes: self.notes,
            paid_at: self.paid_at,
            allocations,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AllocationRow {
    payment_id: String,
    document_id: String,
    amount_applied: Decimal,
}

const PAYMENT_COLUMNS: &str =
    "id, payee_kind, payee_id, amount, method, transaction_id, notes, paid_at";

/// Persistence for payment records and their allocation breakdown
///
/// Records are insert-only; the only delete is the cascade when a payee goes.
pub struct PaymentRepository {
    pool: MySqlPool,
}

impl PaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Inserts a payment and its breakdown inside the caller's transaction
    pub async fn insert(tx: &mut Transaction<'_, MySql>, record: &PaymentRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, payee_kind, payee_id, amount, method,
                transaction_id, notes, paid_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(record.payee_kind.to_string())
        .bind(&record.payee_id)
        .bind(record.amount)
        .bind(record.method.to_string())
        .bind(&record.transaction_id)
        .bind(&record.notes)
        .bind(record.paid_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to record payment: {}", e)))?;

        for (position, line) in record.allocations.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO payment_allocations (payment_id, position, document_id, amount_applied)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(position as i32)
            .bind(&line.document_id)
            .bind(line.amount_applied)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to record allocation: {}", e)))?;
        }

        Ok(())
    }

    /// Earlier payment carrying the same transaction id for this payee, if any
    pub async fn find_by_transaction_id(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        payee_id: &str,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>> {
        let sql = format!(
            "SELECT {} FROM payments WHERE payee_kind = ? AND payee_id = ? AND transaction_id = ?",
            PAYMENT_COLUMNS
        );

        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(kind.to_string())
            .bind(payee_id)
            .bind(transaction_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to look up payment: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let allocations = sqlx::query_as::<_, AllocationRow>(
            r#"
            SELECT payment_id, document_id, amount_applied
            FROM payment_allocations
            WHERE payment_id = ?
            ORDER BY position
            "#,
        )
        .bind(&row.id)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to load allocations: {}", e)))?;

        Ok(Some(row.into_record(Self::lines(allocations))))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<PaymentRecord>> {
        let sql = format!("SELECT {} FROM payments WHERE id = ?", PAYMENT_COLUMNS);

        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch payment: {}", e)))?;

        match row {
            Some(row) => {
                let mut grouped = self.allocations_for(&[row.id.clone()]).await?;
                let lines = grouped.remove(&row.id).unwrap_or_default();
                Ok(Some(row.into_record(lines)))
            }
            None => Ok(None),
        }
    }

    /// Payment history of one payee, newest first
    pub async fn list_for_payee(
        &self,
        kind: PayeeKind,
        payee_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PaymentRecord>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM payments
            WHERE payee_kind = ? AND payee_id = ?
            ORDER BY paid_at DESC, id
            LIMIT ? OFFSET ?
            "#,
            PAYMENT_COLUMNS
        );

        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(kind.to_string())
            .bind(payee_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to list payments: {}", e)))?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut grouped = self.allocations_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let lines = grouped.remove(&row.id).unwrap_or_default();
                row.into_record(lines)
            })
            .collect())
    }

    /// Removes every payment of a payee; allocations go with them
    pub async fn delete_for_payee(
        tx: &mut Transaction<'_, MySql>,
        kind: PayeeKind,
        payee_id: &str,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM payments WHERE payee_kind = ? AND payee_id = ?")
            .bind(kind.to_string())
            .bind(payee_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete payments: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn allocations_for(&self, payment_ids: &[String]) -> Result<HashMap<String, Vec<AllocationLine>>> {
        if payment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; payment_ids.len()].join(", ");
        let sql = format!(
            r#"
            SELECT payment_id, document_id, amount_applied
            FROM payment_allocations
            WHERE payment_id IN ({})
            ORDER BY payment_id, position
            "#,
            placeholders
        );

        let mut query = sqlx::query_as::<_, AllocationRow>(&sql);
        for id in payment_ids {
            query = query.bind(id);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to load allocations: {}", e)))?;

        let mut grouped: HashMap<String, Vec<AllocationLine>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.payment_id)
                .or_default()
                .push(AllocationLine::new(row.document_id, row.amount_applied));
        }

        Ok(grouped)
    }

    fn lines(rows: Vec<AllocationRow>) -> Vec<AllocationLine> {
        rows.into_iter()
            .map(|row| AllocationLine::new(row.document_id, row.amount_applied))
            .collect()
    }
}
