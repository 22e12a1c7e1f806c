use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, PaymentStatus, Result};
use crate::modules::vendors::models::{InventoryReceipt, ReceiptItem};

const RECEIPT_COLUMNS: &str = "id, vendor_id, reference, total_amount, amount_paid, payment_status, received_at, notes, created_at, updated_at";

pub struct ReceiptRepository {
    pool: MySqlPool,
}

impl ReceiptRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Inserts a receipt and its items within an existing transaction
    pub async fn create_with_tx(
        tx: &mut Transaction<'_, MySql>,
        receipt: &InventoryReceipt,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory_receipts (
                id, vendor_id, reference, total_amount, amount_paid,
                payment_status, received_at, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&receipt.id)
        .bind(&receipt.vendor_id)
        .bind(&receipt.reference)
        .bind(receipt.total_amount)
        .bind(receipt.amount_paid)
        .bind(receipt.payment_status.to_string())
        .bind(receipt.received_at)
        .bind(&receipt.notes)
        .bind(receipt.created_at)
        .bind(receipt.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create receipt: {}", e)))?;

        for item in &receipt.items {
            sqlx::query(
                r#"
                INSERT INTO receipt_items (
                    id, receipt_id, product_name, quantity, unit_cost, line_total, position
                )
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.receipt_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_cost)
            .bind(item.line_total)
            .bind(item.position)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create receipt item: {}", e)))?;
        }

        Ok(())
    }

    /// Receipt with its items
    pub async fn find_by_id(&self, id: &str) -> Result<Option<InventoryReceipt>> {
        let sql = format!(
            "SELECT {} FROM inventory_receipts WHERE id = ?",
            RECEIPT_COLUMNS
        );

        let receipt = sqlx::query_as::<_, InventoryReceipt>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch receipt: {}", e)))?;

        match receipt {
            Some(mut receipt) => {
                receipt.items = self.find_items(&receipt.id).await?;
                Ok(Some(receipt))
            }
            None => Ok(None),
        }
    }

    /// Receipts of a vendor, oldest first, without items
    pub async fn list_for_vendor(
        &self,
        vendor_id: &str,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<InventoryReceipt>> {
        let mut sql = format!(
            "SELECT {} FROM inventory_receipts WHERE vendor_id = ?",
            RECEIPT_COLUMNS
        );
        if status.is_some() {
            sql.push_str(" AND payment_status = ?");
        }
        sql.push_str(" ORDER BY received_at, seq");

        let mut query = sqlx::query_as::<_, InventoryReceipt>(&sql).bind(vendor_id);
        if let Some(status) = status {
            query = query.bind(status.to_string());
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to list receipts: {}", e)))
    }

    async fn find_items(&self, receipt_id: &str) -> Result<Vec<ReceiptItem>> {
        sqlx::query_as::<_, ReceiptItem>(
            r#"
            SELECT id, receipt_id, product_name, quantity, unit_cost, line_total, position
            FROM receipt_items
            WHERE receipt_id = ?
            ORDER BY position
            "#,
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch receipt items: {}", e)))
    }
}
