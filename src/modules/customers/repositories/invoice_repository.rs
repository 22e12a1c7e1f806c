use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, PaymentStatus, Result};
use crate::modules::customers::models::{Invoice, InvoiceItem};

const INVOICE_COLUMNS: &str = "id, customer_id, invoice_number, total_amount, amount_paid, payment_status, issued_at, notes, created_at, updated_at";

pub struct InvoiceRepository {
    pool: MySqlPool,
}

impl InvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Inserts an invoice and its items within an existing transaction
    pub async fn create_with_tx(tx: &mut Transaction<'_, MySql>, invoice: &Invoice) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, customer_id, invoice_number, total_amount, amount_paid,
                payment_status, issued_at, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.customer_id)
        .bind(&invoice.invoice_number)
        .bind(invoice.total_amount)
        .bind(invoice.amount_paid)
        .bind(invoice.payment_status.to_string())
        .bind(invoice.issued_at)
        .bind(&invoice.notes)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create invoice: {}", e)))?;

        for item in &invoice.items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, description, quantity, unit_price, line_total, position
                )
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.invoice_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.line_total)
            .bind(item.position)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create invoice item: {}", e)))?;
        }

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        let sql = format!("SELECT {} FROM invoices WHERE id = ?", INVOICE_COLUMNS);

        let invoice = sqlx::query_as::<_, Invoice>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch invoice: {}", e)))?;

        match invoice {
            Some(mut invoice) => {
                invoice.items = self.find_items(&invoice.id).await?;
                Ok(Some(invoice))
            }
            None => Ok(None),
        }
    }

    /// Invoices of a customer, oldest first, without items
    pub async fn list_for_customer(
        &self,
        customer_id: &str,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<Invoice>> {
        let mut sql = format!(
            "SELECT {} FROM invoices WHERE customer_id = ?",
            INVOICE_COLUMNS
        );
        if status.is_some() {
            sql.push_str(" AND payment_status = ?");
        }
        sql.push_str(" ORDER BY issued_at, seq");

        let mut query = sqlx::query_as::<_, Invoice>(&sql).bind(customer_id);
        if let Some(status) = status {
            query = query.bind(status.to_string());
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to list invoices: {}", e)))
    }

    async fn find_items(&self, invoice_id: &str) -> Result<Vec<InvoiceItem>> {
        sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT id, invoice_id, description, quantity, unit_price, line_total, position
            FROM invoice_items
            WHERE invoice_id = ?
            ORDER BY position
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch invoice items: {}", e)))
    }
}
