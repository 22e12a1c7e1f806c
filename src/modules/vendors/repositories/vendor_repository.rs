use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::vendors::models::Vendor;

const VENDOR_COLUMNS: &str = "id, name, phone, email, address, payable_amount, payment_status, created_at, updated_at";

pub struct VendorRepository {
    pool: MySqlPool,
}

impl VendorRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub async fn create(&self, vendor: &Vendor) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vendors (
                id, name, phone, email, address,
                payable_amount, payment_status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vendor.id)
        .bind(&vendor.name)
        .bind(&vendor.phone)
        .bind(&vendor.email)
        .bind(&vendor.address)
        .bind(vendor.payable_amount)
        .bind(vendor.payment_status.to_string())
        .bind(vendor.created_at)
        .bind(vendor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create vendor: {}", e)))?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Vendor>> {
        let sql = format!("SELECT {} FROM vendors WHERE id = ?", VENDOR_COLUMNS);

        sqlx::query_as::<_, Vendor>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch vendor: {}", e)))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Vendor>> {
        let sql = format!(
            "SELECT {} FROM vendors ORDER BY name, id LIMIT ? OFFSET ?",
            VENDOR_COLUMNS
        );

        sqlx::query_as::<_, Vendor>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to list vendors: {}", e)))
    }

    /// Deletes the vendor row; receipts and their items cascade
    pub async fn delete(tx: &mut Transaction<'_, MySql>, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM vendors WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete vendor: {}", e)))?;

        Ok(())
    }
}
