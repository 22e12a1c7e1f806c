use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, PaymentStatus, Result};
use crate::modules::payments::{models::PayeeKind, services::PayeeLedger};
use crate::modules::vendors::{
    models::{CreateReceiptRequest, InventoryReceipt},
    repositories::{ReceiptRepository, VendorRepository},
};

/// Receiving: records goods from a vendor and raises the vendor's payable
pub struct ReceiptService {
    pool: MySqlPool,
    repository: ReceiptRepository,
}

impl ReceiptService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repository: ReceiptRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create_receipt(
        &self,
        vendor_id: &str,
        request: CreateReceiptRequest,
    ) -> Result<InventoryReceipt> {
        let receipt = request.into_receipt(vendor_id)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        // Locks the vendor first so concurrent payments see the new receipt
        let vendor = PayeeLedger::charge(&mut tx, PayeeKind::Vendor, vendor_id, receipt.total_amount)
            .await?;
        ReceiptRepository::create_with_tx(&mut tx, &receipt).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        info!(
            receipt_id = receipt.id.as_str(),
            vendor_id = vendor_id,
            total = %receipt.total_amount,
            payable = %vendor.balance,
            "Inventory receipt recorded"
        );

        Ok(receipt)
    }

    pub async fn get_receipt(&self, receipt_id: &str) -> Result<InventoryReceipt> {
        self.repository
            .find_by_id(receipt_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Receipt '{}' not found", receipt_id)))
    }

    pub async fn list_receipts(
        &self,
        vendor_id: &str,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<InventoryReceipt>> {
        let vendors = VendorRepository::new(self.pool.clone());
        if vendors.find_by_id(vendor_id).await?.is_none() {
            return Err(AppError::not_found(format!("Vendor '{}' not found", vendor_id)));
        }

        self.repository.list_for_vendor(vendor_id, status).await
    }
}
