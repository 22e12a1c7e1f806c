use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::payments::{
    models::PayeeKind,
    services::{page, PayeeLedger},
};
use crate::modules::vendors::{
    models::{CreateVendorRequest, Vendor},
    repositories::VendorRepository,
};

pub struct VendorService {
    repository: VendorRepository,
}

impl VendorService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repository: VendorRepository::new(pool),
        }
    }

    pub async fn create_vendor(&self, request: CreateVendorRequest) -> Result<Vendor> {
        let vendor = Vendor::new(request.normalized()?);
        self.repository.create(&vendor).await?;

        info!(vendor_id = vendor.id.as_str(), name = vendor.name.as_str(), "Vendor created");
        Ok(vendor)
    }

    pub async fn get_vendor(&self, vendor_id: &str) -> Result<Vendor> {
        self.repository
            .find_by_id(vendor_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Vendor '{}' not found", vendor_id)))
    }

    pub async fn list_vendors(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<Vendor>> {
        let (limit, offset) = page(limit, offset)?;
        self.repository.list(limit, offset).await
    }

    /// Removes a settled vendor with its receipts and payment history
    pub async fn delete_vendor(&self, vendor_id: &str) -> Result<()> {
        let mut tx = self
            .repository
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        PayeeLedger::close(&mut tx, PayeeKind::Vendor, vendor_id).await?;
        VendorRepository::delete(&mut tx, vendor_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        info!(vendor_id = vendor_id, "Vendor deleted");
        Ok(())
    }
}
