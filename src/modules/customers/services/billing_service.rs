use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, PaymentStatus, Result};
use crate::modules::customers::{
    models::{CreateInvoiceRequest, Invoice},
    repositories::{CustomerRepository, InvoiceRepository},
};
use crate::modules::payments::{models::PayeeKind, services::PayeeLedger};

/// Billing: issues invoices and raises the customer's current due
pub struct BillingService {
    pool: MySqlPool,
    repository: InvoiceRepository,
}

impl BillingService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create_invoice(
        &self,
        customer_id: &str,
        request: CreateInvoiceRequest,
    ) -> Result<Invoice> {
        let invoice = request.into_invoice(customer_id)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let customer =
            PayeeLedger::charge(&mut tx, PayeeKind::Customer, customer_id, invoice.total_amount)
                .await?;
        InvoiceRepository::create_with_tx(&mut tx, &invoice).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        info!(
            invoice_id = invoice.id.as_str(),
            invoice_number = invoice.invoice_number.as_str(),
            customer_id = customer_id,
            total = %invoice.total_amount,
            current_due = %customer.balance,
            "Invoice issued"
        );

        Ok(invoice)
    }

    pub async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice> {
        self.repository
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Invoice '{}' not found", invoice_id)))
    }

    pub async fn list_invoices(
        &self,
        customer_id: &str,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<Invoice>> {
        let customers = CustomerRepository::new(self.pool.clone());
        if customers.find_by_id(customer_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Customer '{}' not found",
                customer_id
            )));
        }

        self.repository.list_for_customer(customer_id, status).await
    }
}
