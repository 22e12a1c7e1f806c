use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::customers::{
    models::{CreateCustomerRequest, Customer},
    repositories::CustomerRepository,
};
use crate::modules::payments::{
    models::PayeeKind,
    services::{page, PayeeLedger},
};

pub struct CustomerService {
    repository: CustomerRepository,
}

impl CustomerService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    pub async fn create_customer(&self, request: CreateCustomerRequest) -> Result<Customer> {
        let customer = Customer::new(request.normalized()?);
        self.repository.create(&customer).await?;

        info!(customer_id = customer.id.as_str(), "Customer created");
        Ok(customer)
    }

    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer> {
        self.repository
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer '{}' not found", customer_id)))
    }

    pub async fn list_customers(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Customer>> {
        let (limit, offset) = page(limit, offset)?;
        self.repository.list(limit, offset).await
    }

    /// Removes a settled customer with its invoices and payment history
    pub async fn delete_customer(&self, customer_id: &str) -> Result<()> {
        let mut tx = self
            .repository
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        PayeeLedger::close(&mut tx, PayeeKind::Customer, customer_id).await?;
        CustomerRepository::delete(&mut tx, customer_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        info!(customer_id = customer_id, "Customer deleted");
        Ok(())
    }
}
