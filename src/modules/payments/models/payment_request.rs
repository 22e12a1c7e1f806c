// Request bodies for the two payment endpoints and the validated command both
// are normalized into before any storage access.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;

use super::PaymentMethod;
use crate::config::LedgerConfig;
use crate::core::{money, AppError, Result};

/// Caller-directed share of a payment for one receipt or invoice
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    #[serde(alias = "receiptId", alias = "invoiceId")]
    pub document_id: String,
    pub amount: Decimal,
}

/// Body of POST /vendors/{id}/payments
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVendorPaymentRequest {
    pub amount: Decimal,
    pub method: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub allocations: Option<Vec<AllocationRequest>>,
}

/// Body of POST /customers/payments
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectCustomerPaymentRequest {
    pub customer_id: String,
    pub amount: Decimal,
    #[serde(alias = "method")]
    pub payment_method: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub allocations: Option<Vec<AllocationRequest>>,
}

/// How the payment amount is spread over open documents
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationPolicy {
    /// Oldest document first until the amount is used up
    OldestFirst,
    /// Exactly the listed (document, amount) pairs, in order
    Directed(Vec<AllocationRequest>),
}

/// A payment that passed every check not needing storage
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCommand {
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub policy: AllocationPolicy,
}

impl PaymentCommand {
    /// Validates raw request fields into a command
    pub fn parse(
        amount: Decimal,
        method: &str,
        transaction_id: Option<String>,
        notes: Option<String>,
        allocations: Option<Vec<AllocationRequest>>,
        limits: &LedgerConfig,
    ) -> Result<Self> {
        money::validate_positive_amount("Payment amount", amount)?;

        let method: PaymentMethod = method.parse().map_err(AppError::Validation)?;

        let transaction_id = transaction_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        if method.requires_transaction_id() && transaction_id.is_none() {
            return Err(AppError::validation(format!(
                "Transaction ID is required for {} payments",
                method
            )));
        }

        if let Some(ref id) = transaction_id {
            if id.len() > limits.max_transaction_id_length {
                return Err(AppError::validation(format!(
                    "Transaction ID cannot exceed {} characters",
                    limits.max_transaction_id_length
                )));
            }
        }

        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if let Some(ref n) = notes {
            if n.chars().count() > limits.max_notes_length {
                return Err(AppError::validation(format!(
                    "Notes cannot exceed {} characters",
                    limits.max_notes_length
                )));
            }
        }

        let policy = match allocations {
            None => AllocationPolicy::OldestFirst,
            Some(requested) => {
                Self::validate_allocations(&requested, amount)?;
                AllocationPolicy::Directed(requested)
            }
        };

        Ok(Self {
            amount,
            method,
            transaction_id,
            notes,
            policy,
        })
    }

    fn validate_allocations(requested: &[AllocationRequest], amount: Decimal) -> Result<()> {
        if requested.is_empty() {
            return Err(AppError::validation(
                "Allocations, when provided, must list at least one document",
            ));
        }

        let mut seen = HashSet::new();
        for allocation in requested {
            if allocation.document_id.trim().is_empty() {
                return Err(AppError::validation("Allocation document ID cannot be empty"));
            }
            if !seen.insert(allocation.document_id.as_str()) {
                return Err(AppError::validation(format!(
                    "Document '{}' appears more than once in allocations",
                    allocation.document_id
                )));
            }
            money::validate_positive_amount("Allocation amount", allocation.amount)?;
        }

        let allocated = money::checked_total("Allocations", requested.iter().map(|a| a.amount))?;
        if allocated != amount {
            return Err(AppError::validation(format!(
                "Allocations ({}) must add up to the payment amount ({})",
                allocated, amount
            )));
        }

        Ok(())
    }
}

impl RecordVendorPaymentRequest {
    pub fn into_command(self, limits: &LedgerConfig) -> Result<PaymentCommand> {
        PaymentCommand::parse(
            self.amount,
            &self.method,
            self.transaction_id,
            self.notes,
            self.allocations,
            limits,
        )
    }
}

impl CollectCustomerPaymentRequest {
    /// Splits off the customer id and validates the rest
    pub fn into_command(self, limits: &LedgerConfig) -> Result<(String, PaymentCommand)> {
        if self.customer_id.trim().is_empty() {
            return Err(AppError::validation("Customer ID is required"));
        }

        let command = PaymentCommand::parse(
            self.amount,
            &self.payment_method,
            self.transaction_id,
            self.notes,
            self.allocations,
            limits,
        )?;

        Ok((self.customer_id, command))
    }
}
