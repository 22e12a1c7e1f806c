use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::core::{money, AppError, Result};
use crate::modules::payments::models::{
    AllocationLine, AllocationPolicy, AllocationRequest, OpenDocument, PayeeKind,
};

/// Spreads one payment over a payee's open receipts or invoices
///
/// Pure: works on documents already loaded (and locked) by the caller and
/// mutates them in place. Every path guarantees:
/// - no document is paid past its total
/// - the breakdown sums to exactly the payment amount
/// - a payment larger than the outstanding balance is rejected before any
///   document is touched
pub struct PaymentAllocator;

impl PaymentAllocator {
    /// Live payable: sum of remaining dues over the given documents
    pub fn outstanding(documents: &[OpenDocument]) -> Decimal {
        documents.iter().map(OpenDocument::due).sum()
    }

    /// Orders documents oldest first; same-date documents keep creation order
    pub fn sort_oldest_first(documents: &mut [OpenDocument]) {
        documents.sort_by(|a, b| a.dated_at.cmp(&b.dated_at).then(a.seq.cmp(&b.seq)));
    }

    /// Applies `amount` according to `policy`
    pub fn allocate(
        kind: PayeeKind,
        documents: &mut [OpenDocument],
        amount: Decimal,
        policy: &AllocationPolicy,
    ) -> Result<Vec<AllocationLine>> {
        if amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }

        let outstanding = Self::outstanding(documents);
        if amount > outstanding {
            return Err(AppError::validation(format!(
                "Payment of {} exceeds payable amount {}",
                amount, outstanding
            )));
        }

        match policy {
            AllocationPolicy::OldestFirst => Self::allocate_oldest_first(documents, amount),
            AllocationPolicy::Directed(requested) => {
                Self::allocate_directed(kind, documents, requested, amount)
            }
        }
    }

    /// Greedy walk over documents in date order
    pub fn allocate_oldest_first(
        documents: &mut [OpenDocument],
        amount: Decimal,
    ) -> Result<Vec<AllocationLine>> {
        Self::sort_oldest_first(documents);

        let mut remaining = amount;
        let mut lines = Vec::new();

        for document in documents.iter_mut() {
            if remaining <= Decimal::ZERO {
                break;
            }
            if !document.payment_status.is_open() {
                continue;
            }

            let applied = document.apply(remaining);
            if applied > Decimal::ZERO {
                debug!(
                    document_id = document.id.as_str(),
                    applied = %applied,
                    due_after = %document.due(),
                    "Applied payment to document"
                );
                lines.push(AllocationLine::new(document.id.clone(), applied));
                remaining -= applied;
            }
        }

        // Callers check the outstanding balance first, so this only trips on
        // documents that changed between the check and the walk
        if remaining > Decimal::ZERO {
            return Err(AppError::internal(format!(
                "Payment left {} unallocated after exhausting open documents",
                remaining
            )));
        }

        Ok(lines)
    }

    /// Applies caller-chosen amounts to caller-chosen documents, in request order
    ///
    /// All targets are checked before any is modified.
    pub fn allocate_directed(
        kind: PayeeKind,
        documents: &mut [OpenDocument],
        requested: &[AllocationRequest],
        amount: Decimal,
    ) -> Result<Vec<AllocationLine>> {
        let requested_total =
            money::checked_total("Allocations", requested.iter().map(|r| r.amount))?;
        if requested_total != amount {
            return Err(AppError::validation(format!(
                "Allocations ({}) must add up to the payment amount ({})",
                requested_total, amount
            )));
        }

        let index: HashMap<&str, usize> = documents
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.as_str(), i))
            .collect();

        let mut targets = Vec::with_capacity(requested.len());
        for allocation in requested {
            let position = *index.get(allocation.document_id.as_str()).ok_or_else(|| {
                AppError::not_found(format!(
                    "{} '{}' is not an open {} of this {}",
                    kind.document_label(),
                    allocation.document_id,
                    kind.document_label().to_lowercase(),
                    kind.label().to_lowercase()
                ))
            })?;

            let due = documents[position].due();
            if allocation.amount > due {
                return Err(AppError::validation(format!(
                    "Allocation of {} to {} '{}' exceeds its remaining due {}",
                    allocation.amount,
                    kind.document_label().to_lowercase(),
                    allocation.document_id,
                    due
                )));
            }

            targets.push((position, allocation.amount));
        }

        let lines = targets
            .into_iter()
            .map(|(position, share)| {
                let document = &mut documents[position];
                let applied = document.apply(share);
                AllocationLine::new(document.id.clone(), applied)
            })
            .collect();

        Ok(lines)
    }
}
