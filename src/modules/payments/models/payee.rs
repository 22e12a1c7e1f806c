use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::PaymentStatus;

/// Which side of the ledger a payment settles
///
/// Vendors are paid for inventory receipts; customers pay their invoices.
/// Both sides share the same tables shape, so storage is addressed through
/// the static names below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayeeKind {
    Vendor,
    Customer,
}

impl PayeeKind {
    /// Human-readable payee name for messages
    pub fn label(&self) -> &'static str {
        match self {
            PayeeKind::Vendor => "Vendor",
            PayeeKind::Customer => "Customer",
        }
    }

    /// Human-readable document name for messages
    pub fn document_label(&self) -> &'static str {
        match self {
            PayeeKind::Vendor => "Receipt",
            PayeeKind::Customer => "Invoice",
        }
    }

    pub(crate) fn payee_table(&self) -> &'static str {
        match self {
            PayeeKind::Vendor => "vendors",
            PayeeKind::Customer => "customers",
        }
    }

    pub(crate) fn balance_column(&self) -> &'static str {
        match self {
            PayeeKind::Vendor => "payable_amount",
            PayeeKind::Customer => "current_due_amount",
        }
    }

    pub(crate) fn document_table(&self) -> &'static str {
        match self {
            PayeeKind::Vendor => "inventory_receipts",
            PayeeKind::Customer => "invoices",
        }
    }

    pub(crate) fn owner_column(&self) -> &'static str {
        match self {
            PayeeKind::Vendor => "vendor_id",
            PayeeKind::Customer => "customer_id",
        }
    }

    pub(crate) fn dated_column(&self) -> &'static str {
        match self {
            PayeeKind::Vendor => "received_at",
            PayeeKind::Customer => "issued_at",
        }
    }
}

impl std::fmt::Display for PayeeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayeeKind::Vendor => write!(f, "vendor"),
            PayeeKind::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for PayeeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "vendor" => Ok(PayeeKind::Vendor),
            "customer" => Ok(PayeeKind::Customer),
            _ => Err(format!("Invalid payee kind: {}", s)),
        }
    }
}

impl TryFrom<String> for PayeeKind {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Cached aggregate of a payee, as read under lock
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayeeAccount {
    pub id: String,
    pub balance: Decimal,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
}

/// Cached aggregate compared with the live sum over open documents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub payee_kind: PayeeKind,
    pub payee_id: String,
    /// Aggregate stored on the payee record
    pub cached_balance: Decimal,
    /// Sum of (total - paid) over open documents
    pub outstanding_balance: Decimal,
    /// cached - outstanding; zero when consistent
    pub drift: Decimal,
    /// Whether the cached balance matches the open documents
    pub consistent: bool,
    pub open_documents: usize,
    pub payment_status: PaymentStatus,
}
