//! StoreLedger: payables and receivables for a grocery store
//!
//! Vendors are paid for inventory receipts and customers pay their invoices.
//! Every payment is spread over open documents oldest first (or as directed)
//! inside one database transaction.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

pub use modules::{customers, payments, vendors};
