mod ledger_repository;
mod payment_repository;

pub use ledger_repository::LedgerRepository;
pub use payment_repository::PaymentRepository;
