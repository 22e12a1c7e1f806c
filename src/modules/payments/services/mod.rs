mod balance_service;
mod payee_ledger;
mod payment_allocator;
mod payment_service;

pub use balance_service::BalanceService;
pub use payee_ledger::PayeeLedger;
pub use payment_allocator::PaymentAllocator;
pub use payment_service::{page, PaymentService, DEFAULT_PAGE_SIZE};
