mod billing_service;
mod customer_service;

pub use billing_service::BillingService;
pub use customer_service::CustomerService;
