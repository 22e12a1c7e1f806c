mod customer_repository;
mod invoice_repository;

pub use customer_repository::CustomerRepository;
pub use invoice_repository::InvoiceRepository;
