mod receipt_repository;
mod vendor_repository;

pub use receipt_repository::ReceiptRepository;
pub use vendor_repository::VendorRepository;
