mod receipt_service;
mod vendor_service;

pub use receipt_service::ReceiptService;
pub use vendor_service::VendorService;
