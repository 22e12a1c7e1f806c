mod inventory_receipt;
mod vendor;

pub use inventory_receipt::{CreateReceiptRequest, InventoryReceipt, ReceiptItem, ReceiptItemRequest};
pub use vendor::{CreateVendorRequest, Vendor};
