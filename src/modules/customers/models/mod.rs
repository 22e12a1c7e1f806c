mod customer;
mod invoice;

pub use customer::{CreateCustomerRequest, Customer};
pub use invoice::{CreateInvoiceRequest, Invoice, InvoiceItem, InvoiceItemRequest};
