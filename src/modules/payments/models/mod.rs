mod open_document;
mod payee;
mod payment_method;
mod payment_record;
mod payment_request;

pub use open_document::OpenDocument;
pub use payee::{BalanceReport, PayeeAccount, PayeeKind};
pub use payment_method::PaymentMethod;
pub use payment_record::{AllocationLine, PaymentOutcome, PaymentRecord};
pub use payment_request::{
    AllocationPolicy, AllocationRequest, CollectCustomerPaymentRequest, PaymentCommand,
    RecordVendorPaymentRequest,
};
