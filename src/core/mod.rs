pub mod contact;
pub mod error;
pub mod money;
pub mod payment_status;
pub mod response;

pub use contact::ContactDetails;
pub use error::{AppError, Result};
pub use payment_status::PaymentStatus;
pub use response::ApiResponse;
