use serde::{Deserialize, Serialize};

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    /// UPI, wallets and other app-based transfers
    Digital,
    Cheque,
}

impl PaymentMethod {
    /// Methods that must carry an external reference (bank ref, UPI id, cheque number)
    pub fn requires_transaction_id(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
            PaymentMethod::Digital => write!(f, "digital"),
            PaymentMethod::Cheque => write!(f, "cheque"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "digital" => Ok(PaymentMethod::Digital),
            "cheque" => Ok(PaymentMethod::Cheque),
            _ => Err(format!(
                "Invalid payment method '{}': expected one of cash, bank_transfer, digital, cheque",
                s
            )),
        }
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}
