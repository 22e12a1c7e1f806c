use serde::Deserialize;

use crate::core::{AppError, Result};

const MAX_NAME_LENGTH: usize = 200;
const MAX_PHONE_LENGTH: usize = 32;
const MAX_EMAIL_LENGTH: usize = 254;

/// Name and contact fields shared by vendors and customers
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ContactDetails {
    /// Trims every field, drops blank optionals, and checks lengths
    pub fn normalized(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "Name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }

        let phone = blank_to_none(self.phone);
        if let Some(ref p) = phone {
            if p.len() > MAX_PHONE_LENGTH {
                return Err(AppError::validation(format!(
                    "Phone cannot exceed {} characters",
                    MAX_PHONE_LENGTH
                )));
            }
        }

        let email = blank_to_none(self.email);
        if let Some(ref e) = email {
            if e.len() > MAX_EMAIL_LENGTH || !e.contains('@') {
                return Err(AppError::validation(format!("Invalid email address: {}", e)));
            }
        }

        Ok(Self {
            name,
            phone,
            email,
            address: blank_to_none(self.address),
        })
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
