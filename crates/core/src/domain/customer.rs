use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CustomerId {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidCustomerId(value.to_string()))
    }
}

/// Customer record as seen by callers of the service layer.
///
/// `customer_id` is the hyphenated string form of the stored identifier. It is
/// `None` for a customer that has not been persisted yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
    pub address: String,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address: email_address.into(),
            phone_number: phone_number.into(),
            address: address.into(),
        }
    }

    pub fn with_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Parses the identifier, if any. Blank identifiers count as absent.
    pub fn parsed_id(&self) -> Result<Option<CustomerId>, DomainError> {
        match self.customer_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}
