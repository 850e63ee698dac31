use roster_core::domain::customer::{Customer, CustomerId};
use roster_core::errors::DomainError;
use uuid::Uuid;

/// Row of the `customer` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerEntity {
    pub customer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
    pub address: String,
}

impl CustomerEntity {
    /// Maps a caller-supplied customer onto a storable record, generating an
    /// identifier when the customer has none.
    pub fn from_model(customer: Customer) -> Result<Self, DomainError> {
        let customer_id = customer.parsed_id()?.unwrap_or_else(CustomerId::generate);
        Ok(Self::with_id(customer_id, customer))
    }

    /// Maps a customer that must already carry an identifier.
    pub fn from_identified_model(customer: Customer) -> Result<Self, DomainError> {
        let customer_id = customer.parsed_id()?.ok_or(DomainError::MissingCustomerId)?;
        Ok(Self::with_id(customer_id, customer))
    }

    fn with_id(customer_id: CustomerId, customer: Customer) -> Self {
        Self {
            customer_id: customer_id.0,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email_address: customer.email_address,
            phone_number: customer.phone_number,
            address: customer.address,
        }
    }
}

impl From<CustomerEntity> for Customer {
    fn from(entity: CustomerEntity) -> Self {
        Self {
            customer_id: Some(CustomerId(entity.customer_id).to_string()),
            first_name: entity.first_name,
            last_name: entity.last_name,
            email_address: entity.email_address,
            phone_number: entity.phone_number,
            address: entity.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use roster_core::domain::customer::Customer;
    use roster_core::errors::DomainError;
    use uuid::Uuid;

    use super::CustomerEntity;

    fn entity() -> CustomerEntity {
        CustomerEntity {
            customer_id: Uuid::new_v4(),
            first_name: "testFirst".to_string(),
            last_name: "testLast".to_string(),
            email_address: "nibh@ultricesposuere.edu".to_string(),
            phone_number: "555-515-1234".to_string(),
            address: "1234 Test Street".to_string(),
        }
    }

    #[test]
    fn entity_to_model_and_back_preserves_every_field() {
        let original = entity();
        let model = Customer::from(original.clone());

        assert_eq!(model.customer_id.as_deref(), Some(original.customer_id.to_string().as_str()));

        let restored = CustomerEntity::from_model(model).expect("map back to entity");
        assert_eq!(restored, original);
    }

    #[test]
    fn missing_identifier_is_generated_on_add_mapping() {
        let customer = Customer::new("Ada", "Lovelace", "ada@example.com", "555", "London");
        let first = CustomerEntity::from_model(customer.clone()).expect("map");
        let second = CustomerEntity::from_model(customer).expect("map");

        assert_ne!(first.customer_id, second.customer_id);
        assert_eq!(first.customer_id.get_version_num(), 4);
        assert_eq!(first.email_address, "ada@example.com");
    }

    #[test]
    fn identified_mapping_requires_an_identifier() {
        let customer = Customer::new("Ada", "Lovelace", "ada@example.com", "555", "London");
        assert_eq!(
            CustomerEntity::from_identified_model(customer),
            Err(DomainError::MissingCustomerId)
        );
    }

    #[test]
    fn malformed_identifier_is_rejected() {
        let customer =
            Customer::new("Ada", "Lovelace", "ada@example.com", "555", "London").with_id("42");
        assert_eq!(
            CustomerEntity::from_model(customer),
            Err(DomainError::InvalidCustomerId("42".to_string()))
        );
    }
}
