use std::sync::Arc;

use roster_core::domain::customer::{Customer, CustomerId};
use roster_core::errors::{ApplicationError, DomainError};
use thiserror::Error;
use tracing::{debug, info};

use crate::entity::CustomerEntity;
use crate::repositories::{CustomerRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ServiceError> for ApplicationError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Domain(error) => Self::Domain(error),
            ServiceError::Repository(error) => Self::Persistence(error.to_string()),
        }
    }
}

/// Mediates between the caller-facing [`Customer`] and the stored
/// [`CustomerEntity`]. Repository failures are returned unchanged.
#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let entities = self.repository.find_all().await?;
        debug!(event_name = "customer.listed", count = entities.len(), "listed customers");
        Ok(entities.into_iter().map(Customer::from).collect())
    }

    pub async fn find_by_email_address(
        &self,
        email_address: &str,
    ) -> Result<Option<Customer>, ServiceError> {
        let found = self.repository.find_by_email_address(email_address).await?;
        debug!(event_name = "customer.lookup.email", found = found.is_some(), "email lookup");
        Ok(found.map(Customer::from))
    }

    pub async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, ServiceError> {
        let customer_id: CustomerId = customer_id.parse()?;
        let found = self.repository.find_by_id(customer_id.as_uuid()).await?;
        debug!(
            event_name = "customer.lookup.id",
            customer_id = %customer_id,
            found = found.is_some(),
            "identifier lookup"
        );
        Ok(found.map(Customer::from))
    }

    /// Stores a new customer, generating an identifier when none is given.
    pub async fn add_customer(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let entity = CustomerEntity::from_model(customer)?;
        let saved = self.repository.save(entity).await?;
        info!(
            event_name = "customer.added",
            customer_id = %saved.customer_id,
            "customer added"
        );
        Ok(Customer::from(saved))
    }

    /// Overwrites every field of the record with the customer's identifier,
    /// inserting it if no such record exists.
    pub async fn update_customer(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let entity = CustomerEntity::from_identified_model(customer)?;
        let saved = self.repository.save(entity).await?;
        info!(
            event_name = "customer.updated",
            customer_id = %saved.customer_id,
            "customer updated"
        );
        Ok(Customer::from(saved))
    }
}
