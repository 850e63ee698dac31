use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::entity::CustomerEntity;

pub mod customer;
pub mod memory;

pub use customer::SqlCustomerRepository;
pub use memory::InMemoryCustomerRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Storage for customer records, keyed by identifier.
///
/// `find_all` and `find_by_email_address` follow insertion order; when several
/// records share an email the earliest one wins. `save` is an upsert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<CustomerEntity>, RepositoryError>;

    async fn find_by_email_address(
        &self,
        email_address: &str,
    ) -> Result<Option<CustomerEntity>, RepositoryError>;

    async fn find_by_id(&self, customer_id: &Uuid)
        -> Result<Option<CustomerEntity>, RepositoryError>;

    async fn save(&self, customer: CustomerEntity) -> Result<CustomerEntity, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
