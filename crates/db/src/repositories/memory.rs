use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CustomerRepository, RepositoryError};
use crate::entity::CustomerEntity;

/// Process-local customer store with the same ordering and upsert rules as
/// [`super::SqlCustomerRepository`].
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<CustomerEntity>>,
}

impl InMemoryCustomerRepository {
    pub fn with_customers(customers: impl IntoIterator<Item = CustomerEntity>) -> Self {
        let mut stored: Vec<CustomerEntity> = Vec::new();
        for customer in customers {
            upsert(&mut stored, customer);
        }
        Self { customers: RwLock::new(stored) }
    }
}

fn upsert(customers: &mut Vec<CustomerEntity>, customer: CustomerEntity) {
    match customers.iter_mut().find(|existing| existing.customer_id == customer.customer_id) {
        Some(existing) => *existing = customer,
        None => customers.push(customer),
    }
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> Result<Vec<CustomerEntity>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.clone())
    }

    async fn find_by_email_address(
        &self,
        email_address: &str,
    ) -> Result<Option<CustomerEntity>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|customer| customer.email_address == email_address).cloned())
    }

    async fn find_by_id(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<CustomerEntity>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|customer| customer.customer_id == *customer_id).cloned())
    }

    async fn save(&self, customer: CustomerEntity) -> Result<CustomerEntity, RepositoryError> {
        let mut customers = self.customers.write().await;
        upsert(&mut customers, customer.clone());
        Ok(customer)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.len() as u64)
    }
}
