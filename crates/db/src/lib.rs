pub mod connection;
pub mod entity;
pub mod fixtures;
pub mod migrations;
pub mod repositories;
pub mod service;

pub use connection::{connect_with_config, connect_with_settings, DbPool};
pub use entity::CustomerEntity;
pub use fixtures::{CustomerSeedDataset, SeedResult, SeededCustomer, VerificationResult};
pub use repositories::{
    CustomerRepository, InMemoryCustomerRepository, RepositoryError, SqlCustomerRepository,
};
pub use service::{CustomerService, ServiceError};
