use std::future::Future;
use std::sync::Arc;

use clap::Args;
use roster_core::domain::customer::Customer;
use roster_core::errors::ApplicationError;
use roster_db::{
    connect_with_config, migrations, CustomerService, ServiceError, SqlCustomerRepository,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::commands::{build_runtime, load_config, CommandResult};

#[derive(Debug, Clone, Args)]
pub struct CustomerFields {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long = "email")]
    pub email_address: String,
    #[arg(long = "phone", default_value = "")]
    pub phone_number: String,
    #[arg(long, default_value = "")]
    pub address: String,
}

impl CustomerFields {
    fn into_customer(self, customer_id: Option<String>) -> Customer {
        Customer {
            customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            phone_number: self.phone_number,
            address: self.address,
        }
    }
}

pub fn list() -> CommandResult {
    const COMMAND: &str = "customers.list";
    match execute(COMMAND, |service| async move { service.get_all_customers().await }) {
        Ok(customers) => respond(COMMAND, format!("{} customers", customers.len()), &customers),
        Err(failure) => failure,
    }
}

pub fn find(email_address: String) -> CommandResult {
    const COMMAND: &str = "customers.find";
    let lookup = email_address.clone();
    match execute(COMMAND, |service| async move { service.find_by_email_address(&lookup).await })
    {
        Ok(Some(customer)) => respond(COMMAND, "customer found", &customer),
        Ok(None) => not_found(COMMAND, format!("no customer with email `{email_address}`")),
        Err(failure) => failure,
    }
}

pub fn get(customer_id: String) -> CommandResult {
    const COMMAND: &str = "customers.get";
    let lookup = customer_id.clone();
    match execute(COMMAND, |service| async move { service.get_customer(&lookup).await }) {
        Ok(Some(customer)) => respond(COMMAND, "customer found", &customer),
        Ok(None) => not_found(COMMAND, format!("no customer with id `{customer_id}`")),
        Err(failure) => failure,
    }
}

pub fn add(fields: CustomerFields, customer_id: Option<String>) -> CommandResult {
    const COMMAND: &str = "customers.add";
    let customer = fields.into_customer(customer_id);
    match execute(COMMAND, |service| async move { service.add_customer(customer).await }) {
        Ok(customer) => respond(COMMAND, "customer added", &customer),
        Err(failure) => failure,
    }
}

pub fn update(customer_id: String, fields: CustomerFields) -> CommandResult {
    const COMMAND: &str = "customers.update";
    let customer = fields.into_customer(Some(customer_id));
    match execute(COMMAND, |service| async move { service.update_customer(customer).await }) {
        Ok(customer) => respond(COMMAND, "customer updated", &customer),
        Err(failure) => failure,
    }
}

/// Connects, applies pending migrations and hands a service to `operation`.
fn execute<T, F, Fut>(command: &'static str, operation: F) -> Result<T, CommandResult>
where
    F: FnOnce(CustomerService) -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let config = load_config(command)?;
    let runtime = build_runtime(command)?;

    runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| CommandResult::failure(command, "db_connectivity", error.to_string(), 4))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| CommandResult::failure(command, "migration", error.to_string(), 5))?;

        let service = CustomerService::new(Arc::new(SqlCustomerRepository::new(pool.clone())));
        let outcome = operation(service).await;
        pool.close().await;

        outcome.map_err(|error| service_failure(command, error))
    })
}

fn service_failure(command: &str, error: ServiceError) -> CommandResult {
    let correlation_id = Uuid::new_v4().to_string();
    let interface = ApplicationError::from(error).into_interface(correlation_id);
    warn!(
        event_name = "customer.command.failed",
        command,
        correlation_id = interface.correlation_id(),
        error_class = interface.error_class(),
        error = %interface,
        "customer command failed"
    );

    CommandResult::failure(
        command,
        interface.error_class(),
        format!(
            "{} ({interface}; correlation_id={})",
            interface.user_message(),
            interface.correlation_id()
        ),
        7,
    )
}

fn not_found(command: &str, message: String) -> CommandResult {
    CommandResult::failure(command, "not_found", message, 1)
}

fn respond<T: Serialize>(command: &str, message: impl Into<String>, value: &T) -> CommandResult {
    match serde_json::to_value(value) {
        Ok(data) => CommandResult::success_with_data(command, message, Some(data)),
        Err(error) => CommandResult::failure(
            command,
            "serialization",
            format!("failed to serialize command data: {error}"),
            3,
        ),
    }
}
