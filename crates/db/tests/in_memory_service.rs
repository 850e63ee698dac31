//! Service behaviour over the process-local store, no database involved.

use std::sync::Arc;

use roster_core::domain::customer::Customer;
use roster_db::{CustomerService, InMemoryCustomerRepository};

fn service() -> CustomerService {
    CustomerService::new(Arc::new(InMemoryCustomerRepository::default()))
}

fn new_customer(email: &str) -> Customer {
    Customer::new(
        "Test",
        "Test",
        email,
        "(901) 166-8355555555",
        "556 Lakewood Park, Bismarck, ND 585055555555",
    )
}

#[tokio::test]
async fn add_then_find_by_email_returns_equal_fields() {
    let service = service();
    let input = new_customer("test@lectusa.com");

    let added = service.add_customer(input.clone()).await.expect("add");
    let found = service
        .find_by_email_address("test@lectusa.com")
        .await
        .expect("lookup")
        .expect("added customer should be found");

    assert_eq!(found, added);
    assert_eq!(Customer { customer_id: None, ..found }, input);
}

#[tokio::test]
async fn adding_n_customers_lists_n_in_insertion_order() {
    let service = service();
    assert!(service.get_all_customers().await.expect("list").is_empty());

    for index in 0..4 {
        service.add_customer(new_customer(&format!("user{index}@lectusa.com"))).await.expect("add");
    }

    let emails: Vec<String> = service
        .get_all_customers()
        .await
        .expect("list")
        .into_iter()
        .map(|customer| customer.email_address)
        .collect();
    assert_eq!(
        emails,
        vec!["user0@lectusa.com", "user1@lectusa.com", "user2@lectusa.com", "user3@lectusa.com"]
    );
}

#[tokio::test]
async fn update_customer_changes_only_the_edited_field() {
    let service = service();
    let added = service.add_customer(new_customer("test@lectusa.com")).await.expect("add");

    let edited = Customer { phone_number: "555-515-1234".to_string(), ..added.clone() };
    let updated = service.update_customer(edited).await.expect("update");

    assert_eq!(updated.phone_number, "555-515-1234");
    assert_eq!(Customer { phone_number: added.phone_number.clone(), ..updated.clone() }, added);

    let customer_id = updated.customer_id.clone().expect("id");
    assert_eq!(service.get_customer(&customer_id).await.expect("get"), Some(updated));
    assert_eq!(service.get_all_customers().await.expect("list").len(), 1);
}

#[tokio::test]
async fn find_by_unknown_email_is_absent() {
    let service = service();
    service.add_customer(new_customer("known@lectusa.com")).await.expect("add");

    let found = service.find_by_email_address("nobody@lectusa.com").await.expect("lookup");
    assert_eq!(found, None);
}
