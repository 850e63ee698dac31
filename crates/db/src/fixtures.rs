use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Canonical seed customers; must stay in step with the SQL fixture.
const SEED_CUSTOMERS: &[SeedCustomerContract] = &[
    SeedCustomerContract {
        customer_id: "054b145c-ddbc-4136-a2bd-7bf45ed1bef7",
        first_name: "Cally",
        last_name: "Reynolds",
        email_address: "penatibus.et@lectusa.com",
    },
    SeedCustomerContract {
        customer_id: "38124691-9643-4f10-90a0-d980bca0b27d",
        first_name: "Sydney",
        last_name: "Bartlett",
        email_address: "nibh@ultricesposuere.edu",
    },
    SeedCustomerContract {
        customer_id: "9d06fd3c-7e1d-4b2a-9d4e-4a8d1c5b6f20",
        first_name: "Hunter",
        last_name: "Newton",
        email_address: "quam.quis.diam@facilisisfacilisis.org",
    },
    SeedCustomerContract {
        customer_id: "d3b6a1f2-5c44-4e8b-8f0a-2e6c7b9a1d35",
        first_name: "Brooke",
        last_name: "Perkins",
        email_address: "sit@vitaealiquetnec.net",
    },
    SeedCustomerContract {
        customer_id: "4f8e2c71-0b3d-4a96-b5e7-c1d2e3f4a5b6",
        first_name: "Nolan",
        last_name: "Slater",
        email_address: "sociis.natoque.penatibus@justo.org",
    },
];

/// Deterministic directory of five customers used for demos and
/// integration tests.
pub struct CustomerSeedDataset;

impl CustomerSeedDataset {
    /// SQL fixture content for the customer seed.
    pub const SQL: &str = include_str!("../../../config/fixtures/customer_seed.sql");

    /// Load the seed dataset. Safe to repeat: seeded rows are restored.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let customers_seeded = SEED_CUSTOMERS
            .iter()
            .map(|customer| SeededCustomer {
                customer_id: customer.customer_id,
                display_name: customer.display_name(),
                email_address: customer.email_address,
            })
            .collect::<Vec<_>>();

        tracing::info!(
            event_name = "system.seed.loaded",
            customers = customers_seeded.len(),
            "customer seed dataset loaded"
        );

        Ok(SeedResult { customers_seeded })
    }

    /// Verify that each seeded customer exists with its contracted name and email.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        for customer in SEED_CUSTOMERS {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM customer
                    WHERE customer_id = ?1 AND first_name = ?2 AND last_name = ?3 AND email_address = ?4)",
            )
            .bind(customer.customer_id)
            .bind(customer.first_name)
            .bind(customer.last_name)
            .bind(customer.email_address)
            .fetch_one(pool)
            .await?;
            checks.push((customer.email_address, present == 1));
        }

        let all_present = checks.iter().all(|(_, exists)| *exists);
        Ok(VerificationResult { all_present, checks })
    }

    /// Remove seeded customers from a test database.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let quoted_ids = sql_array_from_ids(
            &SEED_CUSTOMERS.iter().map(|customer| customer.customer_id).collect::<Vec<_>>(),
        );

        sqlx::query(&format!("DELETE FROM customer WHERE customer_id IN {quoted_ids}"))
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedCustomerContract {
    customer_id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email_address: &'static str,
}

impl SeedCustomerContract {
    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn sql_array_from_ids(ids: &[&str]) -> String {
    let quoted = ids.iter().map(|id| format!("'{}'", id.replace('\'', "''"))).collect::<Vec<_>>();
    format!("({})", quoted.join(", "))
}

#[derive(Debug, Clone)]
pub struct SeedResult {
    pub customers_seeded: Vec<SeededCustomer>,
}

#[derive(Debug, Clone)]
pub struct SeededCustomer {
    pub customer_id: &'static str,
    pub display_name: String,
    pub email_address: &'static str,
}

#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

#[cfg(test)]
mod tests {
    use super::{sql_array_from_ids, CustomerSeedDataset};
    use crate::repositories::{CustomerRepository, SqlCustomerRepository};
    use crate::{connect_with_settings, migrations};

    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn load_then_verify_reports_every_customer() {
        let pool = setup().await;

        let result = CustomerSeedDataset::load(&pool).await.expect("load seed");
        let verification = CustomerSeedDataset::verify(&pool).await.expect("verify seed");

        assert_eq!(result.customers_seeded.len(), 5);
        assert_eq!(result.customers_seeded[0].display_name, "Cally Reynolds");
        assert!(verification.all_present);
        assert_eq!(verification.checks.len(), 5);
    }

    #[tokio::test]
    async fn reload_restores_edited_seed_rows() {
        let pool = setup().await;
        CustomerSeedDataset::load(&pool).await.expect("first load");

        sqlx::query("UPDATE customer SET first_name = 'Edited' WHERE email_address = ?")
            .bind("penatibus.et@lectusa.com")
            .execute(&pool)
            .await
            .expect("edit seeded row");
        let broken = CustomerSeedDataset::verify(&pool).await.expect("verify");
        assert!(!broken.all_present);
        assert_eq!(
            broken.checks.iter().filter(|(_, ok)| !ok).map(|(label, _)| *label).collect::<Vec<_>>(),
            vec!["penatibus.et@lectusa.com"]
        );

        CustomerSeedDataset::load(&pool).await.expect("second load");
        let repo = SqlCustomerRepository::new(pool.clone());
        assert_eq!(repo.count().await.expect("count"), 5);
        assert!(CustomerSeedDataset::verify(&pool).await.expect("verify").all_present);
    }

    #[tokio::test]
    async fn clean_removes_only_seeded_rows() {
        let pool = setup().await;
        CustomerSeedDataset::load(&pool).await.expect("load");
        sqlx::query(
            "INSERT INTO customer (customer_id, first_name, last_name, email_address, phone_number, address)
             VALUES ('00000000-0000-4000-8000-000000000001', 'Keep', 'Me', 'keep@example.com', '', '')",
        )
        .execute(&pool)
        .await
        .expect("insert extra customer");

        CustomerSeedDataset::clean(&pool).await.expect("clean");

        let repo = SqlCustomerRepository::new(pool);
        assert_eq!(repo.count().await.expect("count"), 1);
    }

    #[test]
    fn sql_array_escapes_quotes() {
        assert_eq!(sql_array_from_ids(&["a", "b'c"]), "('a', 'b''c')");
    }
}
