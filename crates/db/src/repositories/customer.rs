use sqlx::Row;
use uuid::Uuid;

use super::{CustomerRepository, RepositoryError};
use crate::entity::CustomerEntity;
use crate::DbPool;

pub struct SqlCustomerRepository {
    pool: DbPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_customer(row: &sqlx::sqlite::SqliteRow) -> Result<CustomerEntity, RepositoryError> {
    let customer_id: String =
        row.try_get("customer_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let first_name: String =
        row.try_get("first_name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let last_name: String =
        row.try_get("last_name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let email_address: String =
        row.try_get("email_address").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let phone_number: String =
        row.try_get("phone_number").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let address: String =
        row.try_get("address").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let customer_id = Uuid::parse_str(&customer_id).map_err(|e| {
        RepositoryError::Decode(format!("customer_id `{customer_id}` is not a UUID: {e}"))
    })?;

    Ok(CustomerEntity {
        customer_id,
        first_name,
        last_name,
        email_address,
        phone_number,
        address,
    })
}

#[async_trait::async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn find_all(&self) -> Result<Vec<CustomerEntity>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT customer_id, first_name, last_name, email_address, phone_number, address
             FROM customer ORDER BY rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_customer).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_email_address(
        &self,
        email_address: &str,
    ) -> Result<Option<CustomerEntity>, RepositoryError> {
        let row = sqlx::query(
            "SELECT customer_id, first_name, last_name, email_address, phone_number, address
             FROM customer WHERE email_address = ? ORDER BY rowid ASC LIMIT 1",
        )
        .bind(email_address)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_customer(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<CustomerEntity>, RepositoryError> {
        let row = sqlx::query(
            "SELECT customer_id, first_name, last_name, email_address, phone_number, address
             FROM customer WHERE customer_id = ?",
        )
        .bind(customer_id.hyphenated().to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_customer(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, customer: CustomerEntity) -> Result<CustomerEntity, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO customer (customer_id, first_name, last_name, email_address,
                                   phone_number, address)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(customer_id) DO UPDATE SET
                 first_name = excluded.first_name,
                 last_name = excluded.last_name,
                 email_address = excluded.email_address,
                 phone_number = excluded.phone_number,
                 address = excluded.address
             RETURNING customer_id, first_name, last_name, email_address, phone_number, address",
        )
        .bind(customer.customer_id.hyphenated().to_string())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email_address)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .fetch_one(&self.pool)
        .await?;

        row_to_customer(&row)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM customer").fetch_one(&self.pool).await?;
        u64::try_from(count).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::SqlCustomerRepository;
    use crate::entity::CustomerEntity;
    use crate::repositories::{CustomerRepository, RepositoryError};
    use crate::{connect_with_settings, migrations};

    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    fn customer(index: usize, email: &str) -> CustomerEntity {
        CustomerEntity {
            customer_id: Uuid::new_v4(),
            first_name: format!("firstName{index}"),
            last_name: format!("lastName{index}"),
            email_address: email.to_string(),
            phone_number: format!("phone{index}"),
            address: format!("address{index}"),
        }
    }

    #[tokio::test]
    async fn save_then_find_by_id_round_trip() {
        let repo = SqlCustomerRepository::new(setup().await);
        let entity = customer(0, "first@example.com");

        let saved = repo.save(entity.clone()).await.expect("save customer");
        let found = repo.find_by_id(&entity.customer_id).await.expect("find customer");

        assert_eq!(saved, entity);
        assert_eq!(found, Some(entity));
    }

    #[tokio::test]
    async fn save_overwrites_every_field_of_existing_record() {
        let repo = SqlCustomerRepository::new(setup().await);
        let original = customer(0, "before@example.com");
        repo.save(original.clone()).await.expect("insert");

        let replacement = CustomerEntity {
            first_name: "Changed".to_string(),
            email_address: "after@example.com".to_string(),
            ..customer(9, "ignored")
        };
        let replacement = CustomerEntity { customer_id: original.customer_id, ..replacement };
        repo.save(replacement.clone()).await.expect("overwrite");

        assert_eq!(repo.count().await.expect("count"), 1);
        assert_eq!(
            repo.find_by_id(&original.customer_id).await.expect("find"),
            Some(replacement)
        );
    }

    #[tokio::test]
    async fn find_all_returns_insertion_order_even_after_update() {
        let repo = SqlCustomerRepository::new(setup().await);
        let first = customer(0, "a@example.com");
        let second = customer(1, "b@example.com");
        repo.save(first.clone()).await.expect("save first");
        repo.save(second.clone()).await.expect("save second");
        repo.save(CustomerEntity { phone_number: "updated".to_string(), ..first.clone() })
            .await
            .expect("update first");

        let ids: Vec<Uuid> = repo
            .find_all()
            .await
            .expect("find all")
            .into_iter()
            .map(|entity| entity.customer_id)
            .collect();

        assert_eq!(ids, vec![first.customer_id, second.customer_id]);
    }

    #[tokio::test]
    async fn email_lookup_is_exact_and_prefers_earliest_duplicate() {
        let repo = SqlCustomerRepository::new(setup().await);
        let earliest = customer(0, "shared@example.com");
        repo.save(earliest.clone()).await.expect("save earliest");
        repo.save(customer(1, "shared@example.com")).await.expect("save duplicate");

        let found = repo.find_by_email_address("shared@example.com").await.expect("lookup");
        let upper = repo.find_by_email_address("SHARED@example.com").await.expect("lookup");

        assert_eq!(found, Some(earliest));
        assert_eq!(upper, None);
    }

    #[tokio::test]
    async fn corrupt_identifier_surfaces_as_decode_error() {
        let pool = setup().await;
        sqlx::query(
            "INSERT INTO customer (customer_id, first_name, last_name, email_address, phone_number, address)
             VALUES ('not-a-uuid', 'a', 'b', 'bad@example.com', 'c', 'd')",
        )
        .execute(&pool)
        .await
        .expect("insert corrupt row");

        let repo = SqlCustomerRepository::new(pool);
        let error = repo.find_all().await.expect_err("decode should fail");

        assert!(matches!(error, RepositoryError::Decode(ref message) if message.contains("not-a-uuid")));
    }

    #[tokio::test]
    async fn missing_table_surfaces_as_database_error() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        let repo = SqlCustomerRepository::new(pool);

        let error = repo.count().await.expect_err("query without schema should fail");
        assert!(matches!(error, RepositoryError::Database(_)));
    }
}
