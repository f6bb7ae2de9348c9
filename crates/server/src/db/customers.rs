//! Customer repository backed by `PostgreSQL`.

use async_trait::async_trait;
use sqlx::PgPool;

use customers_core::{Customer, CustomerFields, CustomerId, CustomerPatch, NewCustomer};

use super::{CustomerStore, RepositoryError};

const SELECT_CUSTOMERS: &str = r"
    SELECT id, name, email, phone, address
    FROM customers
";

const SELECT_CUSTOMER_BY_ID: &str = r"
    SELECT id, name, email, phone, address
    FROM customers
    WHERE id = $1
";

const INSERT_CUSTOMER: &str = r"
    INSERT INTO customers (name, email, phone, address)
    VALUES ($1, $2, $3, $4)
    RETURNING id, name, email, phone, address
";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert<'e, E>(
        executor: E,
        customer: &NewCustomer,
    ) -> Result<Customer, RepositoryError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_as::<_, Customer>(INSERT_CUSTOMER)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(&customer.address)
            .fetch_one(executor)
            .await
            .map_err(map_write_error)
    }
}

#[async_trait]
impl CustomerStore for PgCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = sqlx::query_as::<_, Customer>(SELECT_CUSTOMERS)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(SELECT_CUSTOMER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    async fn create(&self, fields: CustomerFields) -> Result<Customer, RepositoryError> {
        let customer = fields.validate()?;
        let created = Self::insert(&self.pool, &customer).await?;

        tracing::info!(customer_id = %created.id, "Customer created");
        Ok(created)
    }

    async fn create_many(
        &self,
        batch: Vec<CustomerFields>,
    ) -> Result<Vec<Customer>, RepositoryError> {
        // Validate everything up front so a bad record never opens a transaction
        let customers = batch
            .into_iter()
            .map(CustomerFields::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(customers.len());
        for customer in &customers {
            // Dropping `tx` on error rolls back the rows inserted so far
            created.push(Self::insert(&mut *tx, customer).await?);
        }
        tx.commit().await?;

        tracing::info!(count = created.len(), "Customers created");
        Ok(created)
    }

    async fn update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Option<Customer>, RepositoryError> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get(id).await;
        }

        let customer = sqlx::query_as::<_, Customer>(
            r"
            UPDATE customers
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address)
            WHERE id = $1
            RETURNING id, name, email, phone, address
            ",
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        if let Some(updated) = &customer {
            tracing::info!(customer_id = %updated.id, "Customer updated");
        }
        Ok(customer)
    }

    async fn delete(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            DELETE FROM customers
            WHERE id = $1
            RETURNING id, name, email, phone, address
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(deleted) = &customer {
            tracing::info!(customer_id = %deleted.id, "Customer deleted");
        }
        Ok(customer)
    }
}

/// Translate unique violations into `Conflict`; everything else stays a
/// database error.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_write_error_passes_through_non_database_errors() {
        let err = map_write_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }
}
