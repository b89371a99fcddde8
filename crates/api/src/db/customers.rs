//! `PostgreSQL` storage for customers.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use bugstore_core::CustomerId;

use super::{EntityStore, PgStore, RepositoryError, map_insert_error};
use crate::models::Customer;

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    birth_date: NaiveDate,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: CustomerId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
        }
    }
}

#[async_trait]
impl EntityStore<Customer> for PgStore {
    async fn find(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, phone, birth_date
            FROM bugstore.customer
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn scan(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, phone, birth_date
            FROM bugstore.customer
            ORDER BY created_at, id
            ",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, customer: &Customer) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO bugstore.customer (id, name, email, phone, birth_date)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.birth_date)
        .execute(self.pool())
        .await
        .map_err(|e| map_insert_error("customer", e))?;

        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE bugstore.customer
            SET name = $2, email = $3, phone = $4, birth_date = $5
            WHERE id = $1
            ",
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.birth_date)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM bugstore.customer WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
