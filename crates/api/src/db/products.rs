//! `PostgreSQL` storage for products.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use bugstore_core::{Price, ProductId};

use super::{EntityStore, PgStore, RepositoryError, map_insert_error};
use crate::models::Product;

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    title: String,
    description: String,
    slug: String,
    price: Decimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            slug: row.slug,
            price: Price::new(row.price),
        }
    }
}

#[async_trait]
impl EntityStore<Product> for PgStore {
    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, slug, price
            FROM bugstore.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn scan(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, slug, price
            FROM bugstore.product
            ORDER BY created_at, id
            ",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO bugstore.product (id, title, description, slug, price)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.price)
        .execute(self.pool())
        .await
        .map_err(|e| map_insert_error("product", e))?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE bugstore.product
            SET title = $2, description = $3, slug = $4, price = $5
            WHERE id = $1
            ",
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.price)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM bugstore.product WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
