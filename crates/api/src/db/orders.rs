//! `PostgreSQL` storage for the order aggregate.
//!
//! An order lives in `bugstore.customer_order`; its lines live in
//! `bugstore.order_line` with a `position` column that preserves the order
//! in which they were requested.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use bugstore_core::{CustomerId, OrderId, OrderLineId, Price, ProductId};

use super::{OrderStore, PgStore, RepositoryError, map_insert_error};
use crate::models::{Order, OrderLine};

/// Internal row type for order header queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Internal row type for order line queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    id: Uuid,
    product_id: Uuid,
    quantity: i32,
    total: Decimal,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            id: OrderLineId::from_uuid(row.id),
            product_id: ProductId::from_uuid(row.product_id),
            quantity: row.quantity,
            total: Price::new(row.total),
        }
    }
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLineRow>) -> Order {
        Order {
            id: OrderId::from_uuid(self.id),
            customer_id: CustomerId::from_uuid(self.customer_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r"
            INSERT INTO bugstore.customer_order (id, customer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error("order", e))?;

        for (position, line) in (1_i32..).zip(&order.lines) {
            sqlx::query(
                r"
                INSERT INTO bugstore.order_line (id, order_id, position, product_id, quantity, total)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(line.id)
            .bind(order.id)
            .bind(position)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.total)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error("order line", e))?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let Some(row) = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_id, created_at, updated_at
            FROM bugstore.customer_order
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, product_id, quantity, total
            FROM bugstore.order_line
            WHERE order_id = $1
            ORDER BY position
            ",
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        Ok(Some(row.into_order(lines)))
    }
}
