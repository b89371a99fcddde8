//! Order placement and lookup.
//!
//! Placing an order resolves every requested line against the current
//! product catalog. Lines whose product does not exist are dropped without
//! failing the request; the dropped product IDs are returned alongside the
//! order so callers can log them, but they never reach the stored aggregate.
//!
//! Line totals and the order total must fit in a [`Decimal`]; an order that
//! overflows is rejected before anything is stored.
//!
//! [`Decimal`]: rust_decimal::Decimal

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use thiserror::Error;
use tracing::instrument;

use bugstore_core::{OrderId, OrderLineId, ProductId};

use crate::db::{EntityStore, OrderStore, RepositoryError};
use crate::models::{NewOrder, Order, OrderLine, Product};

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A line's price times quantity does not fit in a decimal.
    #[error("line total for product {product_id} x {quantity} is out of range")]
    LineTotalOverflow {
        product_id: ProductId,
        quantity: i32,
    },

    /// The sum of the line totals does not fit in a decimal.
    #[error("order total is out of range")]
    TotalOverflow,
}

/// Result of placing an order.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// The order as persisted.
    pub order: Order,
    /// Product IDs of requested lines that were dropped, in request order.
    pub skipped: Vec<ProductId>,
}

/// Places and fetches orders.
#[derive(Clone)]
pub struct OrderService {
    products: Arc<dyn EntityStore<Product>>,
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub fn new(products: Arc<dyn EntityStore<Product>>, orders: Arc<dyn OrderStore>) -> Self {
        Self { products, orders }
    }

    /// Place an order.
    ///
    /// Each line is priced as `product.price * quantity` using the price at
    /// placement time. The customer is not checked for existence. An order
    /// whose lines were all dropped is still stored, with no lines.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::LineTotalOverflow` or `OrderError::TotalOverflow`
    /// if a total is out of range, and `OrderError::Repository` if a product
    /// lookup or the final commit fails. Nothing is stored in any case.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id, requested = input.lines.len()))]
    pub async fn create(&self, input: NewOrder) -> Result<PlacedOrder, OrderError> {
        // Postgres stores microseconds; truncate so reads match what we return.
        let now = Utc::now().trunc_subsecs(6);

        let mut lines = Vec::with_capacity(input.lines.len());
        let mut skipped = Vec::new();

        for requested in input.lines {
            let Some(product) = self.products.find(requested.product_id).await? else {
                skipped.push(requested.product_id);
                continue;
            };

            let total = product.price.line_total(requested.quantity).ok_or(
                OrderError::LineTotalOverflow {
                    product_id: requested.product_id,
                    quantity: requested.quantity,
                },
            )?;

            lines.push(OrderLine {
                id: OrderLineId::new(),
                product_id: requested.product_id,
                quantity: requested.quantity,
                total,
            });
        }

        let order = Order {
            id: OrderId::new(),
            customer_id: input.customer_id,
            created_at: now,
            updated_at: now,
            lines,
        };

        let total = order.total().ok_or(OrderError::TotalOverflow)?;

        self.orders.insert_order(&order).await?;

        if !skipped.is_empty() {
            tracing::warn!(
                order_id = %order.id,
                skipped = ?skipped,
                "dropped order lines referencing unknown products"
            );
        }
        tracing::info!(
            order_id = %order.id,
            lines = order.lines.len(),
            total = %total,
            "order placed"
        );

        Ok(PlacedOrder { order, skipped })
    }

    /// Get an order with all of its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        self.orders.find_order(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bugstore_core::{CustomerId, Price};

    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{CatalogEntity, NewOrderLine, ProductFields};

    fn service() -> (Arc<MemoryStore>, OrderService) {
        let store = Arc::new(MemoryStore::new());
        let service = OrderService::new(store.clone(), store.clone());
        (store, service)
    }

    async fn seed_product(store: &MemoryStore, cents: i64) -> Product {
        let product = Product::from_fields(
            ProductId::new(),
            ProductFields {
                title: "Product 1".to_owned(),
                description: "Test product".to_owned(),
                slug: "product-1".to_owned(),
                price: Price::from_cents(cents),
            },
        );
        store.insert(&product).await.unwrap();
        product
    }

    fn line(product_id: ProductId, quantity: i32) -> NewOrderLine {
        NewOrderLine {
            product_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_computes_line_total() {
        let (store, orders) = service();
        let product = seed_product(&store, 5000).await;
        let customer_id = CustomerId::new();

        let placed = orders
            .create(NewOrder {
                customer_id,
                lines: vec![line(product.id, 2)],
            })
            .await
            .unwrap();

        assert_eq!(placed.order.customer_id, customer_id);
        assert_eq!(placed.order.lines.len(), 1);
        assert!(placed.skipped.is_empty());

        let stored = store.orders().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, placed.order.id);
        assert_eq!(stored[0].lines[0].total, Price::from_cents(10_000));
        assert_eq!(stored[0].lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_create_sets_equal_timestamps() {
        let (_, orders) = service();

        let placed = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![],
            })
            .await
            .unwrap();

        assert_eq!(placed.order.created_at, placed.order.updated_at);
    }

    #[tokio::test]
    async fn test_create_skips_unknown_products() {
        let (store, orders) = service();
        let known = seed_product(&store, 1000).await;
        let unknown = ProductId::new();

        let placed = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(unknown, 1), line(known.id, 3)],
            })
            .await
            .unwrap();

        assert_eq!(placed.skipped, vec![unknown]);
        assert_eq!(placed.order.lines.len(), 1);
        assert_eq!(placed.order.lines[0].product_id, known.id);

        let stored = store.orders().await;
        assert_eq!(stored[0].lines.len(), 1);
        assert_eq!(stored[0].lines[0].total, Price::from_cents(3000));
    }

    #[tokio::test]
    async fn test_create_with_only_unknown_products_persists_empty_order() {
        let (store, orders) = service();

        let placed = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(ProductId::new(), 1)],
            })
            .await
            .unwrap();

        assert!(placed.order.lines.is_empty());
        assert_eq!(store.order_count().await, 1);
        assert!(store.orders().await[0].lines.is_empty());
    }

    #[tokio::test]
    async fn test_create_preserves_line_order() {
        let (store, orders) = service();
        let a = seed_product(&store, 100).await;
        let b = seed_product(&store, 200).await;
        let c = seed_product(&store, 300).await;

        let placed = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(c.id, 1), line(ProductId::new(), 1), line(a.id, 1), line(b.id, 1)],
            })
            .await
            .unwrap();

        let ids: Vec<ProductId> = placed.order.lines.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
    }

    #[tokio::test]
    async fn test_create_uses_price_at_placement_time() {
        let (store, orders) = service();
        let mut product = seed_product(&store, 5000).await;

        let placed = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(product.id, 1)],
            })
            .await
            .unwrap();

        product.price = Price::from_cents(9900);
        store.update(&product).await.unwrap();

        let stored = orders.get_by_id(placed.order.id).await.unwrap().unwrap();
        assert_eq!(stored.lines[0].total, Price::from_cents(5000));
    }

    #[tokio::test]
    async fn test_create_does_not_check_customer() {
        let (store, orders) = service();
        let product = seed_product(&store, 100).await;

        let placed = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(product.id, 1)],
            })
            .await
            .unwrap();

        assert_eq!(placed.order.lines.len(), 1);
    }

    async fn seed_max_product(store: &MemoryStore) -> Product {
        let product = Product::from_fields(
            ProductId::new(),
            ProductFields {
                title: "Priceless".to_owned(),
                description: String::new(),
                slug: "priceless".to_owned(),
                price: Price::new(rust_decimal::Decimal::MAX),
            },
        );
        store.insert(&product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_create_rejects_line_total_overflow() {
        let (store, orders) = service();
        let product = seed_max_product(&store).await;

        let err = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(product.id, 2)],
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::LineTotalOverflow { product_id, quantity: 2 } if product_id == product.id
        ));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_order_total_overflow_before_storing() {
        let (store, orders) = service();
        let product = seed_max_product(&store).await;

        let err = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(product.id, 1), line(product.id, 1)],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::TotalOverflow));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn test_get_by_id_returns_lines() {
        let (store, orders) = service();
        let product = seed_product(&store, 100_000).await;

        let placed = orders
            .create(NewOrder {
                customer_id: CustomerId::new(),
                lines: vec![line(product.id, 1)],
            })
            .await
            .unwrap();

        let fetched = orders.get_by_id(placed.order.id).await.unwrap().unwrap();
        assert_eq!(fetched, placed.order);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let (_, orders) = service();
        assert!(orders.get_by_id(OrderId::new()).await.unwrap().is_none());
    }
}
