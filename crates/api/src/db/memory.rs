//! Process-local persistence gateway.
//!
//! Each collection is a vector behind its own `tokio` [`RwLock`]. Every
//! mutation happens under a single write guard, which makes it atomic with
//! respect to concurrent requests. Storage order is insertion order.
//!
//! Used when no database URL is configured and by the test suites, which
//! can inspect stored state (including order line totals) directly.

use async_trait::async_trait;
use tokio::sync::RwLock;

use bugstore_core::OrderId;

use super::{EntityStore, Gateway, OrderStore, RepositoryError};
use crate::models::{CatalogEntity, Customer, Order, Product};

/// In-memory gateway.
#[derive(Debug, Default)]
pub struct MemoryStore {
    customers: RwLock<Vec<Customer>>,
    products: RwLock<Vec<Product>>,
    orders: RwLock<Vec<Order>>,
}

/// Catalog entities that have a collection in [`MemoryStore`].
pub trait MemoryTable: CatalogEntity {
    /// The collection holding this kind.
    fn table(store: &MemoryStore) -> &RwLock<Vec<Self>>;
}

impl MemoryTable for Customer {
    fn table(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.customers
    }
}

impl MemoryTable for Product {
    fn table(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.products
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities of kind `E`.
    pub async fn count<E: MemoryTable>(&self) -> usize {
        E::table(self).read().await.len()
    }

    /// Number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Snapshot of every stored order, lines and totals included.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl<E: MemoryTable> EntityStore<E> for MemoryStore {
    async fn find(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        let table = E::table(self).read().await;
        Ok(table.iter().find(|entity| entity.id() == id).cloned())
    }

    async fn scan(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(E::table(self).read().await.clone())
    }

    async fn insert(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut table = E::table(self).write().await;
        if table.iter().any(|existing| existing.id() == entity.id()) {
            return Err(RepositoryError::Conflict(format!("{} already exists", E::KIND)));
        }
        table.push(entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<bool, RepositoryError> {
        let mut table = E::table(self).write().await;
        match table.iter_mut().find(|existing| existing.id() == entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: E::Id) -> Result<bool, RepositoryError> {
        let mut table = E::table(self).write().await;
        let before = table.len();
        table.retain(|entity| entity.id() != id);
        Ok(table.len() != before)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|existing| existing.id == order.id) {
            return Err(RepositoryError::Conflict("order already exists".to_owned()));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|order| order.id == id).cloned())
    }
}

#[async_trait]
impl Gateway for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
