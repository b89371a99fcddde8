//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{Gateway, RepositoryError};
use crate::models::{Customer, Product};
use crate::services::{CatalogService, OrderService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Services are wired once, at
/// construction, against a single persistence gateway.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    gateway: Arc<dyn Gateway>,
    customers: CatalogService<Customer>,
    products: CatalogService<Product>,
    orders: OrderService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `gateway` - Persistence gateway shared by every service
    pub fn new<G>(gateway: Arc<G>) -> Self
    where
        G: Gateway + 'static,
    {
        let customers = CatalogService::<Customer>::new(gateway.clone());
        let products = CatalogService::<Product>::new(gateway.clone());
        let orders = OrderService::new(gateway.clone(), gateway.clone());

        Self {
            inner: Arc::new(AppStateInner {
                gateway,
                customers,
                products,
                orders,
            }),
        }
    }

    /// Get a reference to the customer catalog service.
    #[must_use]
    pub fn customers(&self) -> &CatalogService<Customer> {
        &self.inner.customers
    }

    /// Get a reference to the product catalog service.
    #[must_use]
    pub fn products(&self) -> &CatalogService<Product> {
        &self.inner.products
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Check that the persistence gateway is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the gateway cannot be reached.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.inner.gateway.ping().await
    }
}
