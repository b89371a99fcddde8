//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (store reachable)
//!
//! # Customers
//! GET    /v1/customers         - List customers
//! POST   /v1/customers         - Create customer
//! GET    /v1/customers/{id}    - Customer detail
//! PUT    /v1/customers/{id}    - Overwrite customer
//! DELETE /v1/customers/{id}    - Delete customer
//!
//! # Products
//! GET    /v1/products          - List products
//! POST   /v1/products          - Create product
//! GET    /v1/products/{id}     - Product detail
//! PUT    /v1/products/{id}     - Overwrite product
//! DELETE /v1/products/{id}     - Delete product
//!
//! # Orders
//! POST   /v1/orders            - Place order
//! GET    /v1/orders/{id}       - Order detail
//! ```

pub mod catalog;
pub mod health;
pub mod orders;

use axum::Router;

use crate::models::{Customer, Product};
use crate::state::AppState;

pub use catalog::CatalogResource;

/// Build the complete router for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router::<Customer>())
        .merge(catalog::router::<Product>())
        .merge(orders::router())
}
