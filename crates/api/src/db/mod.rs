//! Persistence gateway for customers, products and orders.
//!
//! Services never talk to a database directly; they hold trait objects for
//! the gateway contracts defined here:
//!
//! - [`EntityStore`] - keyed lookup, scan, insert, update and delete for one
//!   catalog entity kind
//! - [`OrderStore`] - atomic insert and eager fetch of an order with its lines
//! - [`Gateway`] - everything above plus a readiness probe
//!
//! Two implementations are provided:
//!
//! - [`PgStore`] - `PostgreSQL` via `sqlx` (schema `bugstore`)
//! - [`MemoryStore`] - process-local storage for development and tests
//!
//! Every mutating call commits atomically; there are no retries.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p bugstore-cli -- migrate
//! ```

pub mod customers;
pub mod memory;
pub mod orders;
pub mod products;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use bugstore_core::OrderId;

use crate::models::{CatalogEntity, Customer, Order, Product};

pub use memory::{MemoryStore, MemoryTable};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., duplicate identifier).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage for one catalog entity kind.
#[async_trait]
pub trait EntityStore<E: CatalogEntity>: Send + Sync {
    /// Look up a single entity by identifier.
    async fn find(&self, id: E::Id) -> Result<Option<E>, RepositoryError>;

    /// Every stored entity, in storage order.
    async fn scan(&self) -> Result<Vec<E>, RepositoryError>;

    /// Insert a new entity.
    async fn insert(&self, entity: &E) -> Result<(), RepositoryError>;

    /// Overwrite the stored fields of an existing entity.
    ///
    /// Returns `false` if no entity with that identifier exists.
    async fn update(&self, entity: &E) -> Result<bool, RepositoryError>;

    /// Delete an entity.
    ///
    /// Returns `false` if no entity with that identifier exists.
    async fn remove(&self, id: E::Id) -> Result<bool, RepositoryError>;
}

/// Storage for the order aggregate.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist an order together with all of its lines in one commit.
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Fetch an order with its lines, in the order they were placed.
    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;
}

/// The complete persistence gateway consumed by the application.
#[async_trait]
pub trait Gateway: EntityStore<Customer> + EntityStore<Product> + OrderStore {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed gateway.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Gateway for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

/// Map a unique violation on insert to [`RepositoryError::Conflict`].
fn map_insert_error(kind: &str, e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{kind} already exists"));
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
