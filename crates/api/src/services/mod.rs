//! Business logic services.
//!
//! - [`CatalogService`] - CRUD for customers and products
//! - [`OrderService`] - order placement and lookup

pub mod catalog;
pub mod orders;

pub use catalog::CatalogService;
pub use orders::{OrderError, OrderService, PlacedOrder};
