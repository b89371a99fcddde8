//! Domain models for the back office.
//!
//! Customers and products share one CRUD contract, [`CatalogEntity`]; orders
//! are an aggregate of [`Order`] and its owned [`OrderLine`]s.

pub mod customer;
pub mod entity;
pub mod order;
pub mod product;

pub use customer::{Customer, CustomerFields};
pub use entity::{CatalogEntity, Deletion, MissingOnDelete};
pub use order::{NewOrder, NewOrderLine, Order, OrderLine};
pub use product::{Product, ProductFields};
