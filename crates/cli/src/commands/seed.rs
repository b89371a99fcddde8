//! Seed the database with demo customers and products.
//!
//! Entities are created through the catalog services, so each one gets a
//! fresh identifier. Running the command twice inserts two copies.
//!
//! # File format
//!
//! ```yaml
//! customers:
//!   - name: Ada Lovelace
//!     email: ada@example.com
//!     phone: "555-0100"
//!     birthDate: 1815-12-10
//! products:
//!   - title: Ladybug Plush
//!     description: Soft toy
//!     slug: ladybug-plush
//!     price: "19.99"
//! ```

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use bugstore_api::db::{self, PgStore};
use bugstore_api::models::{Customer, CustomerFields, Product, ProductFields};
use bugstore_api::services::CatalogService;
use bugstore_core::Price;

/// Customers and products to insert.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub customers: Vec<CustomerFields>,
    pub products: Vec<ProductFields>,
}

impl SeedData {
    /// The built-in demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        let customers = [
            ("Grace Hopper", "grace@example.com", "555-0101", (1906, 12, 9)),
            ("Alan Turing", "alan@example.com", "555-0102", (1912, 6, 23)),
        ]
        .into_iter()
        .map(|(name, email, phone, (y, m, d))| CustomerFields {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            birth_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        })
        .collect();

        let products = [
            ("Ladybug Plush", "Soft red and black plush toy", "ladybug-plush", 1999),
            ("Beetle Mug", "Ceramic mug, 350ml", "beetle-mug", 1250),
            ("Firefly Lamp", "Battery powered night light", "firefly-lamp", 3499),
        ]
        .into_iter()
        .map(|(title, description, slug, cents)| ProductFields {
            title: title.to_owned(),
            description: description.to_owned(),
            slug: slug.to_owned(),
            price: Price::from_cents(cents),
        })
        .collect();

        Self {
            customers,
            products,
        }
    }
}

/// Insert seed data from `file`, or the built-in demo catalog.
///
/// # Errors
///
/// Returns an error if no database URL is configured, the file cannot be
/// read or parsed, or an insert fails.
pub async fn run(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading seed data from file");
            let content = tokio::fs::read_to_string(path).await?;
            serde_yaml::from_str::<SeedData>(&content)?
        }
        None => SeedData::demo(),
    };

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let store = Arc::new(PgStore::new(pool));
    let customers = CatalogService::<Customer>::new(store.clone());
    let products = CatalogService::<Product>::new(store);

    for fields in data.customers {
        let customer = customers.create(fields).await?;
        info!(id = %customer.id, name = %customer.name, "Created customer");
    }

    for fields in data.products {
        let product = products.create(fields).await?;
        info!(id = %product.id, slug = %product.slug, price = %product.price, "Created product");
    }

    info!("Seeding complete");
    Ok(())
}
