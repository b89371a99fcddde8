//! Product domain model.

use serde::{Deserialize, Serialize};

use bugstore_core::{Price, ProductId};

use super::entity::{CatalogEntity, MissingOnDelete};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Human-readable key (not enforced unique).
    pub slug: String,
    /// Current unit price.
    pub price: Price,
}

/// Mutable product fields, as accepted by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub price: Price,
}

impl CatalogEntity for Product {
    type Id = ProductId;
    type Fields = ProductFields;

    const KIND: &'static str = "product";
    const COLLECTION: &'static str = "products";
    const MISSING_ON_DELETE: MissingOnDelete = MissingOnDelete::NotFound;

    fn new_id() -> ProductId {
        ProductId::new()
    }

    fn from_fields(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            slug: fields.slug,
            price: fields.price,
        }
    }

    fn id(&self) -> ProductId {
        self.id
    }

    fn apply(&mut self, fields: ProductFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.slug = fields.slug;
        self.price = fields.price;
    }
}
