//! Customer domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bugstore_core::CustomerId;

use super::entity::{CatalogEntity, MissingOnDelete};

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Full name.
    pub name: String,
    /// Email address (not validated).
    pub email: String,
    /// Phone number (free text).
    pub phone: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
}

/// Mutable customer fields, as accepted by create and update.
///
/// Missing fields fall back to their defaults; nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

impl CatalogEntity for Customer {
    type Id = CustomerId;
    type Fields = CustomerFields;

    const KIND: &'static str = "customer";
    const COLLECTION: &'static str = "customers";
    const MISSING_ON_DELETE: MissingOnDelete = MissingOnDelete::ReportNotDeleted;

    fn new_id() -> CustomerId {
        CustomerId::new()
    }

    fn from_fields(id: CustomerId, fields: CustomerFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            birth_date: fields.birth_date,
        }
    }

    fn id(&self) -> CustomerId {
        self.id
    }

    fn apply(&mut self, fields: CustomerFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
        self.birth_date = fields.birth_date;
    }
}
