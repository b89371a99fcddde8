//! The shared CRUD contract for catalog entities.

use core::fmt::{Debug, Display};
use core::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// How a delete of an unknown identifier is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingOnDelete {
    /// Return a confirmation with `deleted = false`.
    ReportNotDeleted,
    /// Return no confirmation at all (surfaces as 404).
    NotFound,
}

/// An entity managed by [`CatalogService`](crate::services::CatalogService).
///
/// Each kind supplies its identifier type, the set of mutable fields that
/// create and update accept, and its delete-not-found convention.
pub trait CatalogEntity:
    Debug + Clone + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Identifier type.
    type Id: Debug
        + Display
        + Copy
        + Eq
        + Hash
        + Send
        + Sync
        + Serialize
        + DeserializeOwned
        + 'static;

    /// Every mutable field, as accepted by create and update.
    type Fields: Debug + Clone + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Singular name used in logs and error messages.
    const KIND: &'static str;

    /// Plural name used for routes and list envelopes.
    const COLLECTION: &'static str;

    /// Delete-not-found convention for this kind.
    const MISSING_ON_DELETE: MissingOnDelete;

    /// Allocate a fresh identifier.
    fn new_id() -> Self::Id;

    /// Build an entity from an identifier and its fields.
    fn from_fields(id: Self::Id, fields: Self::Fields) -> Self;

    /// This entity's identifier.
    fn id(&self) -> Self::Id;

    /// Overwrite every mutable field.
    fn apply(&mut self, fields: Self::Fields);
}

/// Confirmation returned by a catalog delete.
///
/// `id` is `None` when nothing was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deletion<Id> {
    pub id: Option<Id>,
    pub deleted: bool,
}

impl<Id> Deletion<Id> {
    /// A confirmation for a removed entity.
    pub const fn deleted(id: Id) -> Self {
        Self {
            id: Some(id),
            deleted: true,
        }
    }

    /// A confirmation that nothing was removed.
    pub const fn not_deleted() -> Self {
        Self {
            id: None,
            deleted: false,
        }
    }
}
