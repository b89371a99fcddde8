//! CRUD operations shared by every catalog entity kind.

use std::sync::Arc;

use tracing::instrument;

use crate::db::{EntityStore, RepositoryError};
use crate::models::{CatalogEntity, Deletion, MissingOnDelete};

/// Create, read, update and delete for one [`CatalogEntity`] kind.
///
/// Absent entities are reported as `Ok(None)`; only storage failures are
/// errors.
pub struct CatalogService<E: CatalogEntity> {
    store: Arc<dyn EntityStore<E>>,
}

impl<E: CatalogEntity> Clone for CatalogService<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<E: CatalogEntity> CatalogService<E> {
    /// Create a new catalog service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore<E>>) -> Self {
        Self { store }
    }

    /// Store a new entity under a freshly allocated identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store rejects the insert.
    #[instrument(skip(self, input), fields(kind = E::KIND))]
    pub async fn create(&self, input: E::Fields) -> Result<E, RepositoryError> {
        let entity = E::from_fields(E::new_id(), input);
        self.store.insert(&entity).await?;

        tracing::info!(id = %entity.id(), "{} created", E::KIND);
        Ok(entity)
    }

    /// Overwrite every field of an existing entity.
    ///
    /// Returns `None` if the entity does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a store operation fails.
    #[instrument(skip(self, input), fields(kind = E::KIND))]
    pub async fn update(&self, id: E::Id, input: E::Fields) -> Result<Option<E>, RepositoryError> {
        let Some(mut entity) = self.store.find(id).await? else {
            return Ok(None);
        };

        entity.apply(input);

        if !self.store.update(&entity).await? {
            // Removed between lookup and write.
            return Ok(None);
        }

        Ok(Some(entity))
    }

    /// Delete an entity.
    ///
    /// When the entity does not exist the result depends on the kind's
    /// [`MissingOnDelete`] convention: either a confirmation with
    /// `deleted = false`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a store operation fails.
    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn delete(&self, id: E::Id) -> Result<Option<Deletion<E::Id>>, RepositoryError> {
        if self.store.remove(id).await? {
            tracing::info!("{} deleted", E::KIND);
            return Ok(Some(Deletion::deleted(id)));
        }

        Ok(match E::MISSING_ON_DELETE {
            MissingOnDelete::ReportNotDeleted => Some(Deletion::not_deleted()),
            MissingOnDelete::NotFound => None,
        })
    }

    /// Get an entity by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn get_by_id(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        self.store.find(id).await
    }

    /// Every stored entity of this kind. Never `None`; possibly empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the scan fails.
    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn get_all(&self) -> Result<Vec<E>, RepositoryError> {
        self.store.scan().await
    }
}
