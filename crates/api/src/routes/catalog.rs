//! Catalog route handlers, shared by customers and products.
//!
//! Every handler is generic over a [`CatalogResource`]; [`router`] mounts
//! the five CRUD endpoints under `/v1/{collection}`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::{CatalogEntity, Customer, Deletion, Product};
use crate::services::CatalogService;
use crate::state::AppState;

/// A catalog entity exposed over HTTP.
pub trait CatalogResource: CatalogEntity {
    /// The service handling this kind.
    fn service(state: &AppState) -> &CatalogService<Self>;
}

impl CatalogResource for Customer {
    fn service(state: &AppState) -> &CatalogService<Self> {
        state.customers()
    }
}

impl CatalogResource for Product {
    fn service(state: &AppState) -> &CatalogService<Self> {
        state.products()
    }
}

/// Create the CRUD router for one catalog kind.
pub fn router<E: CatalogResource>() -> Router<AppState> {
    let collection = collection_path::<E>();
    let item = format!("{collection}/{{id}}");

    Router::new()
        .route(&collection, get(index::<E>).post(create::<E>))
        .route(&item, get(show::<E>).put(update::<E>).delete(destroy::<E>))
}

fn collection_path<E: CatalogEntity>() -> String {
    format!("/v1/{}", E::COLLECTION)
}

/// List envelope: `{"<collection>": [...]}`.
#[derive(Debug)]
pub struct Listing<E>(pub Vec<E>);

impl<E: CatalogEntity> Serialize for Listing<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(E::COLLECTION, &self.0)?;
        map.end()
    }
}

/// Update request body: the entity's identifier plus every field.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = ""))]
pub struct UpdateRequest<E: CatalogEntity> {
    /// Must match the identifier in the path.
    #[serde(default)]
    pub id: Option<E::Id>,
    #[serde(flatten)]
    pub fields: E::Fields,
}

/// List every entity.
///
/// GET /v1/{collection}
///
/// # Errors
///
/// Returns `AppError::Database` if the scan fails.
#[instrument(skip(state), fields(kind = E::KIND))]
pub async fn index<E: CatalogResource>(State(state): State<AppState>) -> Result<Json<Listing<E>>> {
    let entities = E::service(&state).get_all().await?;
    Ok(Json(Listing(entities)))
}

/// Get one entity.
///
/// GET /v1/{collection}/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no entity has this identifier.
#[instrument(skip(state), fields(kind = E::KIND))]
pub async fn show<E: CatalogResource>(
    State(state): State<AppState>,
    Path(id): Path<E::Id>,
) -> Result<Json<E>> {
    E::service(&state)
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found::<E>(id))
}

/// Create an entity.
///
/// POST /v1/{collection}
///
/// Responds `201 Created` with a `Location` header.
///
/// # Errors
///
/// Returns `AppError::Database` if the insert fails.
#[instrument(skip(state, fields), fields(kind = E::KIND))]
pub async fn create<E: CatalogResource>(
    State(state): State<AppState>,
    Json(fields): Json<E::Fields>,
) -> Result<impl IntoResponse> {
    let entity = E::service(&state).create(fields).await?;
    let location = format!("{}/{}", collection_path::<E>(), entity.id());

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(entity)))
}

/// Overwrite an entity.
///
/// PUT /v1/{collection}/{id}
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the body identifier differs from the
/// path, `AppError::NotFound` if no entity has this identifier.
#[instrument(skip(state, body), fields(kind = E::KIND))]
pub async fn update<E: CatalogResource>(
    State(state): State<AppState>,
    Path(id): Path<E::Id>,
    Json(body): Json<UpdateRequest<E>>,
) -> Result<Json<E>> {
    if body.id != Some(id) {
        return Err(AppError::BadRequest(format!(
            "{} id in body does not match path",
            E::KIND
        )));
    }

    E::service(&state)
        .update(id, body.fields)
        .await?
        .map(Json)
        .ok_or_else(|| not_found::<E>(id))
}

/// Delete an entity.
///
/// DELETE /v1/{collection}/{id}
///
/// Customers answer `200` with `deleted: false` for unknown identifiers;
/// products answer `404`.
///
/// # Errors
///
/// Returns `AppError::NotFound` when the service reports no confirmation.
#[instrument(skip(state), fields(kind = E::KIND))]
pub async fn destroy<E: CatalogResource>(
    State(state): State<AppState>,
    Path(id): Path<E::Id>,
) -> Result<Json<Deletion<E::Id>>> {
    E::service(&state)
        .delete(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found::<E>(id))
}

fn not_found<E: CatalogEntity>(id: E::Id) -> AppError {
    AppError::NotFound(format!("{} {id}", E::KIND))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bugstore_core::{CustomerId, ProductId};

    use super::*;
    use crate::models::CustomerFields;

    #[test]
    fn test_listing_uses_collection_key() {
        let json = serde_json::to_value(Listing::<Customer>(vec![])).unwrap();
        assert_eq!(json, serde_json::json!({ "customers": [] }));

        let json = serde_json::to_value(Listing::<Product>(vec![])).unwrap();
        assert_eq!(json, serde_json::json!({ "products": [] }));
    }

    #[test]
    fn test_update_request_splits_id_and_fields() {
        let id = ProductId::new();
        let body = serde_json::json!({
            "id": id,
            "title": "New Title",
            "description": "New Description",
            "slug": "new-slug",
            "price": 150
        });

        let request: UpdateRequest<Product> = serde_json::from_value(body).unwrap();
        assert_eq!(request.id, Some(id));
        assert_eq!(request.fields.title, "New Title");
        assert_eq!(request.fields.price.to_string(), "150");
    }

    #[test]
    fn test_update_request_without_id() {
        let request: UpdateRequest<Customer> =
            serde_json::from_value(serde_json::json!({ "name": "No Id" })).unwrap();
        assert!(request.id.is_none());
        assert_eq!(request.fields.name, "No Id");
    }

    #[test]
    fn test_update_request_default_fields() {
        let id = CustomerId::new();
        let request: UpdateRequest<Customer> =
            serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        assert_eq!(request.fields, CustomerFields::default());
    }

    #[test]
    fn test_collection_paths() {
        assert_eq!(collection_path::<Customer>(), "/v1/customers");
        assert_eq!(collection_path::<Product>(), "/v1/products");
    }
}
