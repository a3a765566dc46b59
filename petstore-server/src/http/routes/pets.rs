//! Pet endpoints
//!
//! Every handler runs inside exactly one transaction: begin, attach the
//! repository, make one call, commit. An early return drops the transaction
//! uncommitted, which rolls it back. Input is extracted before `begin()`, so
//! a malformed request never touches the database.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::PetRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::AppState;
use crate::models::{Pet, ValidationError};

/// GET /pets - list all pets
async fn list_pets(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Pet>>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let pets = PetRepo::new(&mut tx).list().await?;
    tx.commit().await?;

    Ok(Json(pets))
}

/// GET /pets/{id} - get a single pet
async fn get_pet(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Pet>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let pet = PetRepo::new(&mut tx)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "pet",
            id: id.to_string(),
        })?;
    tx.commit().await?;

    Ok(Json(pet))
}

/// POST /pets - create a pet, the database assigns its id
async fn create_pet(
    State(state): State<Arc<AppState>>,
    JsonBody(pet): JsonBody<Pet>,
) -> Result<Json<Pet>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let id = PetRepo::new(&mut tx).insert(&pet).await?;
    tx.commit().await?;

    tracing::info!(id, name = %pet.name, "pet created");
    Ok(Json(pet.with_id(id)))
}

/// PUT /pets - rename an existing pet
async fn update_pet(
    State(state): State<Arc<AppState>>,
    JsonBody(pet): JsonBody<Pet>,
) -> Result<Json<Pet>, ApiError> {
    if pet.id.is_none() {
        return Err(ValidationError::Missing { field: "id" }.into());
    }

    let mut tx = state.pool.begin().await?;
    PetRepo::new(&mut tx).update(&pet).await?;
    tx.commit().await?;

    Ok(Json(pet))
}

/// DELETE /pets/{id} - delete a pet
async fn delete_pet(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    let mut tx = state.pool.begin().await?;
    PetRepo::new(&mut tx).delete_by_id(id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Pet routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet).put(update_pet))
        .route("/pets/{id}", get(get_pet).delete(delete_pet))
}
