//! Item handlers

use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use itemhub_types::{CreateItemRequest, Item, ItemId, ItemPatch, NewItem};
use tracing::{debug, info};

/// A non-numeric id can never name an issued item
fn item_id(path: Result<Path<ItemId>, PathRejection>) -> Result<ItemId, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!("Rejected item id: {}", rejection.body_text());
            Err(ApiError::NotFound)
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list().await?;
    debug!("Listing {} items", items.len());
    Ok(Json(items))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let new_item = NewItem::try_from(req)?;

    let item = state.store.create(new_item).await?;
    info!("Created item {}", item.id);

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<ItemId>, PathRejection>,
    payload: Result<JsonBody<ItemPatch>, ApiError>,
) -> Result<Json<Item>, ApiError> {
    let id = item_id(path)?;
    let JsonBody(patch) = payload?;
    if patch.is_empty() {
        debug!("Update for item {} changes no fields", id);
    }

    let item = state
        .store
        .update(id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!("Updated item {}", id);

    Ok(Json(item))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<ItemId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(path)?;

    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!("Deleted item {}", id);

    Ok(StatusCode::NO_CONTENT)
}
