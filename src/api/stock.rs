use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::domain::access::{ADMINS, INVENTORY_EDITORS};
use crate::domain::{CreateStockItemInput, DomainError, UpdateStockItemInput};
use crate::infrastructure::AppState;
use crate::models::stock_item::Model as StockItem;

#[utoipa::path(
    get,
    path = "/api/stock",
    responses((status = 200, description = "All stock items ordered by code"))
)]
pub async fn list_stock(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<StockItem>>, DomainError> {
    Ok(Json(state.stock_repo.find_all().await?))
}

pub async fn get_stock_item(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<StockItem>, DomainError> {
    state
        .stock_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| DomainError::not_found("Stock item"))
}

/// Items at or below their minimum threshold, emptiest first
#[utoipa::path(
    get,
    path = "/api/stock/low",
    responses((status = 200, description = "Low stock items"))
)]
pub async fn list_low_stock(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<StockItem>>, DomainError> {
    Ok(Json(state.stock_repo.find_low_stock().await?))
}

pub async fn create_stock_item(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<CreateStockItemInput>,
) -> Result<(StatusCode, Json<StockItem>), DomainError> {
    current.actor.require(INVENTORY_EDITORS)?;

    let item = state.stock_repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_stock_item(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<UpdateStockItemInput>,
) -> Result<Json<StockItem>, DomainError> {
    current.actor.require(INVENTORY_EDITORS)?;
    Ok(Json(state.stock_repo.update(id, input).await?))
}

pub async fn delete_stock_item(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, DomainError> {
    current.actor.require(ADMINS)?;

    match state.stock_repo.delete(id).await {
        Ok(()) | Err(DomainError::NotFound(_)) => {
            Ok(Json(json!({ "message": "Stock item deleted successfully" })))
        }
        Err(e) => Err(e),
    }
}
