use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::auth::CurrentUser;
use crate::domain::DomainError;
use crate::models::stock_usage;
use crate::services::stock_usage_service::{self, RecordUsageInput};

#[utoipa::path(
    post,
    path = "/api/stock-usages",
    responses(
        (status = 201, description = "Usage recorded and stock decremented"),
        (status = 400, description = "Insufficient stock"),
        (status = 404, description = "Stock item not found")
    )
)]
pub async fn record_usage(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
    Json(input): Json<RecordUsageInput>,
) -> Result<(StatusCode, Json<stock_usage::Model>), DomainError> {
    let usage = stock_usage_service::record_usage(&db, current.actor.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(usage)))
}

pub async fn list_for_item(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(item_id): Path<i32>,
) -> Result<Json<Vec<stock_usage::Model>>, DomainError> {
    Ok(Json(stock_usage_service::list_for_item(&db, item_id).await?))
}

pub async fn list_my_usages(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
) -> Result<Json<Vec<stock_usage::Model>>, DomainError> {
    Ok(Json(
        stock_usage_service::list_for_user(&db, current.actor.user_id).await?,
    ))
}
