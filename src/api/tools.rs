use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::domain::access::{ADMINS, INVENTORY_EDITORS};
use crate::domain::{CreateToolInput, DomainError, UpdateToolInput};
use crate::infrastructure::AppState;
use crate::models::calibration_record;
use crate::models::tool::Model as Tool;
use crate::models::ToolStatus;
use crate::services::calibration_service::{self, CalibrationOutcome, RecordCalibrationInput};

#[utoipa::path(
    get,
    path = "/api/tools",
    responses((status = 200, description = "All tools ordered by code"))
)]
pub async fn list_tools(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<Tool>>, DomainError> {
    Ok(Json(state.tool_repo.find_all().await?))
}

pub async fn get_tool(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Tool>, DomainError> {
    state
        .tool_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| DomainError::not_found("Tool"))
}

pub async fn get_tool_by_code(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(tool_id): Path<String>,
) -> Result<Json<Tool>, DomainError> {
    state
        .tool_repo
        .find_by_code(&tool_id)
        .await?
        .map(Json)
        .ok_or_else(|| DomainError::not_found("Tool"))
}

pub async fn list_tools_by_status(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(status): Path<String>,
) -> Result<Json<Vec<Tool>>, DomainError> {
    let status: ToolStatus = status.parse().map_err(DomainError::Validation)?;
    Ok(Json(state.tool_repo.find_by_status(status).await?))
}

pub async fn list_calibration_due(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<Tool>>, DomainError> {
    let today = chrono::Utc::now().date_naive();
    Ok(Json(state.tool_repo.find_calibration_due(today).await?))
}

#[utoipa::path(
    post,
    path = "/api/tools",
    responses(
        (status = 201, description = "Tool registered"),
        (status = 403, description = "Role may not edit inventory"),
        (status = 409, description = "Tool ID already exists")
    )
)]
pub async fn create_tool(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<CreateToolInput>,
) -> Result<(StatusCode, Json<Tool>), DomainError> {
    current.actor.require(INVENTORY_EDITORS)?;

    let tool = state
        .tool_repo
        .create(input, Some(current.actor.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

pub async fn update_tool(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<UpdateToolInput>,
) -> Result<Json<Tool>, DomainError> {
    current.actor.require(INVENTORY_EDITORS)?;
    Ok(Json(state.tool_repo.update(id, input).await?))
}

pub async fn delete_tool(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, DomainError> {
    current.actor.require(ADMINS)?;

    match state.tool_repo.delete(id).await {
        Ok(()) | Err(DomainError::NotFound(_)) => {
            Ok(Json(json!({ "message": "Tool deleted successfully" })))
        }
        Err(e) => Err(e),
    }
}

pub async fn record_calibration(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<RecordCalibrationInput>,
) -> Result<(StatusCode, Json<CalibrationOutcome>), DomainError> {
    current.actor.require(INVENTORY_EDITORS)?;

    let outcome = calibration_service::record_calibration(&db, id, input).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn list_calibrations(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<calibration_record::Model>>, DomainError> {
    Ok(Json(calibration_service::calibration_history(&db, id).await?))
}
