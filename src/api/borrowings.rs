use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::domain::access::{BORROWING_STATUS_EDITORS, PENDING_QUEUE_VIEWERS};
use crate::domain::DomainError;
use crate::models::borrowing;
use crate::models::BorrowingStatus;
use crate::services::borrowing_service::{
    self, BorrowingSummary, BorrowingView, CreateBorrowingInput, DetailView,
};

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: BorrowingStatus,
}

#[utoipa::path(
    get,
    path = "/api/borrowings",
    responses((status = 200, description = "All borrowings, newest first"))
)]
pub async fn list_borrowings(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
) -> Result<Json<Vec<BorrowingSummary>>, DomainError> {
    Ok(Json(borrowing_service::list_borrowings(&db).await?))
}

pub async fn get_borrowing(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<BorrowingView>, DomainError> {
    Ok(Json(borrowing_service::get_borrowing(&db, id).await?))
}

pub async fn get_borrowing_by_code(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<BorrowingView>, DomainError> {
    Ok(Json(borrowing_service::get_by_code(&db, &code).await?))
}

pub async fn list_my_borrowings(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
) -> Result<Json<Vec<BorrowingSummary>>, DomainError> {
    Ok(Json(
        borrowing_service::list_for_borrower(&db, current.actor.user_id).await?,
    ))
}

pub async fn list_pending_borrowings(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
) -> Result<Json<Vec<BorrowingSummary>>, DomainError> {
    current.actor.require(PENDING_QUEUE_VIEWERS)?;
    Ok(Json(borrowing_service::list_pending(&db).await?))
}

#[utoipa::path(
    post,
    path = "/api/borrowings",
    responses(
        (status = 201, description = "Borrowing created with three pending approvals"),
        (status = 400, description = "Empty identifier or wrong number of tools"),
        (status = 404, description = "Unknown tool"),
        (status = 409, description = "Borrowing ID already exists")
    )
)]
pub async fn create_borrowing(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
    Json(input): Json<CreateBorrowingInput>,
) -> Result<(StatusCode, Json<borrowing::Model>), DomainError> {
    let created = borrowing_service::create_borrowing(&db, current.actor.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_borrowing_status(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<borrowing::Model>, DomainError> {
    current.actor.require(BORROWING_STATUS_EDITORS)?;
    Ok(Json(
        borrowing_service::update_status(&db, id, update.status).await?,
    ))
}

pub async fn list_borrowing_details(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<DetailView>>, DomainError> {
    Ok(Json(borrowing_service::list_details(&db, id).await?))
}
