use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::DatabaseConnection;

use crate::auth::CurrentUser;
use crate::domain::DomainError;
use crate::models::approval;
use crate::models::ApprovalRole;
use crate::services::approval_service::{self, ApprovalDecision, RejectionOutcome};

pub async fn list_for_borrowing(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(borrowing_id): Path<i32>,
) -> Result<Json<Vec<approval::Model>>, DomainError> {
    Ok(Json(
        approval_service::list_for_borrowing(&db, borrowing_id).await?,
    ))
}

pub async fn get_for_role(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path((borrowing_id, role)): Path<(i32, String)>,
) -> Result<Json<approval::Model>, DomainError> {
    let role: ApprovalRole = role.parse().map_err(DomainError::Validation)?;
    Ok(Json(
        approval_service::get_for_role(&db, borrowing_id, role).await?,
    ))
}

/// Pending slots the caller may sign
pub async fn list_pending_for_me(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
) -> Result<Json<Vec<approval::Model>>, DomainError> {
    Ok(Json(approval_service::pending_for(&db, &current.actor).await?))
}

#[utoipa::path(
    post,
    path = "/api/approvals/approve",
    responses(
        (status = 200, description = "Slot approved"),
        (status = 403, description = "Caller does not hold the approver role"),
        (status = 404, description = "No slot for this borrowing and role")
    )
)]
pub async fn approve(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
    Json(decision): Json<ApprovalDecision>,
) -> Result<Json<approval::Model>, DomainError> {
    current.actor.require_approver(decision.approver_role)?;
    Ok(Json(
        approval_service::approve(&db, current.actor.user_id, decision).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/approvals/reject",
    responses(
        (status = 200, description = "Slot and borrowing rejected"),
        (status = 403, description = "Caller does not hold the approver role"),
        (status = 404, description = "No slot for this borrowing and role")
    )
)]
pub async fn reject(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
    Json(decision): Json<ApprovalDecision>,
) -> Result<Json<RejectionOutcome>, DomainError> {
    current.actor.require_approver(decision.approver_role)?;
    Ok(Json(
        approval_service::reject(&db, current.actor.user_id, decision).await?,
    ))
}
