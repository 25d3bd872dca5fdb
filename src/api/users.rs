use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::DatabaseConnection;

use crate::auth::CurrentUser;
use crate::domain::access::ADMINS;
use crate::domain::DomainError;
use crate::models::user;
use crate::services::user_service;

pub async fn list_users(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
) -> Result<Json<Vec<user::Model>>, DomainError> {
    current.actor.require(ADMINS)?;
    Ok(Json(user_service::list_users(&db).await?))
}

pub async fn get_user(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<user::Model>, DomainError> {
    Ok(Json(user_service::get_user(&db, id).await?))
}
