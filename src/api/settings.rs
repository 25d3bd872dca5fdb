use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::DatabaseConnection;

use crate::auth::CurrentUser;
use crate::domain::access::ADMINS;
use crate::domain::DomainError;
use crate::models::app_setting;
use crate::services::settings_service::{self, SettingInput};

pub async fn list_settings(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
) -> Result<Json<Vec<app_setting::Model>>, DomainError> {
    current.actor.require(ADMINS)?;
    Ok(Json(settings_service::list_settings(&db).await?))
}

pub async fn get_setting(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Path(key): Path<String>,
) -> Result<Json<app_setting::Model>, DomainError> {
    Ok(Json(settings_service::get_setting(&db, &key).await?))
}

pub async fn put_setting(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
    Path(key): Path<String>,
    Json(input): Json<SettingInput>,
) -> Result<Json<app_setting::Model>, DomainError> {
    current.actor.require(ADMINS)?;
    Ok(Json(settings_service::set_setting(&db, &key, input).await?))
}
