use crate::auth::{create_jwt, CurrentUser};
use crate::domain::DomainError;
use crate::models::user;
use crate::models::UserRole;
use crate::services::user_service;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct DevLoginRequest {
    name: String,
    #[serde(default = "default_role")]
    role: UserRole,
    open_id: Option<String>,
}

fn default_role() -> UserRole {
    UserRole::User
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    user: user::Model,
}

fn open_id_for(name: &str) -> String {
    let handle: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("dev-{}", handle)
}

/// Profile of the signed-in user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_me(
    State(db): State<DatabaseConnection>,
    current: CurrentUser,
) -> Result<Json<user::Model>, DomainError> {
    let account = user_service::get_user(&db, current.actor.user_id).await?;
    Ok(Json(account))
}

/// Tokens are stateless; the client simply drops it
pub async fn logout(_current: CurrentUser) -> Json<Value> {
    Json(json!({ "success": true }))
}

pub async fn dev_login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<DevLoginRequest>,
) -> impl IntoResponse {
    let open_id = payload
        .open_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| open_id_for(&payload.name));

    let account =
        match user_service::sign_in_dev_user(&db, &open_id, &payload.name, payload.role).await {
            Ok(account) => account,
            Err(e) => return e.into_response(),
        };

    match create_jwt(account.id, account.role, account.name.as_deref()) {
        Ok(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                token,
                user: account,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to issue token: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create token" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_id_from_name() {
        assert_eq!(open_id_for("Lab Supervisor"), "dev-lab-supervisor");
        assert_eq!(open_id_for("  admin "), "dev-admin");
    }
}
