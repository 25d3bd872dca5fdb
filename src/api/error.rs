use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            DomainError::NotFound(msg)
            | DomainError::Forbidden(msg)
            | DomainError::Conflict(msg)
            | DomainError::Validation(msg) => msg,
            DomainError::Database(msg) => {
                tracing::error!("Request failed: {}", msg);
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
