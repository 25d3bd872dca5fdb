use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

use axum::{
    async_trait,
    extract::{FromRequestParts, Json},
    http::{request::Parts, StatusCode},
};
use serde_json::json;

use crate::domain::Actor;
use crate::models::UserRole;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: String,
    pub name: Option<String>,
    pub exp: usize,
}

impl Claims {
    /// Resolve the claims into the caller of a domain operation
    pub fn actor(&self) -> Result<Actor, String> {
        let user_id = self
            .sub
            .parse::<i32>()
            .map_err(|_| format!("Invalid subject: {}", self.sub))?;
        let role = self.role.parse::<UserRole>()?;
        Ok(Actor::new(user_id, role))
    }
}

/// Authenticated caller, extracted from the `Authorization: Bearer` header
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub actor: Actor,
    pub name: Option<String>,
}

fn unauthorized(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message })))
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization header format"))?;

        let claims = decode_jwt(token).map_err(|_| unauthorized("Invalid or expired token"))?;
        let actor = claims.actor().map_err(|e| {
            tracing::warn!("Rejected token with bad claims: {}", e);
            unauthorized("Invalid or expired token")
        })?;

        Ok(CurrentUser {
            actor,
            name: claims.name,
        })
    }
}

fn get_jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "secret".to_string()
        } else {
            panic!("JWT_SECRET environment variable must be set in production");
        }
    })
}

pub fn create_jwt(user_id: i32, role: UserRole, name: Option<&str>) -> Result<String, String> {
    let secret = get_jwt_secret();
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| "Token expiry overflow".to_string())?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.as_str().to_owned(),
        name: name.map(str::to_owned),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

pub fn decode_jwt(token: &str) -> Result<Claims, String> {
    let secret = get_jwt_secret();
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
