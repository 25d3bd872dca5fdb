use axum::{
    extract::{Query, State},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::auth::CurrentUser;
use crate::domain::DomainError;
use crate::services::analytics_service::{self, ToolUsageSummary, DEFAULT_MOST_USED_LIMIT};

#[derive(Deserialize)]
pub struct LimitQuery {
    limit: Option<u64>,
}

pub async fn most_used_tools(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<ToolUsageSummary>>, DomainError> {
    let limit = query.limit.unwrap_or(DEFAULT_MOST_USED_LIMIT);
    Ok(Json(analytics_service::most_used_tools(&db, limit).await?))
}

pub async fn tool_borrowing_stats(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
) -> Result<Json<BTreeMap<i32, u64>>, DomainError> {
    Ok(Json(analytics_service::tool_borrowing_stats(&db).await?))
}

pub async fn stock_usage_stats(
    State(db): State<DatabaseConnection>,
    _current: CurrentUser,
) -> Result<Json<BTreeMap<i32, u64>>, DomainError> {
    Ok(Json(analytics_service::stock_usage_stats(&db).await?))
}
