//! Analytics Service - usage counters over tools and stock

use sea_orm::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::DomainError;
use crate::models::borrowing_detail::Entity as BorrowingDetail;
use crate::models::stock_item::Entity as StockItem;
use crate::models::stock_usage::Entity as StockUsage;
use crate::models::tool;
use crate::models::tool_usage::{self, Entity as ToolUsage};

pub const DEFAULT_MOST_USED_LIMIT: u64 = 10;

#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct ToolUsageSummary {
    pub tool_id: i32,
    pub tool_code: String,
    pub tool_name: String,
    pub usage_count: i64,
    pub last_used_date: String,
}

/// Tools ranked by recorded checkouts
pub async fn most_used_tools(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<ToolUsageSummary>, DomainError> {
    let ranked = ToolUsage::find()
        .select_only()
        .column(tool_usage::Column::ToolId)
        .column_as(tool::Column::ToolId, "tool_code")
        .column_as(tool::Column::Name, "tool_name")
        .column_as(tool_usage::Column::UsageCount.sum(), "usage_count")
        .column_as(tool_usage::Column::LastUsedDate.max(), "last_used_date")
        .join(JoinType::InnerJoin, tool_usage::Relation::Tool.def())
        .group_by(tool_usage::Column::ToolId)
        .group_by(tool::Column::ToolId)
        .group_by(tool::Column::Name)
        .order_by_desc(tool_usage::Column::UsageCount.sum())
        .order_by_asc(tool::Column::ToolId)
        .limit(limit)
        .into_model::<ToolUsageSummary>()
        .all(db)
        .await?;

    Ok(ranked)
}

/// Number of borrowing lines per tool id
pub async fn tool_borrowing_stats(
    db: &DatabaseConnection,
) -> Result<BTreeMap<i32, u64>, DomainError> {
    let mut stats = BTreeMap::new();
    for detail in BorrowingDetail::find().all(db).await? {
        *stats.entry(detail.tool_id).or_insert(0) += 1;
    }
    Ok(stats)
}

/// Number of usage records per stock item id; unused items report zero
pub async fn stock_usage_stats(db: &DatabaseConnection) -> Result<BTreeMap<i32, u64>, DomainError> {
    let mut stats: BTreeMap<i32, u64> = StockItem::find()
        .all(db)
        .await?
        .into_iter()
        .map(|item| (item.id, 0))
        .collect();

    for usage in StockUsage::find().all(db).await? {
        *stats.entry(usage.item_id).or_insert(0) += 1;
    }
    Ok(stats)
}
