//! Stock Usage Service - consuming stock with a guarded decrement

use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::stock_item::{self, Entity as StockItem};
use crate::models::stock_usage::{self, Entity as StockUsage};
use crate::models::StockStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct RecordUsageInput {
    /// Generated when omitted
    pub usage_id: Option<String>,
    pub item_id: i32,
    pub quantity: i32,
    pub usage_date: NaiveDate,
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

fn insufficient_stock() -> DomainError {
    DomainError::Validation("Insufficient stock".to_string())
}

/// Record a usage and decrement the item in one transaction
pub async fn record_usage(
    db: &DatabaseConnection,
    used_by: i32,
    input: RecordUsageInput,
) -> Result<stock_usage::Model, DomainError> {
    if input.quantity < 1 {
        return Err(DomainError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let usage_id = match input.usage_id.map(|s| s.trim().to_string()) {
        Some(id) if !id.is_empty() => id,
        _ => format!("USG-{}", uuid::Uuid::new_v4()),
    };

    let txn = db.begin().await?;

    // 1. Item must exist and hold enough
    let item = StockItem::find_by_id(input.item_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Stock item"))?;

    if item.quantity < input.quantity {
        return Err(insufficient_stock());
    }

    let duplicate = StockUsage::find()
        .filter(stock_usage::Column::UsageId.eq(&usage_id))
        .one(&txn)
        .await?;
    if duplicate.is_some() {
        return Err(DomainError::Conflict("Usage ID already exists".to_string()));
    }

    // 2. Decrement only while enough remains
    let now = chrono::Utc::now().to_rfc3339();
    let result = StockItem::update_many()
        .col_expr(
            stock_item::Column::Quantity,
            Expr::col(stock_item::Column::Quantity).sub(input.quantity),
        )
        .col_expr(stock_item::Column::UpdatedAt, Expr::value(now.clone()))
        .filter(stock_item::Column::Id.eq(item.id))
        .filter(stock_item::Column::Quantity.gte(input.quantity))
        .exec(&txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(insufficient_stock());
    }

    // 3. Reclassify from the stored level
    let item = StockItem::find_by_id(item.id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Stock item"))?;
    let status = StockStatus::classify(item.quantity, item.min_threshold);
    let remaining = item.quantity;

    let mut active: stock_item::ActiveModel = item.into();
    active.status = Set(status);
    active.update(&txn).await?;

    // 4. Usage record
    let usage = stock_usage::ActiveModel {
        usage_id: Set(usage_id),
        item_id: Set(input.item_id),
        used_by: Set(used_by),
        quantity: Set(input.quantity),
        usage_date: Set(input.usage_date.format("%Y-%m-%d").to_string()),
        purpose: Set(input.purpose),
        notes: Set(input.notes),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        "Stock item {} decremented by {} to {} ({:?})",
        input.item_id,
        input.quantity,
        remaining,
        status
    );

    Ok(usage)
}

/// Usages of one item, most recent first
pub async fn list_for_item(
    db: &DatabaseConnection,
    item_id: i32,
) -> Result<Vec<stock_usage::Model>, DomainError> {
    let usages = StockUsage::find()
        .filter(stock_usage::Column::ItemId.eq(item_id))
        .order_by_desc(stock_usage::Column::UsageDate)
        .order_by_desc(stock_usage::Column::Id)
        .all(db)
        .await?;
    Ok(usages)
}

/// Usages recorded by one user, most recent first
pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<stock_usage::Model>, DomainError> {
    let usages = StockUsage::find()
        .filter(stock_usage::Column::UsedBy.eq(user_id))
        .order_by_desc(stock_usage::Column::UsageDate)
        .order_by_desc(stock_usage::Column::Id)
        .all(db)
        .await?;
    Ok(usages)
}
