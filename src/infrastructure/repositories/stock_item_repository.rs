//! SeaORM implementation of StockItemRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CreateStockItemInput, DomainError, StockItemRepository, UpdateStockItemInput};
use crate::models::stock_item::{ActiveModel, Column, Entity as StockItemEntity, Model as StockItem};
use crate::models::StockStatus;

/// SeaORM-based implementation of StockItemRepository
pub struct SeaOrmStockItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmStockItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn validate_levels(quantity: i32, min_threshold: i32, max_threshold: i32) -> Result<(), DomainError> {
    if quantity < 0 || min_threshold < 0 || max_threshold < 0 {
        return Err(DomainError::Validation(
            "Quantity and thresholds cannot be negative".to_string(),
        ));
    }
    if min_threshold > max_threshold {
        return Err(DomainError::Validation(
            "Minimum threshold cannot exceed maximum threshold".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl StockItemRepository for SeaOrmStockItemRepository {
    async fn find_all(&self) -> Result<Vec<StockItem>, DomainError> {
        let items = StockItemEntity::find()
            .order_by_asc(Column::ItemId)
            .all(&self.db)
            .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<StockItem>, DomainError> {
        Ok(StockItemEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_low_stock(&self) -> Result<Vec<StockItem>, DomainError> {
        let items = StockItemEntity::find()
            .filter(Expr::col(Column::Quantity).lte(Expr::col(Column::MinThreshold)))
            .order_by_asc(Column::Quantity)
            .all(&self.db)
            .await?;
        Ok(items)
    }

    async fn create(&self, input: CreateStockItemInput) -> Result<StockItem, DomainError> {
        let code = input.item_id.trim().to_string();
        if code.is_empty() || input.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Item ID and name are required".to_string(),
            ));
        }
        validate_levels(input.quantity, input.min_threshold, input.max_threshold)?;

        let existing = StockItemEntity::find()
            .filter(Column::ItemId.eq(&code))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(DomainError::Conflict("Item ID already exists".to_string()));
        }

        let now = chrono::Utc::now().to_rfc3339();

        let new_item = ActiveModel {
            item_id: Set(code),
            name: Set(input.name),
            description: Set(input.description),
            unit: Set(input.unit),
            quantity: Set(input.quantity),
            min_threshold: Set(input.min_threshold),
            max_threshold: Set(input.max_threshold),
            unit_price: Set(input.unit_price),
            supplier: Set(input.supplier),
            location: Set(input.location),
            status: Set(StockStatus::classify(input.quantity, input.min_threshold)),
            notes: Set(input.notes),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let item = new_item.insert(&self.db).await?;
        tracing::info!(
            "Stock item {} created with quantity {}",
            item.item_id,
            item.quantity
        );

        Ok(item)
    }

    async fn update(
        &self,
        id: i32,
        input: UpdateStockItemInput,
    ) -> Result<StockItem, DomainError> {
        let existing = StockItemEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Stock item"))?;

        let quantity = input.quantity.unwrap_or(existing.quantity);
        let min_threshold = input.min_threshold.unwrap_or(existing.min_threshold);
        let max_threshold = input.max_threshold.unwrap_or(existing.max_threshold);
        validate_levels(quantity, min_threshold, max_threshold)?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(unit) = input.unit {
            active.unit = Set(Some(unit));
        }
        if let Some(unit_price) = input.unit_price {
            active.unit_price = Set(Some(unit_price));
        }
        if let Some(supplier) = input.supplier {
            active.supplier = Set(Some(supplier));
        }
        if let Some(location) = input.location {
            active.location = Set(Some(location));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.quantity = Set(quantity);
        active.min_threshold = Set(min_threshold);
        active.max_threshold = Set(max_threshold);
        active.status = Set(StockStatus::classify(quantity, min_threshold));
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = StockItemEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Stock item"));
        }

        tracing::info!("Stock item {} deleted", id);
        Ok(())
    }
}
