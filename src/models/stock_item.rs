use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::StockStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub item_id: String,
    pub name: String,
    pub description: Option<String>,
    /// pcs, box, meter...
    pub unit: Option<String>,
    pub quantity: i32,
    /// Quantity at or below which the item is reported as low stock
    pub min_threshold: i32,
    pub max_threshold: i32,
    /// Decimal kept as text, e.g. "12500.00"
    pub unit_price: Option<String>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub status: StockStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_usage::Entity")]
    StockUsage,
}

impl Related<super::stock_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
