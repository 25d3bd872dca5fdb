use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_usages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub usage_id: String,
    pub item_id: i32,
    pub used_by: i32,
    pub quantity: i32,
    pub usage_date: String,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_item::Entity",
        from = "Column::ItemId",
        to = "super::stock_item::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    StockItem,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UsedBy",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
}

impl Related<super::stock_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockItem.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
