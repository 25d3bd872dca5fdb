use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Usage counter per (tool, borrowing), read by the analytics endpoints.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tool_usage_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tool_id: i32,
    pub borrowing_id: i32,
    pub usage_count: i32,
    pub last_used_date: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tool::Entity",
        from = "Column::ToolId",
        to = "super::tool::Column::Id"
    )]
    Tool,
    #[sea_orm(
        belongs_to = "super::borrowing::Entity",
        from = "Column::BorrowingId",
        to = "super::borrowing::Column::Id"
    )]
    Borrowing,
}

impl Related<super::tool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tool.def()
    }
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
