use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "borrowing_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Row id of the parent borrowing (not the human code)
    pub borrowing_id: i32,
    pub tool_id: i32,
    pub quantity: i32,
    pub returned_quantity: i32,
    /// Condition noted on return
    pub condition: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::borrowing::Entity",
        from = "Column::BorrowingId",
        to = "super::borrowing::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Borrowing,
    #[sea_orm(
        belongs_to = "super::tool::Entity",
        from = "Column::ToolId",
        to = "super::tool::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Tool,
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl Related<super::tool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
