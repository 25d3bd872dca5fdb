use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::BorrowingStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tool_borrowings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Human-assigned code, e.g. `BRW-2024-001`
    #[sea_orm(unique)]
    pub borrowing_id: String,
    pub borrower_id: i32,
    pub borrow_date: String,
    pub expected_return_date: String,
    pub actual_return_date: Option<String>,
    pub purpose: Option<String>,
    pub status: BorrowingStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BorrowerId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Borrower,
    #[sea_orm(has_many = "super::borrowing_detail::Entity")]
    BorrowingDetail,
    #[sea_orm(has_many = "super::approval::Entity")]
    Approval,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrower.def()
    }
}

impl Related<super::borrowing_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BorrowingDetail.def()
    }
}

impl Related<super::approval::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approval.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
