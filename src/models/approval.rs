use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::{ApprovalRole, ApprovalStatus};

/// One signature slot of a borrowing. Unique per (borrowing_id, approver_role).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "approvals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub borrowing_id: i32,
    pub approver_role: ApprovalRole,
    /// User who signed; None while pending
    pub approver_id: Option<i32>,
    pub status: ApprovalStatus,
    /// Base64 signature image
    pub signature_data: Option<String>,
    pub signed_at: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
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
        belongs_to = "super::user::Entity",
        from = "Column::ApproverId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Approver,
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
