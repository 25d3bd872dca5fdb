use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::ToolStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Human-facing asset code, e.g. `EL-MT-001`
    #[sea_orm(unique)]
    pub tool_id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub serial_no: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specification: Option<String>,
    /// ISO dates (`YYYY-MM-DD`)
    pub last_calibration_date: Option<String>,
    pub next_calibration_date: Option<String>,
    pub calibration_certificate_url: Option<String>,
    pub usage_procedure_url: Option<String>,
    pub status: ToolStatus,
    pub location: Option<String>,
    /// User responsible for the tool
    pub assigned_to: Option<i32>,
    pub barcode_data: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignedTo",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AssignedUser,
    #[sea_orm(has_many = "super::borrowing_detail::Entity")]
    BorrowingDetail,
    #[sea_orm(has_many = "super::calibration_record::Entity")]
    CalibrationRecord,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedUser.def()
    }
}

impl Related<super::borrowing_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BorrowingDetail.def()
    }
}

impl Related<super::calibration_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalibrationRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
