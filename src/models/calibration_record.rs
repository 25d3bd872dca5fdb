use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::CalibrationResult;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calibration_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tool_id: i32,
    pub calibration_date: String,
    pub next_calibration_date: String,
    pub calibration_provider: Option<String>,
    pub certificate_no: Option<String>,
    pub certificate_url: Option<String>,
    pub result: CalibrationResult,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tool::Entity",
        from = "Column::ToolId",
        to = "super::tool::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Tool,
}

impl Related<super::tool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
