use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::UserRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// External identity of the account (OAuth subject or dev-login handle)
    #[sea_orm(unique)]
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: UserRole,
    pub created_at: String,
    pub updated_at: String,
    pub last_signed_in: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::borrowing::Entity")]
    Borrowing,
    #[sea_orm(has_many = "super::stock_usage::Entity")]
    StockUsage,
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl Related<super::stock_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
