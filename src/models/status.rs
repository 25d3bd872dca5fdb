//! String-backed enums shared by the entities.
//!
//! Every enum is stored as its snake_case name in a TEXT column and
//! serialized the same way over the API.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role attached to every user account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "lab_supervisor")]
    LabSupervisor,
    #[sea_orm(string_value = "coordinator")]
    Coordinator,
    #[sea_orm(string_value = "sm_operasi")]
    SmOperasi,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
            UserRole::LabSupervisor => "lab_supervisor",
            UserRole::Coordinator => "coordinator",
            UserRole::SmOperasi => "sm_operasi",
        }
    }

    /// The approval slot this role signs, if any.
    pub fn approver_role(&self) -> Option<ApprovalRole> {
        match self {
            UserRole::LabSupervisor => Some(ApprovalRole::LabSupervisor),
            UserRole::Coordinator => Some(ApprovalRole::Coordinator),
            UserRole::SmOperasi => Some(ApprovalRole::SmOperasi),
            UserRole::User | UserRole::Admin => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            "lab_supervisor" => Ok(UserRole::LabSupervisor),
            "coordinator" => Ok(UserRole::Coordinator),
            "sm_operasi" => Ok(UserRole::SmOperasi),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// The three fixed approval slots of a borrowing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalRole {
    #[sea_orm(string_value = "lab_supervisor")]
    LabSupervisor,
    #[sea_orm(string_value = "coordinator")]
    Coordinator,
    #[sea_orm(string_value = "sm_operasi")]
    SmOperasi,
}

impl ApprovalRole {
    /// Creation order of the approval rows.
    pub const ALL: [ApprovalRole; 3] = [
        ApprovalRole::LabSupervisor,
        ApprovalRole::Coordinator,
        ApprovalRole::SmOperasi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalRole::LabSupervisor => "lab_supervisor",
            ApprovalRole::Coordinator => "coordinator",
            ApprovalRole::SmOperasi => "sm_operasi",
        }
    }
}

impl fmt::Display for ApprovalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lab_supervisor" => Ok(ApprovalRole::LabSupervisor),
            "coordinator" => Ok(ApprovalRole::Coordinator),
            "sm_operasi" => Ok(ApprovalRole::SmOperasi),
            other => Err(format!("Unknown approver role: {}", other)),
        }
    }
}

impl From<ApprovalRole> for UserRole {
    fn from(role: ApprovalRole) -> Self {
        match role {
            ApprovalRole::LabSupervisor => UserRole::LabSupervisor,
            ApprovalRole::Coordinator => UserRole::Coordinator,
            ApprovalRole::SmOperasi => UserRole::SmOperasi,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum BorrowingStatus {
    #[default]
    #[sea_orm(string_value = "pending_approval")]
    PendingApproval,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "borrowed")]
    Borrowed,
    #[sea_orm(string_value = "returned")]
    Returned,
    #[sea_orm(string_value = "overdue")]
    Overdue,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "in_use")]
    InUse,
    #[sea_orm(string_value = "needs_calibration")]
    NeedsCalibration,
    #[sea_orm(string_value = "damaged")]
    Damaged,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
}

impl FromStr for ToolStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ToolStatus::Available),
            "in_use" => Ok(ToolStatus::InUse),
            "needs_calibration" => Ok(ToolStatus::NeedsCalibration),
            "damaged" => Ok(ToolStatus::Damaged),
            "maintenance" => Ok(ToolStatus::Maintenance),
            other => Err(format!("Unknown tool status: {}", other)),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "low_stock")]
    LowStock,
    #[sea_orm(string_value = "out_of_stock")]
    OutOfStock,
}

impl StockStatus {
    /// Status for a stock level: empty wins over low, low is inclusive of the threshold.
    pub fn classify(quantity: i32, min_threshold: i32) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= min_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::Available
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum CalibrationResult {
    #[sea_orm(string_value = "passed")]
    Passed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "conditional")]
    Conditional,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_stock_levels() {
        assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(1, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(6, 5), StockStatus::Available);
        // A zero threshold never reports low stock.
        assert_eq!(StockStatus::classify(1, 0), StockStatus::Available);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("sm_operasi".parse::<UserRole>(), Ok(UserRole::SmOperasi));
        assert!("root".parse::<UserRole>().is_err());
        assert_eq!(
            "coordinator".parse::<ApprovalRole>(),
            Ok(ApprovalRole::Coordinator)
        );
        assert!("admin".parse::<ApprovalRole>().is_err());
    }

    #[test]
    fn test_approver_role_mapping() {
        for role in ApprovalRole::ALL {
            let user_role = UserRole::from(role);
            assert_eq!(user_role.approver_role(), Some(role));
        }
        assert_eq!(UserRole::Admin.approver_role(), None);
        assert_eq!(UserRole::User.approver_role(), None);
    }

    #[test]
    fn test_serde_names_match_storage() {
        assert_eq!(
            serde_json::to_string(&BorrowingStatus::PendingApproval).unwrap(),
            "\"pending_approval\""
        );
        assert_eq!(
            serde_json::from_str::<ToolStatus>("\"needs_calibration\"").unwrap(),
            ToolStatus::NeedsCalibration
        );
    }
}
