pub mod app_setting;
pub mod approval;
pub mod borrowing;
pub mod borrowing_detail;
pub mod calibration_record;
pub mod status;
pub mod stock_item;
pub mod stock_usage;
pub mod tool;
pub mod tool_usage;
pub mod user;

pub use status::{
    ApprovalRole, ApprovalStatus, BorrowingStatus, CalibrationResult, StockStatus, ToolStatus,
    UserRole,
};
