//! Repository trait definitions
//!
//! These traits define the contract for inventory data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::DomainError;
use crate::models::stock_item::Model as StockItem;
use crate::models::tool::Model as Tool;
use crate::models::ToolStatus;

/// Input for registering a tool
#[derive(Debug, Clone, Deserialize)]
pub struct CreateToolInput {
    pub tool_id: String,
    pub name: String,
    pub serial_no: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specification: Option<String>,
    pub last_calibration_date: Option<NaiveDate>,
    pub next_calibration_date: Option<NaiveDate>,
    pub calibration_certificate_url: Option<String>,
    pub usage_procedure_url: Option<String>,
    pub status: Option<ToolStatus>,
    pub location: Option<String>,
    pub barcode_data: Option<String>,
    pub notes: Option<String>,
}

/// Partial tool update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateToolInput {
    pub name: Option<String>,
    pub serial_no: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specification: Option<String>,
    pub last_calibration_date: Option<NaiveDate>,
    pub next_calibration_date: Option<NaiveDate>,
    pub calibration_certificate_url: Option<String>,
    pub usage_procedure_url: Option<String>,
    pub status: Option<ToolStatus>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Repository trait for Tool entity
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// All tools ordered by their code
    async fn find_all(&self) -> Result<Vec<Tool>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tool>, DomainError>;

    /// Lookup by the human-facing code
    async fn find_by_code(&self, tool_id: &str) -> Result<Option<Tool>, DomainError>;

    async fn find_by_status(&self, status: ToolStatus) -> Result<Vec<Tool>, DomainError>;

    /// Tools flagged for calibration or whose next calibration date is before `today`
    async fn find_calibration_due(&self, today: NaiveDate) -> Result<Vec<Tool>, DomainError>;

    /// Create a tool; `assigned_to` is the responsible user, if it exists
    async fn create(
        &self,
        input: CreateToolInput,
        assigned_to: Option<i32>,
    ) -> Result<Tool, DomainError>;

    async fn update(&self, id: i32, input: UpdateToolInput) -> Result<Tool, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

fn default_min_threshold() -> i32 {
    5
}

fn default_max_threshold() -> i32 {
    100
}

/// Input for creating a stock item
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStockItemInput {
    pub item_id: String,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default = "default_min_threshold")]
    pub min_threshold: i32,
    #[serde(default = "default_max_threshold")]
    pub max_threshold: i32,
    pub unit_price: Option<String>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Partial stock item update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStockItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<i32>,
    pub min_threshold: Option<i32>,
    pub max_threshold: Option<i32>,
    pub unit_price: Option<String>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Repository trait for StockItem entity
#[async_trait]
pub trait StockItemRepository: Send + Sync {
    /// All items ordered by their code
    async fn find_all(&self) -> Result<Vec<StockItem>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<StockItem>, DomainError>;

    /// Items at or below their minimum threshold, emptiest first
    async fn find_low_stock(&self) -> Result<Vec<StockItem>, DomainError>;

    async fn create(&self, input: CreateStockItemInput) -> Result<StockItem, DomainError>;

    /// Update an item; status is reclassified from the resulting quantity
    async fn update(&self, id: i32, input: UpdateStockItemInput)
    -> Result<StockItem, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
