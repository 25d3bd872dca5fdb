//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{StockItemRepository, ToolRepository};
use crate::infrastructure::{SeaOrmStockItemRepository, SeaOrmToolRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Tool registry
    pub tool_repo: Arc<dyn ToolRepository>,
    /// Consumable stock
    pub stock_repo: Arc<dyn StockItemRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let tool_repo = Arc::new(SeaOrmToolRepository::new(db.clone()));
        let stock_repo = Arc::new(SeaOrmStockItemRepository::new(db.clone()));

        Self {
            db,
            tool_repo,
            stock_repo,
        }
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
