//! Repository implementations using SeaORM

pub mod stock_item_repository;
pub mod tool_repository;

pub use stock_item_repository::SeaOrmStockItemRepository;
pub use tool_repository::SeaOrmToolRepository;
