//! Services Layer
//!
//! Business logic behind the HTTP handlers. Every service takes the
//! database connection explicitly and returns `DomainError` on failure;
//! role checks happen in the handlers before a service is called.

pub mod analytics_service;
pub mod approval_service;
pub mod borrowing_service;
pub mod calibration_service;
pub mod settings_service;
pub mod stock_usage_service;
pub mod user_service;
