//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The API layer maps each variant onto one HTTP status.

use std::fmt;

use sea_orm::SqlErr;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound(String),
    /// Caller's role is not allowed to perform the operation
    Forbidden(String),
    /// Duplicate identifier or other uniqueness clash
    Conflict(String),
    /// Invalid input or a business rule rejected the request
    Validation(String),
    /// Database/persistence error
    Database(String),
}

impl DomainError {
    pub fn not_found(what: &str) -> Self {
        DomainError::NotFound(format!("{} not found", what))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "{}", msg),
            DomainError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Conflict(msg),
            _ => DomainError::Database(e.to_string()),
        }
    }
}
