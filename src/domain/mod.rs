//! Domain layer - business abstractions
//!
//! Repository trait definitions, caller identity and domain error types.
//! Implementations live in the infrastructure layer.

pub mod access;
pub mod errors;
pub mod repositories;

pub use access::Actor;
pub use errors::DomainError;
pub use repositories::*;
