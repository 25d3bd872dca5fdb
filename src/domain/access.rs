//! Caller identity and per-operation role allow-lists.

use super::DomainError;
use crate::models::{ApprovalRole, UserRole};

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Fails with `Forbidden` unless the caller's role is in `allowed`.
    pub fn require(&self, allowed: &[UserRole]) -> Result<(), DomainError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            tracing::warn!(
                "Forbidden: user {} with role {} (allowed: {:?})",
                self.user_id,
                self.role,
                allowed
            );
            Err(DomainError::Forbidden(format!(
                "role '{}' may not perform this operation",
                self.role
            )))
        }
    }

    /// Admins may sign any slot; everybody else only their own.
    pub fn require_approver(&self, slot: ApprovalRole) -> Result<(), DomainError> {
        if self.role == UserRole::Admin || self.role.approver_role() == Some(slot) {
            Ok(())
        } else {
            tracing::warn!(
                "Forbidden: user {} with role {} tried to sign the {} slot",
                self.user_id,
                self.role,
                slot
            );
            Err(DomainError::Forbidden(format!(
                "role '{}' may not sign as '{}'",
                self.role, slot
            )))
        }
    }
}

/// tools.create, tools.update, stock.create, stock.update, calibrations
pub const INVENTORY_EDITORS: &[UserRole] = &[UserRole::Admin, UserRole::LabSupervisor];

/// tools.delete, stock.delete, users.list, settings writes
pub const ADMINS: &[UserRole] = &[UserRole::Admin];

/// borrowings.getPending
pub const PENDING_QUEUE_VIEWERS: &[UserRole] =
    &[UserRole::Admin, UserRole::Coordinator, UserRole::SmOperasi];

/// borrowings.updateStatus
pub const BORROWING_STATUS_EDITORS: &[UserRole] = &[UserRole::Admin, UserRole::Coordinator];
