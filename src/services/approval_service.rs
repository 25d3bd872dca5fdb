//! Approval Service - the three independent sign-off slots of a borrowing

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Actor, DomainError};
use crate::models::approval::{self, Entity as Approval};
use crate::models::borrowing::{self, Entity as Borrowing};
use crate::models::{ApprovalRole, ApprovalStatus, BorrowingStatus, UserRole};

/// Approve or reject request for one slot
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalDecision {
    /// Row id of the borrowing
    pub borrowing_id: i32,
    pub approver_role: ApprovalRole,
    pub signature_data: Option<String>,
    pub notes: Option<String>,
}

/// Result of a rejection: the signed slot and the now rejected borrowing
#[derive(Debug, Clone, Serialize)]
pub struct RejectionOutcome {
    pub approval: approval::Model,
    pub borrowing: borrowing::Model,
}

/// Accepts plain base64 or a `data:<mime>;base64,` URL. Returns the payload to store.
pub fn validate_signature(signature: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(raw) = signature.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    let payload = match raw.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, data)| data)
            .ok_or_else(|| {
                DomainError::Validation("Signature data URL must be base64 encoded".to_string())
            })?,
        None => raw.as_str(),
    };

    if payload.is_empty() || STANDARD.decode(payload.trim()).is_err() {
        return Err(DomainError::Validation(
            "Signature must be valid base64".to_string(),
        ));
    }

    Ok(Some(raw))
}

/// Approval slots of a borrowing
pub async fn list_for_borrowing(
    db: &DatabaseConnection,
    borrowing_id: i32,
) -> Result<Vec<approval::Model>, DomainError> {
    let approvals = Approval::find()
        .filter(approval::Column::BorrowingId.eq(borrowing_id))
        .order_by_asc(approval::Column::ApproverRole)
        .all(db)
        .await?;
    Ok(approvals)
}

async fn find_slot<C: ConnectionTrait>(
    conn: &C,
    borrowing_id: i32,
    role: ApprovalRole,
) -> Result<approval::Model, DomainError> {
    Approval::find()
        .filter(approval::Column::BorrowingId.eq(borrowing_id))
        .filter(approval::Column::ApproverRole.eq(role))
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound(format!(
                "No {} approval for borrowing {}",
                role, borrowing_id
            ))
        })
}

/// The slot of one role on a borrowing
pub async fn get_for_role(
    db: &DatabaseConnection,
    borrowing_id: i32,
    role: ApprovalRole,
) -> Result<approval::Model, DomainError> {
    find_slot(db, borrowing_id, role).await
}

/// Pending slots the caller can sign: their own role's, or every slot for admins
pub async fn pending_for(
    db: &DatabaseConnection,
    actor: &Actor,
) -> Result<Vec<approval::Model>, DomainError> {
    let mut condition = Condition::all().add(approval::Column::Status.eq(ApprovalStatus::Pending));

    match (actor.role, actor.role.approver_role()) {
        (UserRole::Admin, _) => {}
        (_, Some(role)) => condition = condition.add(approval::Column::ApproverRole.eq(role)),
        (_, None) => return Ok(Vec::new()),
    }

    let approvals = Approval::find()
        .filter(condition)
        .order_by_asc(approval::Column::CreatedAt)
        .order_by_asc(approval::Column::Id)
        .all(db)
        .await?;
    Ok(approvals)
}

fn sign(
    slot: approval::Model,
    status: ApprovalStatus,
    approver_id: i32,
    signature: Option<String>,
    notes: Option<String>,
) -> approval::ActiveModel {
    let now = chrono::Utc::now().to_rfc3339();
    let mut active: approval::ActiveModel = slot.into();
    active.status = Set(status);
    active.approver_id = Set(Some(approver_id));
    active.signature_data = Set(signature);
    active.signed_at = Set(Some(now.clone()));
    active.notes = Set(notes);
    active.updated_at = Set(now);
    active
}

/// Approve one slot. The other slots and the borrowing status are left alone.
pub async fn approve(
    db: &DatabaseConnection,
    approver_id: i32,
    decision: ApprovalDecision,
) -> Result<approval::Model, DomainError> {
    let signature = validate_signature(decision.signature_data)?;
    let slot = find_slot(db, decision.borrowing_id, decision.approver_role).await?;

    let updated = sign(
        slot,
        ApprovalStatus::Approved,
        approver_id,
        signature,
        decision.notes,
    )
    .update(db)
    .await?;

    tracing::info!(
        "Borrowing {}: {} slot approved by user {}",
        decision.borrowing_id,
        decision.approver_role,
        approver_id
    );

    Ok(updated)
}

/// Reject one slot and mark the whole borrowing rejected
pub async fn reject(
    db: &DatabaseConnection,
    approver_id: i32,
    decision: ApprovalDecision,
) -> Result<RejectionOutcome, DomainError> {
    let signature = validate_signature(decision.signature_data)?;

    let txn = db.begin().await?;

    let slot = find_slot(&txn, decision.borrowing_id, decision.approver_role).await?;
    let approval = sign(
        slot,
        ApprovalStatus::Rejected,
        approver_id,
        signature,
        decision.notes,
    )
    .update(&txn)
    .await?;

    let parent = Borrowing::find_by_id(decision.borrowing_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Borrowing"))?;

    let mut active: borrowing::ActiveModel = parent.into();
    active.status = Set(BorrowingStatus::Rejected);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    let borrowing = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        "Borrowing {} rejected by {} (user {})",
        borrowing.borrowing_id,
        decision.approver_role,
        approver_id
    );

    Ok(RejectionOutcome {
        approval,
        borrowing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_absent_or_blank() {
        assert_eq!(validate_signature(None).unwrap(), None);
        assert_eq!(validate_signature(Some("  ".to_string())).unwrap(), None);
    }

    #[test]
    fn test_signature_plain_and_data_url() {
        let plain = STANDARD.encode(b"signature-bytes");
        assert_eq!(
            validate_signature(Some(plain.clone())).unwrap(),
            Some(plain.clone())
        );

        let url = format!("data:image/png;base64,{}", plain);
        assert_eq!(validate_signature(Some(url.clone())).unwrap(), Some(url));
    }

    #[test]
    fn test_signature_rejects_garbage() {
        assert!(matches!(
            validate_signature(Some("not base64 at all!".to_string())),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_signature(Some("data:image/png,abc".to_string())),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_signature(Some("data:image/png;base64,".to_string())),
            Err(DomainError::Validation(_))
        ));
    }
}
