//! Borrowing Service - tool checkout requests and their approval slots

use chrono::NaiveDate;
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::models::approval::{self, Entity as Approval};
use crate::models::borrowing::{self, Entity as Borrowing};
use crate::models::borrowing_detail::{self, Entity as BorrowingDetail};
use crate::models::tool::{self, Entity as Tool};
use crate::models::tool_usage::{self, Entity as ToolUsage};
use crate::models::user::Entity as User;
use crate::models::{ApprovalRole, ApprovalStatus, BorrowingStatus};

pub const MAX_TOOLS_PER_BORROWING: usize = 5;

/// Payload for a new borrowing; the borrower is the calling user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBorrowingInput {
    pub borrowing_id: String,
    pub tool_ids: Vec<i32>,
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

/// Overall state of the three approval slots. Never written back to the borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalProgress {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalProgress {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ApprovalStatus>,
    {
        let mut approved = 0;
        for status in statuses {
            match status {
                ApprovalStatus::Rejected => return ApprovalProgress::Rejected,
                ApprovalStatus::Approved => approved += 1,
                ApprovalStatus::Pending => {}
            }
        }
        if approved >= ApprovalRole::ALL.len() {
            ApprovalProgress::Approved
        } else {
            ApprovalProgress::Pending
        }
    }
}

/// Borrowing row as listed, with the borrower's display name
#[derive(Debug, Clone, Serialize)]
pub struct BorrowingSummary {
    #[serde(flatten)]
    pub borrowing: borrowing::Model,
    pub borrower_name: Option<String>,
}

/// Reserved tool line with the tool's code and name
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    #[serde(flatten)]
    pub detail: borrowing_detail::Model,
    pub tool_code: Option<String>,
    pub tool_name: Option<String>,
}

/// Full borrowing: details, approval slots and derived progress
#[derive(Debug, Clone, Serialize)]
pub struct BorrowingView {
    #[serde(flatten)]
    pub borrowing: borrowing::Model,
    pub borrower_name: Option<String>,
    pub details: Vec<DetailView>,
    pub approvals: Vec<approval::Model>,
    pub approval_progress: ApprovalProgress,
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Create a borrowing with one detail per tool and three pending approvals
pub async fn create_borrowing(
    db: &DatabaseConnection,
    borrower_id: i32,
    input: CreateBorrowingInput,
) -> Result<borrowing::Model, DomainError> {
    let code = input.borrowing_id.trim().to_string();
    if code.is_empty() {
        return Err(DomainError::Validation(
            "Borrowing ID is required".to_string(),
        ));
    }
    if input.tool_ids.is_empty() || input.tool_ids.len() > MAX_TOOLS_PER_BORROWING {
        return Err(DomainError::Validation(format!(
            "A borrowing must list between 1 and {} tools",
            MAX_TOOLS_PER_BORROWING
        )));
    }

    let txn = db.begin().await?;

    // 1. Identifier must be free
    let existing = Borrowing::find()
        .filter(borrowing::Column::BorrowingId.eq(&code))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(DomainError::Conflict(
            "Borrowing ID already exists".to_string(),
        ));
    }

    // 2. Every tool must exist
    let known: Vec<i32> = Tool::find()
        .filter(tool::Column::Id.is_in(input.tool_ids.clone()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();
    if let Some(missing) = input.tool_ids.iter().find(|id| !known.contains(id)) {
        return Err(DomainError::NotFound(format!("Tool {} not found", missing)));
    }

    let now = chrono::Utc::now().to_rfc3339();

    // 3. Borrowing row
    let created = borrowing::ActiveModel {
        borrowing_id: Set(code),
        borrower_id: Set(borrower_id),
        borrow_date: Set(iso_date(input.borrow_date)),
        expected_return_date: Set(iso_date(input.expected_return_date)),
        actual_return_date: Set(None),
        purpose: Set(input.purpose),
        status: Set(BorrowingStatus::PendingApproval),
        notes: Set(input.notes),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    // 4. One detail per tool
    for tool_id in &input.tool_ids {
        borrowing_detail::ActiveModel {
            borrowing_id: Set(created.id),
            tool_id: Set(*tool_id),
            quantity: Set(1),
            returned_quantity: Set(0),
            condition: Set(None),
            created_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    // 5. One pending approval per fixed role
    for role in ApprovalRole::ALL {
        approval::ActiveModel {
            borrowing_id: Set(created.id),
            approver_role: Set(role),
            approver_id: Set(None),
            status: Set(ApprovalStatus::Pending),
            signature_data: Set(None),
            signed_at: Set(None),
            notes: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        "Borrowing {} created by user {} with {} tool(s)",
        created.borrowing_id,
        borrower_id,
        input.tool_ids.len()
    );

    Ok(created)
}

async fn summaries(
    db: &DatabaseConnection,
    select: Select<Borrowing>,
) -> Result<Vec<BorrowingSummary>, DomainError> {
    let rows = select.find_also_related(User).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|(borrowing, borrower)| BorrowingSummary {
            borrowing,
            borrower_name: borrower.and_then(|u| u.name),
        })
        .collect())
}

/// All borrowings, newest borrow date first
pub async fn list_borrowings(db: &DatabaseConnection) -> Result<Vec<BorrowingSummary>, DomainError> {
    summaries(
        db,
        Borrowing::find().order_by_desc(borrowing::Column::BorrowDate),
    )
    .await
}

/// Borrowings requested by one user
pub async fn list_for_borrower(
    db: &DatabaseConnection,
    borrower_id: i32,
) -> Result<Vec<BorrowingSummary>, DomainError> {
    summaries(
        db,
        Borrowing::find()
            .filter(borrowing::Column::BorrowerId.eq(borrower_id))
            .order_by_desc(borrowing::Column::BorrowDate),
    )
    .await
}

/// Borrowings still waiting for approval, oldest first
pub async fn list_pending(db: &DatabaseConnection) -> Result<Vec<BorrowingSummary>, DomainError> {
    summaries(
        db,
        Borrowing::find()
            .filter(borrowing::Column::Status.eq(BorrowingStatus::PendingApproval))
            .order_by_asc(borrowing::Column::BorrowDate),
    )
    .await
}

/// Detail lines of a borrowing with tool code and name
pub async fn list_details(
    db: &DatabaseConnection,
    borrowing_id: i32,
) -> Result<Vec<DetailView>, DomainError> {
    Borrowing::find_by_id(borrowing_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("Borrowing"))?;

    details_of(db, borrowing_id).await
}

async fn details_of(
    db: &DatabaseConnection,
    borrowing_id: i32,
) -> Result<Vec<DetailView>, DomainError> {
    let rows = BorrowingDetail::find()
        .filter(borrowing_detail::Column::BorrowingId.eq(borrowing_id))
        .order_by_asc(borrowing_detail::Column::Id)
        .find_also_related(Tool)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(detail, tool)| DetailView {
            detail,
            tool_code: tool.as_ref().map(|t| t.tool_id.clone()),
            tool_name: tool.map(|t| t.name),
        })
        .collect())
}

async fn build_view(
    db: &DatabaseConnection,
    borrowing: borrowing::Model,
) -> Result<BorrowingView, DomainError> {
    let borrower_name = User::find_by_id(borrowing.borrower_id)
        .one(db)
        .await?
        .and_then(|u| u.name);

    let details = details_of(db, borrowing.id).await?;

    let approvals = Approval::find()
        .filter(approval::Column::BorrowingId.eq(borrowing.id))
        .order_by_asc(approval::Column::ApproverRole)
        .all(db)
        .await?;

    let approval_progress = ApprovalProgress::from_statuses(approvals.iter().map(|a| a.status));

    Ok(BorrowingView {
        borrowing,
        borrower_name,
        details,
        approvals,
        approval_progress,
    })
}

pub async fn get_borrowing(db: &DatabaseConnection, id: i32) -> Result<BorrowingView, DomainError> {
    let borrowing = Borrowing::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("Borrowing"))?;

    build_view(db, borrowing).await
}

/// Lookup by the human-assigned code
pub async fn get_by_code(db: &DatabaseConnection, code: &str) -> Result<BorrowingView, DomainError> {
    let borrowing = Borrowing::find()
        .filter(borrowing::Column::BorrowingId.eq(code.trim()))
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("Borrowing"))?;

    build_view(db, borrowing).await
}

/// Set the borrowing status. Checkout records tool usage; return stamps the return date.
pub async fn update_status(
    db: &DatabaseConnection,
    id: i32,
    status: BorrowingStatus,
) -> Result<borrowing::Model, DomainError> {
    let txn = db.begin().await?;

    let existing = Borrowing::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Borrowing"))?;

    let now = chrono::Utc::now();
    let today = iso_date(now.date_naive());
    let previous = existing.status;

    let mut active: borrowing::ActiveModel = existing.into();
    active.status = Set(status);
    if status == BorrowingStatus::Returned {
        active.actual_return_date = Set(Some(today.clone()));
    }
    active.updated_at = Set(now.to_rfc3339());
    let updated = active.update(&txn).await?;

    if status == BorrowingStatus::Borrowed {
        let details = BorrowingDetail::find()
            .filter(borrowing_detail::Column::BorrowingId.eq(id))
            .all(&txn)
            .await?;

        for detail in details {
            let recorded = ToolUsage::find()
                .filter(tool_usage::Column::ToolId.eq(detail.tool_id))
                .filter(tool_usage::Column::BorrowingId.eq(id))
                .one(&txn)
                .await?;
            if recorded.is_some() {
                continue;
            }

            tool_usage::ActiveModel {
                tool_id: Set(detail.tool_id),
                borrowing_id: Set(id),
                usage_count: Set(1),
                last_used_date: Set(today.clone()),
                created_at: Set(now.to_rfc3339()),
                updated_at: Set(now.to_rfc3339()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    tracing::info!(
        "Borrowing {} moved from {:?} to {:?}",
        updated.borrowing_id,
        previous,
        status
    );

    Ok(updated)
}
