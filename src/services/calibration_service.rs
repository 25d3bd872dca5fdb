//! Calibration Service - certificate history that drives tool readiness

use chrono::NaiveDate;
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::models::calibration_record::{self, Entity as CalibrationRecord};
use crate::models::tool::{self, Entity as Tool};
use crate::models::{CalibrationResult, ToolStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct RecordCalibrationInput {
    pub calibration_date: NaiveDate,
    pub next_calibration_date: NaiveDate,
    pub calibration_provider: Option<String>,
    pub certificate_no: Option<String>,
    pub certificate_url: Option<String>,
    pub result: CalibrationResult,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalibrationOutcome {
    pub record: calibration_record::Model,
    pub tool: tool::Model,
}

/// Tool status after a calibration with `result`
fn status_after(current: ToolStatus, result: CalibrationResult) -> ToolStatus {
    match result {
        CalibrationResult::Failed => ToolStatus::NeedsCalibration,
        CalibrationResult::Passed | CalibrationResult::Conditional
            if current == ToolStatus::NeedsCalibration =>
        {
            ToolStatus::Available
        }
        _ => current,
    }
}

/// Store a calibration and copy its dates and certificate onto the tool
pub async fn record_calibration(
    db: &DatabaseConnection,
    tool_id: i32,
    input: RecordCalibrationInput,
) -> Result<CalibrationOutcome, DomainError> {
    if input.next_calibration_date <= input.calibration_date {
        return Err(DomainError::Validation(
            "Next calibration date must be after the calibration date".to_string(),
        ));
    }

    let calibration_date = input.calibration_date.format("%Y-%m-%d").to_string();
    let next_date = input.next_calibration_date.format("%Y-%m-%d").to_string();
    let certificate_url = input.certificate_url.filter(|s| !s.is_empty());

    let txn = db.begin().await?;

    let existing = Tool::find_by_id(tool_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Tool"))?;

    let now = chrono::Utc::now().to_rfc3339();

    let record = calibration_record::ActiveModel {
        tool_id: Set(tool_id),
        calibration_date: Set(calibration_date.clone()),
        next_calibration_date: Set(next_date.clone()),
        calibration_provider: Set(input.calibration_provider),
        certificate_no: Set(input.certificate_no),
        certificate_url: Set(certificate_url.clone()),
        result: Set(input.result),
        notes: Set(input.notes),
        created_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let status = status_after(existing.status, input.result);
    let mut active: tool::ActiveModel = existing.into();
    active.last_calibration_date = Set(Some(calibration_date));
    active.next_calibration_date = Set(Some(next_date));
    if certificate_url.is_some() {
        active.calibration_certificate_url = Set(certificate_url);
    }
    active.status = Set(status);
    active.updated_at = Set(now);
    let tool = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        "Calibration {:?} recorded for tool {}, next due {}",
        record.result,
        tool.tool_id,
        record.next_calibration_date
    );

    Ok(CalibrationOutcome { record, tool })
}

/// Calibration records of a tool, latest first
pub async fn calibration_history(
    db: &DatabaseConnection,
    tool_id: i32,
) -> Result<Vec<calibration_record::Model>, DomainError> {
    Tool::find_by_id(tool_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("Tool"))?;

    let records = CalibrationRecord::find()
        .filter(calibration_record::Column::ToolId.eq(tool_id))
        .order_by_desc(calibration_record::Column::CalibrationDate)
        .order_by_desc(calibration_record::Column::Id)
        .all(db)
        .await?;
    Ok(records)
}
