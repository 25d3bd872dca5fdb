use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use toolroom::db;
use toolroom::domain::{CreateToolInput, DomainError, ToolRepository, UpdateToolInput};
use toolroom::infrastructure::SeaOrmToolRepository;
use toolroom::models::{CalibrationResult, ToolStatus};
use toolroom::services::calibration_service::{self, RecordCalibrationInput};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tool_input(code: &str, next_calibration: Option<NaiveDate>) -> CreateToolInput {
    CreateToolInput {
        tool_id: code.to_string(),
        name: format!("Tool {}", code),
        serial_no: None,
        brand: Some("Fluke".to_string()),
        model: None,
        specification: None,
        last_calibration_date: None,
        next_calibration_date: next_calibration,
        calibration_certificate_url: Some(String::new()),
        usage_procedure_url: None,
        status: None,
        location: None,
        barcode_data: None,
        notes: None,
    }
}

fn calibration(result: CalibrationResult) -> RecordCalibrationInput {
    RecordCalibrationInput {
        calibration_date: date(2025, 1, 10),
        next_calibration_date: date(2026, 1, 10),
        calibration_provider: Some("KAN Lab".to_string()),
        certificate_no: Some("CERT-001".to_string()),
        certificate_url: Some("https://certs.example/001.pdf".to_string()),
        result,
        notes: None,
    }
}

#[tokio::test]
async fn test_create_defaults_and_lookup() {
    let db = setup_test_db().await;
    let repo = SeaOrmToolRepository::new(db.clone());

    // Unknown responsible user is dropped instead of failing
    let tool = repo
        .create(tool_input("EL-MT-001", None), Some(404))
        .await
        .unwrap();
    assert_eq!(tool.status, ToolStatus::Available);
    assert_eq!(tool.assigned_to, None);
    assert_eq!(tool.calibration_certificate_url, None);

    let found = repo.find_by_code("EL-MT-001").await.unwrap();
    assert_eq!(found.map(|t| t.id), Some(tool.id));
    assert!(repo.find_by_code("NOPE").await.unwrap().is_none());

    let duplicate = repo.create(tool_input("EL-MT-001", None), None).await;
    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

    let blank = repo.create(tool_input("  ", None), None).await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_update_status_and_filter() {
    let db = setup_test_db().await;
    let repo = SeaOrmToolRepository::new(db.clone());
    let a = repo.create(tool_input("A-1", None), None).await.unwrap();
    repo.create(tool_input("B-1", None), None).await.unwrap();

    let updated = repo
        .update(
            a.id,
            UpdateToolInput {
                status: Some(ToolStatus::Damaged),
                location: Some("Workshop".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, ToolStatus::Damaged);
    assert_eq!(updated.name, "Tool A-1");

    let damaged = repo.find_by_status(ToolStatus::Damaged).await.unwrap();
    assert_eq!(damaged.len(), 1);
    let all = repo.find_all().await.unwrap();
    assert_eq!(
        all.iter().map(|t| t.tool_id.as_str()).collect::<Vec<_>>(),
        vec!["A-1", "B-1"]
    );

    let missing = repo.update(999, UpdateToolInput::default()).await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_calibration_due_listing() {
    let db = setup_test_db().await;
    let repo = SeaOrmToolRepository::new(db.clone());

    repo.create(tool_input("OVERDUE", Some(date(2024, 12, 31))), None)
        .await
        .unwrap();
    repo.create(tool_input("CURRENT", Some(date(2025, 6, 1))), None)
        .await
        .unwrap();
    let mut flagged = tool_input("FLAGGED", Some(date(2030, 1, 1)));
    flagged.status = Some(ToolStatus::NeedsCalibration);
    repo.create(flagged, None).await.unwrap();

    let due = repo.find_calibration_due(date(2025, 1, 1)).await.unwrap();
    let mut codes: Vec<String> = due.into_iter().map(|t| t.tool_id).collect();
    codes.sort();
    assert_eq!(codes, vec!["FLAGGED", "OVERDUE"]);
}

#[tokio::test]
async fn test_calibration_updates_tool() {
    let db = setup_test_db().await;
    let repo = SeaOrmToolRepository::new(db.clone());
    let tool = repo.create(tool_input("EL-IR-002", None), None).await.unwrap();

    let failed = calibration_service::record_calibration(
        &db,
        tool.id,
        calibration(CalibrationResult::Failed),
    )
    .await
    .unwrap();
    assert_eq!(failed.tool.status, ToolStatus::NeedsCalibration);
    assert_eq!(failed.tool.next_calibration_date.as_deref(), Some("2026-01-10"));

    let passed = calibration_service::record_calibration(
        &db,
        tool.id,
        calibration(CalibrationResult::Passed),
    )
    .await
    .unwrap();
    assert_eq!(passed.tool.status, ToolStatus::Available);
    assert_eq!(passed.tool.last_calibration_date.as_deref(), Some("2025-01-10"));
    assert_eq!(
        passed.tool.calibration_certificate_url.as_deref(),
        Some("https://certs.example/001.pdf")
    );

    let history = calibration_service::calibration_history(&db, tool.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);

    let mut backwards = calibration(CalibrationResult::Passed);
    backwards.next_calibration_date = date(2024, 1, 1);
    let err = calibration_service::record_calibration(&db, tool.id, backwards)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let missing =
        calibration_service::record_calibration(&db, 999, calibration(CalibrationResult::Passed))
            .await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}
