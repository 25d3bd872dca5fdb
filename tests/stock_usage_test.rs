use chrono::NaiveDate;
use std::path::PathBuf;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use toolroom::db;
use toolroom::domain::{CreateStockItemInput, DomainError, StockItemRepository, UpdateStockItemInput};
use toolroom::infrastructure::SeaOrmStockItemRepository;
use toolroom::models::{stock_item, stock_usage, user, StockStatus, UserRole};
use toolroom::services::analytics_service;
use toolroom::services::stock_usage_service::{self, RecordUsageInput};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// File-backed database so concurrent tasks get separate pooled connections
async fn setup_file_db() -> (DatabaseConnection, PathBuf) {
    let path = std::env::temp_dir().join(format!("toolroom-{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let db = db::init_db(&url).await.expect("Failed to init DB");
    (db, path)
}

async fn create_test_user(db: &DatabaseConnection) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let account = user::ActiveModel {
        open_id: Set("technician".to_string()),
        name: Set(Some("Technician".to_string())),
        role: Set(UserRole::User),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        last_signed_in: Set(now),
        ..Default::default()
    };
    account.insert(db).await.expect("Failed to create user").id
}

async fn create_test_item(db: &DatabaseConnection, code: &str, quantity: i32, min: i32) -> i32 {
    let repo = SeaOrmStockItemRepository::new(db.clone());
    repo.create(CreateStockItemInput {
        item_id: code.to_string(),
        name: format!("Item {}", code),
        description: None,
        unit: Some("pcs".to_string()),
        quantity,
        min_threshold: min,
        max_threshold: 100,
        unit_price: Some("1500.00".to_string()),
        supplier: None,
        location: None,
        notes: None,
    })
    .await
    .expect("Failed to create stock item")
    .id
}

fn usage(item_id: i32, quantity: i32) -> RecordUsageInput {
    RecordUsageInput {
        usage_id: None,
        item_id,
        quantity,
        usage_date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        purpose: Some("Maintenance".to_string()),
        notes: None,
    }
}

async fn reload(db: &DatabaseConnection, id: i32) -> stock_item::Model {
    stock_item::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .expect("Item vanished")
}

#[tokio::test]
async fn test_insufficient_stock_leaves_quantity_unchanged() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let item = create_test_item(&db, "STK-1", 3, 1).await;

    let err = stock_usage_service::record_usage(&db, user_id, usage(item, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let stored = reload(&db, item).await;
    assert_eq!(stored.quantity, 3);
    assert_eq!(stored.status, StockStatus::Available);
    assert!(stock_usage::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exhausting_stock_marks_out_of_stock() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let item = create_test_item(&db, "STK-1", 5, 2).await;

    let recorded = stock_usage_service::record_usage(&db, user_id, usage(item, 5))
        .await
        .unwrap();
    assert_eq!(recorded.quantity, 5);
    assert_eq!(recorded.used_by, user_id);
    assert!(recorded.usage_id.starts_with("USG-"));

    let stored = reload(&db, item).await;
    assert_eq!(stored.quantity, 0);
    assert_eq!(stored.status, StockStatus::OutOfStock);
}

#[tokio::test]
async fn test_usage_down_to_threshold_marks_low_stock() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let item = create_test_item(&db, "STK-1", 20, 5).await;

    stock_usage_service::record_usage(&db, user_id, usage(item, 10))
        .await
        .unwrap();
    assert_eq!(reload(&db, item).await.status, StockStatus::Available);

    // 10 -> 5 lands exactly on the threshold
    stock_usage_service::record_usage(&db, user_id, usage(item, 5))
        .await
        .unwrap();
    let stored = reload(&db, item).await;
    assert_eq!(stored.quantity, 5);
    assert_eq!(stored.status, StockStatus::LowStock);

    let history = stock_usage_service::list_for_item(&db, item).await.unwrap();
    assert_eq!(history.len(), 2);
    let mine = stock_usage_service::list_for_user(&db, user_id).await.unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn test_usage_errors() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let item = create_test_item(&db, "STK-1", 10, 2).await;

    let missing = stock_usage_service::record_usage(&db, user_id, usage(999, 1)).await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));

    let zero = stock_usage_service::record_usage(&db, user_id, usage(item, 0)).await;
    assert!(matches!(zero, Err(DomainError::Validation(_))));

    let mut first = usage(item, 1);
    first.usage_id = Some("USE-001".to_string());
    stock_usage_service::record_usage(&db, user_id, first.clone())
        .await
        .unwrap();
    let duplicate = stock_usage_service::record_usage(&db, user_id, first).await;
    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

    // Only the first usage was applied
    assert_eq!(reload(&db, item).await.quantity, 9);
}

#[tokio::test]
async fn test_stock_edits_reclassify_status() {
    let db = setup_test_db().await;
    let repo = SeaOrmStockItemRepository::new(db.clone());

    let empty = create_test_item(&db, "STK-0", 0, 5).await;
    assert_eq!(reload(&db, empty).await.status, StockStatus::OutOfStock);

    let updated = repo
        .update(
            empty,
            UpdateStockItemInput {
                quantity: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, StockStatus::Available);

    let raised = repo
        .update(
            empty,
            UpdateStockItemInput {
                min_threshold: Some(60),
                max_threshold: Some(80),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(raised.status, StockStatus::LowStock);

    let low = repo.find_low_stock().await.unwrap();
    assert_eq!(low.len(), 1);

    let duplicate = repo
        .create(CreateStockItemInput {
            item_id: "STK-0".to_string(),
            name: "Again".to_string(),
            description: None,
            unit: None,
            quantity: 1,
            min_threshold: 1,
            max_threshold: 10,
            unit_price: None,
            supplier: None,
            location: None,
            notes: None,
        })
        .await;
    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

    let inverted = repo
        .update(
            empty,
            UpdateStockItemInput {
                min_threshold: Some(90),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(inverted, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_stock_usage_stats_include_unused_items() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let used = create_test_item(&db, "STK-1", 10, 2).await;
    let idle = create_test_item(&db, "STK-2", 10, 2).await;

    for _ in 0..3 {
        stock_usage_service::record_usage(&db, user_id, usage(used, 1))
            .await
            .unwrap();
    }

    let stats = analytics_service::stock_usage_stats(&db).await.unwrap();
    assert_eq!(stats.get(&used), Some(&3));
    assert_eq!(stats.get(&idle), Some(&0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_usages_never_overdraw() {
    let (db, path) = setup_file_db().await;
    let user_id = create_test_user(&db).await;
    let item = create_test_item(&db, "STK-1", 5, 2).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            stock_usage_service::record_usage(&db, user_id, usage(item, 1)).await
        }));
    }

    let mut recorded = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => recorded += 1,
            Err(DomainError::Validation(_)) => refused += 1,
            Err(other) => panic!("Unexpected error: {}", other),
        }
    }
    assert_eq!(recorded, 5);
    assert_eq!(refused, 5);

    let stored = reload(&db, item).await;
    assert_eq!(stored.quantity, 0);
    assert_eq!(stored.status, StockStatus::OutOfStock);
    assert_eq!(stock_usage_service::list_for_item(&db, item).await.unwrap().len(), 5);

    drop(db);
    let _ = std::fs::remove_file(path);
}
