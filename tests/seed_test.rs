use sea_orm::{DatabaseConnection, EntityTrait};
use toolroom::db;
use toolroom::models::{stock_item, tool, user, StockStatus};
use toolroom::seed::seed_demo_data;

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

#[tokio::test]
async fn test_seeding_twice_keeps_one_copy() {
    let db = setup_test_db().await;

    seed_demo_data(&db).await.expect("First seed failed");
    seed_demo_data(&db).await.expect("Second seed failed");

    let users = user::Entity::find().all(&db).await.unwrap();
    assert_eq!(users.len(), 5);
    assert!(users.iter().any(|u| u.open_id == "demo-admin"));

    assert_eq!(tool::Entity::find().all(&db).await.unwrap().len(), 4);

    let stock = stock_item::Entity::find().all(&db).await.unwrap();
    assert_eq!(stock.len(), 4);
    let status_of = |code: &str| {
        stock
            .iter()
            .find(|item| item.item_id == code)
            .map(|item| item.status)
    };
    assert_eq!(status_of("STK-TPE-002"), Some(StockStatus::LowStock));
    assert_eq!(status_of("STK-GLV-003"), Some(StockStatus::OutOfStock));
}
