use crate::models::{stock_item, tool, user, StockStatus, ToolStatus, UserRole};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

/// One demo account per role; the open id doubles as the dev-login handle
const DEMO_USERS: [(&str, &str, UserRole); 5] = [
    ("demo-admin", "Admin Lab", UserRole::Admin),
    ("demo-supervisor", "Lab Supervisor", UserRole::LabSupervisor),
    ("demo-coordinator", "Koordinator", UserRole::Coordinator),
    ("demo-sm-operasi", "SM Operasi", UserRole::SmOperasi),
    ("demo-user", "Teknisi", UserRole::User),
];

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Users
    for (open_id, name, role) in DEMO_USERS {
        let account = user::ActiveModel {
            open_id: Set(open_id.to_owned()),
            name: Set(Some(name.to_owned())),
            email: Set(Some(format!("{}@toolroom.local", open_id))),
            login_method: Set(Some("demo".to_owned())),
            role: Set(role),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            last_signed_in: Set(now.clone()),
            ..Default::default()
        };

        user::Entity::insert(account)
            .on_conflict(OnConflict::column(user::Column::OpenId).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;
    }

    // 2. Tools
    let tools = [
        ("EL-MT-001", "Digital Multimeter", "Fluke", "87V", "2025-01-15", "2026-01-15"),
        ("EL-IR-002", "Insulation Resistance Tester", "Megger", "MIT525", "2024-11-02", "2025-11-02"),
        ("MC-VC-003", "Vernier Caliper 150mm", "Mitutoyo", "530-104", "2025-03-20", "2026-03-20"),
        ("MC-TW-004", "Torque Wrench 20-100Nm", "Tohnichi", "QL100N4", "2024-06-10", "2025-06-10"),
    ];

    for (code, name, brand, model, last_cal, next_cal) in tools {
        let item = tool::ActiveModel {
            tool_id: Set(code.to_owned()),
            name: Set(name.to_owned()),
            brand: Set(Some(brand.to_owned())),
            model: Set(Some(model.to_owned())),
            last_calibration_date: Set(Some(last_cal.to_owned())),
            next_calibration_date: Set(Some(next_cal.to_owned())),
            status: Set(ToolStatus::Available),
            location: Set(Some("Tool Room A".to_owned())),
            barcode_data: Set(Some(code.to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        tool::Entity::insert(item)
            .on_conflict(OnConflict::column(tool::Column::ToolId).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;
    }

    // 3. Consumables
    let stock = [
        ("STK-CBL-001", "Cable Tie 200mm", "pack", 40, 10),
        ("STK-TPE-002", "Insulation Tape", "roll", 4, 5),
        ("STK-GLV-003", "Nitrile Gloves", "box", 0, 3),
        ("STK-FUS-004", "Fuse 10A", "pcs", 120, 20),
    ];

    for (code, name, unit, quantity, min_threshold) in stock {
        let item = stock_item::ActiveModel {
            item_id: Set(code.to_owned()),
            name: Set(name.to_owned()),
            unit: Set(Some(unit.to_owned())),
            quantity: Set(quantity),
            min_threshold: Set(min_threshold),
            max_threshold: Set(200),
            location: Set(Some("Store B".to_owned())),
            status: Set(StockStatus::classify(quantity, min_threshold)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        stock_item::Entity::insert(item)
            .on_conflict(
                OnConflict::column(stock_item::Column::ItemId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    tracing::info!("Demo data seeded ({} users)", DEMO_USERS.len());
    Ok(())
}
