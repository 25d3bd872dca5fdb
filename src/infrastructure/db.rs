use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    tracing::debug!("Database ready at {}", database_url);
    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(db, "PRAGMA foreign_keys = ON").await?;

    // Users
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            open_id TEXT NOT NULL UNIQUE,
            name TEXT,
            email TEXT,
            login_method TEXT,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_signed_in TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Inspection tools
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS tools (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tool_id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            serial_no TEXT UNIQUE,
            brand TEXT,
            model TEXT,
            specification TEXT,
            last_calibration_date TEXT,
            next_calibration_date TEXT,
            calibration_certificate_url TEXT,
            usage_procedure_url TEXT,
            status TEXT NOT NULL DEFAULT 'available',
            location TEXT,
            assigned_to INTEGER REFERENCES users(id) ON DELETE SET NULL,
            barcode_data TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Consumables
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS stock_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT,
            unit TEXT,
            quantity INTEGER NOT NULL DEFAULT 0,
            min_threshold INTEGER NOT NULL DEFAULT 5,
            max_threshold INTEGER NOT NULL DEFAULT 100,
            unit_price TEXT,
            supplier TEXT,
            location TEXT,
            status TEXT NOT NULL DEFAULT 'available',
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Borrowings
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS tool_borrowings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            borrowing_id TEXT NOT NULL UNIQUE,
            borrower_id INTEGER NOT NULL REFERENCES users(id),
            borrow_date TEXT NOT NULL,
            expected_return_date TEXT NOT NULL,
            actual_return_date TEXT,
            purpose TEXT,
            status TEXT NOT NULL DEFAULT 'pending_approval',
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS borrowing_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            borrowing_id INTEGER NOT NULL REFERENCES tool_borrowings(id) ON DELETE CASCADE,
            tool_id INTEGER NOT NULL REFERENCES tools(id),
            quantity INTEGER NOT NULL DEFAULT 1,
            returned_quantity INTEGER NOT NULL DEFAULT 0,
            condition TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Approval slots, one per (borrowing, role)
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS approvals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            borrowing_id INTEGER NOT NULL REFERENCES tool_borrowings(id) ON DELETE CASCADE,
            approver_role TEXT NOT NULL,
            approver_id INTEGER REFERENCES users(id),
            status TEXT NOT NULL DEFAULT 'pending',
            signature_data TEXT,
            signed_at TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_approvals_borrowing_role ON approvals (borrowing_id, approver_role)",
    )
    .await?;

    // Stock usages
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS stock_usages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            usage_id TEXT NOT NULL UNIQUE,
            item_id INTEGER NOT NULL REFERENCES stock_items(id),
            used_by INTEGER NOT NULL REFERENCES users(id),
            quantity INTEGER NOT NULL,
            usage_date TEXT NOT NULL,
            purpose TEXT,
            notes TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_stock_usages_item ON stock_usages (item_id)",
    )
    .await?;

    // Calibration history
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS calibration_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tool_id INTEGER NOT NULL REFERENCES tools(id) ON DELETE CASCADE,
            calibration_date TEXT NOT NULL,
            next_calibration_date TEXT NOT NULL,
            calibration_provider TEXT,
            certificate_no TEXT,
            certificate_url TEXT,
            result TEXT NOT NULL,
            notes TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Tool usage history (analytics)
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS tool_usage_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tool_id INTEGER NOT NULL REFERENCES tools(id),
            borrowing_id INTEGER NOT NULL REFERENCES tool_borrowings(id),
            usage_count INTEGER NOT NULL DEFAULT 1,
            last_used_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_tool_usage_tool_borrowing ON tool_usage_history (tool_id, borrowing_id)",
    )
    .await?;

    // Application settings
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS app_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            key TEXT NOT NULL UNIQUE,
            value TEXT,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    Ok(())
}
