use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toolroom::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolroom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();
    tracing::info!("Starting toolroom (profile: {})", config.profile);

    // The store is required; refuse to start without it
    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    // Check for seed flag
    if std::env::var("SEED_DEMO").is_ok() {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        } else {
            tracing::info!("Demo data seeded successfully.");
        }
    }

    if let Err(e) = server::start_server(db, &config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
