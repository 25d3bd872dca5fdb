use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
    /// Expose `POST /api/auth/dev-login` (development only)
    pub dev_login: bool,
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://toolroom.db?mode=rwc".to_string()
            } else {
                format!("sqlite://toolroom_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            profile,
            dev_login: env_flag("DEV_LOGIN"),
        }
    }
}
