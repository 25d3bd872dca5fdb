// Server module - Builds the HTTP application and runs it

use axum::http::HeaderValue;
use axum::Router;
use sea_orm::DatabaseConnection;
use std::net::{SocketAddr, TcpListener};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::infrastructure::AppState;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let mut allowed = Vec::new();
        for origin in origins {
            match origin.parse::<HeaderValue>() {
                Ok(v) => allowed.push(v),
                Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
            }
        }
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application: `/api` routes, Swagger UI, CORS and request tracing
pub fn build_router(db: DatabaseConnection, config: &Config) -> Router {
    let state = AppState::new(db);
    let mut api_router = api::api_router_with_state(state.clone());

    if config.dev_login {
        tracing::warn!("Development login enabled at /api/auth/dev-login");
        api_router = api_router.merge(api::dev_router(state));
    }

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_router)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    (preferred_port.saturating_add(1)..(preferred_port.saturating_add(100)))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}

/// Bind the first free port from `config.port` and serve until the process stops
pub async fn start_server(db: DatabaseConnection, config: &Config) -> Result<(), String> {
    let port = find_available_port(config.port)
        .ok_or_else(|| "Failed to find available port".to_string())?;

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    let app = build_router(db, config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Toolroom server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("HTTP server error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_scan_stops_at_top_of_range() {
        // Hold the last port so the scan has to look past it
        let _held = TcpListener::bind(("0.0.0.0", u16::MAX));
        assert_eq!(find_available_port(u16::MAX), None);
    }
}
