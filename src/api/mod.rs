pub mod analytics;
pub mod approvals;
pub mod auth;
pub mod borrowings;
pub mod error;
pub mod health;
pub mod settings;
pub mod stock;
pub mod stock_usages;
pub mod tools;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::infrastructure::AppState;

/// Every `/api` route. Handlers authenticate through the `CurrentUser` extractor.
pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/me", get(auth::get_me))
        .route("/auth/logout", post(auth::logout))
        // Tools
        .route("/tools", get(tools::list_tools).post(tools::create_tool))
        .route("/tools/calibration-due", get(tools::list_calibration_due))
        .route("/tools/by-code/:tool_id", get(tools::get_tool_by_code))
        .route("/tools/by-status/:status", get(tools::list_tools_by_status))
        .route(
            "/tools/:id",
            get(tools::get_tool)
                .put(tools::update_tool)
                .delete(tools::delete_tool),
        )
        .route(
            "/tools/:id/calibrations",
            get(tools::list_calibrations).post(tools::record_calibration),
        )
        // Stock
        .route(
            "/stock",
            get(stock::list_stock).post(stock::create_stock_item),
        )
        .route("/stock/low", get(stock::list_low_stock))
        .route(
            "/stock/:id",
            get(stock::get_stock_item)
                .put(stock::update_stock_item)
                .delete(stock::delete_stock_item),
        )
        .route("/stock/:id/usages", get(stock_usages::list_for_item))
        // Stock usages
        .route("/stock-usages", post(stock_usages::record_usage))
        .route("/stock-usages/mine", get(stock_usages::list_my_usages))
        // Borrowings
        .route(
            "/borrowings",
            get(borrowings::list_borrowings).post(borrowings::create_borrowing),
        )
        .route("/borrowings/mine", get(borrowings::list_my_borrowings))
        .route(
            "/borrowings/pending",
            get(borrowings::list_pending_borrowings),
        )
        .route(
            "/borrowings/by-code/:borrowing_id",
            get(borrowings::get_borrowing_by_code),
        )
        .route("/borrowings/:id", get(borrowings::get_borrowing))
        .route(
            "/borrowings/:id/status",
            put(borrowings::update_borrowing_status),
        )
        .route(
            "/borrowings/:id/details",
            get(borrowings::list_borrowing_details),
        )
        .route(
            "/borrowings/:id/approvals",
            get(approvals::list_for_borrowing),
        )
        .route(
            "/borrowings/:id/approvals/:role",
            get(approvals::get_for_role),
        )
        // Approvals
        .route("/approvals/pending", get(approvals::list_pending_for_me))
        .route("/approvals/approve", post(approvals::approve))
        .route("/approvals/reject", post(approvals::reject))
        // Analytics
        .route(
            "/analytics/most-used-tools",
            get(analytics::most_used_tools),
        )
        .route(
            "/analytics/tool-borrowings",
            get(analytics::tool_borrowing_stats),
        )
        .route("/analytics/stock-usage", get(analytics::stock_usage_stats))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user))
        // Settings
        .route("/settings", get(settings::list_settings))
        .route(
            "/settings/:key",
            get(settings::get_setting).put(settings::put_setting),
        )
        .with_state(state)
}

/// Development-only sign-in, merged when `DEV_LOGIN` is set
pub fn dev_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/dev-login", post(auth::dev_login))
        .with_state(state)
}
