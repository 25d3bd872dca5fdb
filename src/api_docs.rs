use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::get_me,
        api::tools::list_tools,
        api::tools::create_tool,
        api::stock::list_stock,
        api::stock::list_low_stock,
        api::borrowings::list_borrowings,
        api::borrowings::create_borrowing,
        api::approvals::approve,
        api::approvals::reject,
        api::stock_usages::record_usage,
    ),
    tags(
        (name = "toolroom", description = "Toolroom inventory API")
    )
)]
pub struct ApiDoc;
