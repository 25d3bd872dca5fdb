use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{json, Value};
use toolroom::auth;
use toolroom::config::Config;
use toolroom::db;
use toolroom::models::{user, UserRole};
use toolroom::server;
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        cors_allowed_origins: Vec::new(),
        profile: "test".to_string(),
        dev_login: true,
    }
}

async fn setup_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    let app = server::build_router(db.clone(), &test_config());
    (app, db)
}

// Creates the account and returns a bearer token for it
async fn login_as(db: &DatabaseConnection, open_id: &str, role: UserRole) -> (i32, String) {
    let now = chrono::Utc::now().to_rfc3339();
    let account = user::ActiveModel {
        open_id: Set(open_id.to_string()),
        name: Set(Some(open_id.to_string())),
        role: Set(role),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        last_signed_in: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create user");

    let token = auth::create_jwt(account.id, role, account.name.as_deref())
        .expect("Failed to create token");
    (account.id, token)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn tool_payload(code: &str) -> Value {
    json!({
        "tool_id": code,
        "name": "Digital Multimeter",
        "brand": "Fluke",
        "next_calibration_date": "2030-01-01"
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let (app, _db) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/tools", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(request("GET", "/api/tools", Some("not.a.token"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_plain_user_cannot_create_tool() {
    let (app, db) = setup_app().await;
    let (_, token) = login_as(&db, "technician", UserRole::User).await;

    let response = app
        .oneshot(request(
            "POST",
            "/api/tools",
            Some(&token),
            Some(tool_payload("EL-MT-001")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tool_crud_and_errors() {
    let (app, db) = setup_app().await;
    let (supervisor_id, supervisor) = login_as(&db, "supervisor", UserRole::LabSupervisor).await;
    let (_, admin) = login_as(&db, "admin", UserRole::Admin).await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/tools",
            Some(&supervisor),
            Some(tool_payload("EL-MT-001")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["status"], "available");
    assert_eq!(created["assigned_to"], supervisor_id);
    let id = created["id"].as_i64().unwrap();

    // Same code again
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/tools",
            Some(&supervisor),
            Some(tool_payload("EL-MT-001")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(request("GET", "/api/tools/999", Some(&supervisor), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/tools/by-code/EL-MT-001",
            Some(&supervisor),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/tools/by-status/broken",
            Some(&supervisor),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Only admins delete
    let uri = format!("/api/tools/{}", id);
    let response = app
        .clone()
        .oneshot(request("DELETE", &uri, Some(&supervisor), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request("DELETE", &uri, Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("GET", &uri, Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_borrowing_flow_over_http() {
    let (app, db) = setup_app().await;
    let (_, supervisor) = login_as(&db, "supervisor", UserRole::LabSupervisor).await;
    let (_, coordinator) = login_as(&db, "coordinator", UserRole::Coordinator).await;
    let (borrower_id, borrower) = login_as(&db, "borrower", UserRole::User).await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/tools",
            Some(&supervisor),
            Some(tool_payload("EL-MT-007")),
        ))
        .await
        .unwrap();
    let tool_id = body_json(response).await["id"].as_i64().unwrap();

    let borrowing = json!({
        "borrowing_id": "BRW-1",
        "tool_ids": [tool_id],
        "borrow_date": "2025-05-01",
        "expected_return_date": "2025-05-03"
    });
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/borrowings",
            Some(&borrower),
            Some(borrowing.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["borrower_id"], borrower_id);
    assert_eq!(created["status"], "pending_approval");
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/borrowings",
            Some(&borrower),
            Some(borrowing),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Plain users may not see the pending queue
    let response = app
        .clone()
        .oneshot(request("GET", "/api/borrowings/pending", Some(&borrower), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A coordinator cannot sign the lab supervisor slot
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/approvals/approve",
            Some(&coordinator),
            Some(json!({ "borrowing_id": id, "approver_role": "lab_supervisor" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/approvals/approve",
            Some(&supervisor),
            Some(json!({ "borrowing_id": id, "approver_role": "lab_supervisor" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/approvals/reject",
            Some(&coordinator),
            Some(json!({
                "borrowing_id": id,
                "approver_role": "coordinator",
                "notes": "damaged equipment"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json(response).await;
    assert_eq!(outcome["borrowing"]["status"], "rejected");

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/borrowings/{}", id),
            Some(&borrower),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["borrowing_id"], "BRW-1");
    assert_eq!(view["approval_progress"], "rejected");
    assert_eq!(view["approvals"].as_array().unwrap().len(), 3);
    assert_eq!(view["details"][0]["tool_code"], "EL-MT-007");

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/borrowings/{}/approvals/chief", id),
            Some(&borrower),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request(
            "POST",
            "/api/approvals/approve",
            Some(&supervisor),
            Some(json!({ "borrowing_id": 9999, "approver_role": "lab_supervisor" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_insufficient_stock_over_http() {
    let (app, db) = setup_app().await;
    let (_, admin) = login_as(&db, "admin", UserRole::Admin).await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/stock",
            Some(&admin),
            Some(json!({ "item_id": "STK-TPE-002", "name": "Insulation Tape", "quantity": 2 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = body_json(response).await;
    assert_eq!(item["min_threshold"], 5);
    assert_eq!(item["status"], "low_stock");
    let item_id = item["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/stock-usages",
            Some(&admin),
            Some(json!({ "item_id": item_id, "quantity": 3, "usage_date": "2025-05-02" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Insufficient stock");

    let response = app
        .oneshot(request(
            "GET",
            "/api/stock/low",
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    let low = body_json(response).await;
    assert_eq!(low.as_array().unwrap()[0]["quantity"], 2);
}

#[tokio::test]
async fn test_dev_login_issues_usable_token() {
    let (app, _db) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/dev-login",
            None,
            Some(json!({ "name": "Koordinator", "role": "coordinator" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["role"], "coordinator");

    let response = app
        .clone()
        .oneshot(request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["open_id"], "dev-koordinator");

    let response = app
        .oneshot(request("GET", "/api/users", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_settings_upsert() {
    let (app, db) = setup_app().await;
    let (_, admin) = login_as(&db, "admin", UserRole::Admin).await;
    let (_, technician) = login_as(&db, "technician", UserRole::User).await;

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/api/settings/company_name",
            Some(&technician),
            Some(json!({ "value": "ACME" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    for value in ["ACME", "ACME Energy"] {
        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/api/settings/company_name",
                Some(&admin),
                Some(json!({ "value": value })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/settings/company_name",
            Some(&technician),
            None,
        ))
        .await
        .unwrap();
    let setting = body_json(response).await;
    assert_eq!(setting["value"], "ACME Energy");

    let response = app
        .oneshot(request("GET", "/api/settings/missing", Some(&technician), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
