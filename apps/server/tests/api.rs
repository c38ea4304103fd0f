//! Integration tests for the Monis API.
//!
//! These drive the real router in-process (no sockets) and verify:
//! - Catalog serving and the built-in fallback
//! - The workspace configuration flow and gating
//! - Order submission, the mock fallback, and authenticated history
//! - Snapshot persistence after mutations

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use monis_core::catalog::builtin_catalog;
use monis_core::SNAPSHOT_KEY;
use monis_db::{Database, DbConfig};
use monis_server::auth::JwtManager;
use monis_server::routes::router;
use monis_server::state::{AppState, WorkspaceState};

const TEST_SECRET: &str = "test-secret";

/// App backed by a seeded in-memory database.
async fn app_with_db() -> (axum::Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.products().seed(&builtin_catalog()).await.unwrap();

    let state = AppState::new(
        Some(db.clone()),
        WorkspaceState::new(),
        JwtManager::new(TEST_SECRET),
    );
    (router(state), db)
}

/// App running in degraded mode (no database).
fn app_without_db() -> axum::Router {
    let state = AppState::new(None, WorkspaceState::new(), JwtManager::new(TEST_SECRET));
    router(state)
}

/// Sends a request and parses the JSON response.
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(json!(null));

    (status, value)
}

fn product_json(id: &str) -> Value {
    let product = builtin_catalog().into_iter().find(|p| p.id == id).unwrap();
    serde_json::to_value(product).unwrap()
}

fn checkout_body() -> Value {
    let start = (Utc::now() + Duration::days(3)).date_naive();
    json!({
        "contact_name": "Alex Johnson",
        "contact_email": "alex@email.com",
        "contact_whatsapp": "+62 812 3456 7890",
        "delivery_address": "Jl. Pantai Batu Bolong No. 69, Canggu, Bali",
        "start_date": start.to_string(),
        "notes": null,
    })
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn products_are_served_from_the_database() {
    let (app, _db) = app_with_db().await;

    let (status, body) = send(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), builtin_catalog().len());

    // Ascending weekly price
    let prices: Vec<i64> = products
        .iter()
        .map(|p| p["price_per_week_cents"].as_i64().unwrap())
        .collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);
}

#[tokio::test]
async fn products_fall_back_without_a_database() {
    let app = app_without_db();

    let (status, body) = send(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["products"].as_array().unwrap().len(),
        builtin_catalog().len()
    );

    let (status, body) = send(&app, "GET", "/api/products?category=desk", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let desks = body["products"].as_array().unwrap();
    assert!(!desks.is_empty());
    assert!(desks.iter().all(|p| p["category"] == "desk"));
}

// =============================================================================
// Workspace Flow
// =============================================================================

#[tokio::test]
async fn desk_slot_rejects_non_desk_products() {
    let (app, _db) = app_with_db().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/workspace/desk",
        Some(product_json("chair-gaming")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn configuring_a_workspace_updates_totals_and_gating() {
    let (app, _db) = app_with_db().await;

    // Desk only: chair step unlocks, later steps stay gated
    let (status, body) = send(
        &app,
        "PUT",
        "/api/workspace/desk",
        Some(product_json("desk-electric")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gating"]["navigable"], json!([true, true, false, false]));
    assert_eq!(body["gating"]["can_checkout"], json!(false));
    assert_eq!(body["totals"]["weekly_price_cents"], json!(500));

    // Chair completes the base: everything unlocks
    let (_, body) = send(
        &app,
        "PUT",
        "/api/workspace/chair",
        Some(product_json("chair-ergonomic")),
        None,
    )
    .await;
    assert_eq!(body["gating"]["navigable"], json!([true, true, true, true]));
    assert_eq!(body["gating"]["can_checkout"], json!(true));

    // Same accessory twice merges into one line with quantity 2
    for _ in 0..2 {
        send(
            &app,
            "POST",
            "/api/workspace/accessories",
            Some(product_json("lamp-desk")),
            None,
        )
        .await;
    }
    let (_, body) = send(&app, "GET", "/api/workspace", None, None).await;
    let accessories = body["accessories"].as_array().unwrap();
    assert_eq!(accessories.len(), 1);
    assert_eq!(accessories[0]["quantity"], json!(2));

    // desk 5 + chair 6 + 2×2 = 15/week; default 1_month → 15×4×0.9 = 54.00
    assert_eq!(body["rental_period"], json!("1_month"));
    assert_eq!(body["totals"]["weekly_price_cents"], json!(1500));
    assert_eq!(body["totals"]["total_price_cents"], json!(5400));
    assert_eq!(body["totals"]["item_count"], json!(4));

    // Weekly price ignores the selected period
    let (_, body) = send(
        &app,
        "PUT",
        "/api/workspace/rental-period",
        Some(json!({"period": "6_months"})),
        None,
    )
    .await;
    assert_eq!(body["totals"]["weekly_price_cents"], json!(1500));
    // 15 × 26 × 0.7 = 273.00
    assert_eq!(body["totals"]["total_price_cents"], json!(27300));

    // Quantity 0 removes the line
    let (_, body) = send(
        &app,
        "PUT",
        "/api/workspace/accessories/lamp-desk",
        Some(json!({"quantity": 0})),
        None,
    )
    .await;
    assert!(body["accessories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn step_cursor_is_clamped_and_saturating() {
    let (app, _db) = app_with_db().await;

    let (_, body) = send(
        &app,
        "PUT",
        "/api/workspace/step",
        Some(json!({"step": -5})),
        None,
    )
    .await;
    assert_eq!(body["current_step"], json!(0));

    let (_, body) = send(
        &app,
        "PUT",
        "/api/workspace/step",
        Some(json!({"step": 99})),
        None,
    )
    .await;
    assert_eq!(body["current_step"], json!(3));

    let (_, body) = send(&app, "POST", "/api/workspace/step/next", None, None).await;
    assert_eq!(body["current_step"], json!(3));

    let (_, body) = send(&app, "POST", "/api/workspace/step/prev", None, None).await;
    assert_eq!(body["current_step"], json!(2));
}

#[tokio::test]
async fn mutations_persist_a_snapshot() {
    let (app, db) = app_with_db().await;

    send(
        &app,
        "PUT",
        "/api/workspace/desk",
        Some(product_json("desk-compact")),
        None,
    )
    .await;

    let snapshot = db.snapshots().load(SNAPSHOT_KEY).await.unwrap().unwrap();
    assert_eq!(snapshot.config.desk.unwrap().id, "desk-compact");
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn order_submission_requires_base_items() {
    let (app, _db) = app_with_db().await;

    let (status, body) = send(&app, "POST", "/api/orders", Some(checkout_body()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn order_submission_reports_all_invalid_fields() {
    let (app, _db) = app_with_db().await;

    let bad = json!({
        "contact_name": "",
        "contact_email": "nope",
        "contact_whatsapp": "",
        "delivery_address": "",
        "start_date": Utc::now().date_naive().to_string(), // today, not tomorrow
        "notes": null,
    });

    let (status, body) = send(&app, "POST", "/api/orders", Some(bad), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn order_submission_freezes_config_and_resets_workspace() {
    let (app, db) = app_with_db().await;
    let jwt = JwtManager::new(TEST_SECRET);
    let token = jwt.generate_token("user-1", None, 3600).unwrap();

    send(
        &app,
        "PUT",
        "/api/workspace/desk",
        Some(product_json("desk-electric")),
        None,
    )
    .await;
    send(
        &app,
        "PUT",
        "/api/workspace/chair",
        Some(product_json("chair-ergonomic")),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(checkout_body()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["mock"], json!(false));
    assert_eq!(body["order"]["status"], json!("pending"));
    assert_eq!(body["order"]["user_id"], json!("user-1"));
    // desk 5 + chair 6 = 11/week; 1_month → 11×4×0.9 = 39.60
    assert_eq!(body["order"]["total_price_cents"], json!(3960));

    // The workspace is spent and the snapshot cleared
    let (_, ws) = send(&app, "GET", "/api/workspace", None, None).await;
    assert_eq!(ws["desk"], json!(null));
    assert_eq!(ws["chair"], json!(null));
    assert!(db.snapshots().load(SNAPSHOT_KEY).await.unwrap().is_none());

    // History requires auth...
    let (status, _) = send(&app, "GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // ...and returns the submitted order for its owner
    let (status, body) = send(&app, "GET", "/api/orders", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["workspace_config"]["desk"]["id"], "desk-electric");
}

#[tokio::test]
async fn order_submission_degrades_to_mock_without_a_database() {
    let app = app_without_db();

    send(
        &app,
        "PUT",
        "/api/workspace/desk",
        Some(product_json("desk-electric")),
        None,
    )
    .await;
    send(
        &app,
        "PUT",
        "/api/workspace/chair",
        Some(product_json("chair-ergonomic")),
        None,
    )
    .await;

    let (status, body) = send(&app, "POST", "/api/orders", Some(checkout_body()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["mock"], json!(true));
    assert!(body["order"]["id"].as_str().unwrap().starts_with("mock-"));
    assert_eq!(body["order"]["user_id"], json!(null));
}
