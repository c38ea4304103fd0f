//! # Route Registration
//!
//! ```text
//! GET    /health                            liveness probe
//! GET    /api/products?category=            catalog (falls back to built-in)
//! GET    /api/workspace                     current configuration view
//! PUT    /api/workspace/desk                select/clear desk
//! PUT    /api/workspace/chair               select/clear chair
//! POST   /api/workspace/accessories         add one unit of an accessory
//! PUT    /api/workspace/accessories/{id}    set quantity (0 removes)
//! DELETE /api/workspace/accessories/{id}    remove accessory
//! PUT    /api/workspace/rental-period       select duration
//! PUT    /api/workspace/step                move step cursor (clamped)
//! POST   /api/workspace/step/next           advance (saturates)
//! POST   /api/workspace/step/prev           go back (saturates)
//! PUT    /api/workspace/checkout-open       open/close checkout modal
//! POST   /api/workspace/reset               clear configuration
//! POST   /api/orders                        submit order (never hard-fails)
//! GET    /api/orders                        caller's orders, auth required
//! ```

pub mod orders;
pub mod products;
pub mod workspace;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(products::list_products))
        .route("/api/workspace", get(workspace::get_workspace))
        .route("/api/workspace/desk", put(workspace::set_desk))
        .route("/api/workspace/chair", put(workspace::set_chair))
        .route("/api/workspace/accessories", post(workspace::add_accessory))
        .route(
            "/api/workspace/accessories/{id}",
            put(workspace::update_accessory_qty).delete(workspace::remove_accessory),
        )
        .route(
            "/api/workspace/rental-period",
            put(workspace::set_rental_period),
        )
        .route("/api/workspace/step", put(workspace::set_step))
        .route("/api/workspace/step/next", post(workspace::next_step))
        .route("/api/workspace/step/prev", post(workspace::prev_step))
        .route(
            "/api/workspace/checkout-open",
            put(workspace::set_checkout_open),
        )
        .route("/api/workspace/reset", post(workspace::reset))
        .route(
            "/api/orders",
            post(orders::submit_order).get(orders::list_orders),
        )
        .with_state(state)
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}
