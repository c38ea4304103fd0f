//! # Order Routes
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/orders                                                       │
//! │                                                                         │
//! │  1. Resolve identity (optional - anonymous checkout is fine)           │
//! │  2. Validate checkout fields - ALL failures reported together          │
//! │  3. Require desk + chair in the current workspace                      │
//! │  4. Freeze the configuration and compute the total server-side         │
//! │  5. Insert the order - on store failure, synthesize a mock order       │
//! │     instead (submission never hard-fails for the customer)             │
//! │  6. Reset the workspace and clear the persisted snapshot               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `GET /api/orders` is the one endpoint that does NOT degrade: without a
//! valid identity it answers 401, and a store failure is a plain error.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::{optional_identity, require_identity};
use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;
use monis_core::validation::validate_checkout;
use monis_core::{CheckoutDetails, Order, OrderStatus, Workspace};

#[derive(Debug, Serialize)]
pub struct SubmitOrderResponse {
    pub order: Order,
    pub success: bool,
    /// True when the backing store was unreachable and the order id was
    /// synthesized locally.
    pub mock: bool,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

/// `POST /api/orders` - submit the current workspace as a rental order.
pub async fn submit_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(details): Json<CheckoutDetails>,
) -> Result<Json<SubmitOrderResponse>, ApiError> {
    debug!("POST /api/orders");

    let user = optional_identity(&headers, &state.jwt);

    let today = Utc::now().date_naive();
    validate_checkout(&details, today).map_err(ApiError::validation_fields)?;

    // Freeze the configuration and price it server-side; the client never
    // supplies its own total.
    let (can_checkout, config, rental_period, total) = state.workspace.with_workspace(|ws| {
        (
            ws.can_checkout(),
            ws.config().clone(),
            ws.rental_period(),
            ws.total_price(),
        )
    });

    if !can_checkout {
        return Err(ApiError::validation(
            "A desk and a chair must be selected before checkout",
        ));
    }

    let mut order = Order {
        id: Uuid::new_v4().to_string(),
        user_id: user.map(|c| c.sub),
        workspace_config: config,
        rental_period,
        start_date: details.start_date,
        delivery_address: details.delivery_address,
        total_price_cents: total.cents(),
        status: OrderStatus::Pending,
        contact_name: details.contact_name,
        contact_email: details.contact_email,
        contact_whatsapp: details.contact_whatsapp,
        notes: details.notes,
        created_at: Utc::now(),
    };

    let mock = match &state.db {
        Some(db) => match db.orders().insert(&order).await {
            Ok(()) => false,
            Err(e) => {
                warn!(error = %e, "Order store unreachable, returning mock order");
                order.id = format!("mock-{}", Uuid::new_v4());
                true
            }
        },
        None => {
            order.id = format!("mock-{}", Uuid::new_v4());
            true
        }
    };

    info!(
        order_id = %order.id,
        total = order.total_price_cents,
        mock = mock,
        "Order submitted"
    );

    // The configuration is spent: clear it for the next session
    state.workspace.with_workspace_mut(Workspace::reset);
    state.clear_snapshot().await;

    Ok(Json(SubmitOrderResponse {
        order,
        success: true,
        mock,
    }))
}

/// `GET /api/orders` - the caller's orders, newest first. Requires auth.
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrdersResponse>, ApiError> {
    let claims = require_identity(&headers, &state.jwt)?;
    debug!(user_id = %claims.sub, "GET /api/orders");

    let db = state
        .db
        .as_ref()
        .ok_or_else(|| ApiError::new(ErrorCode::DatabaseError, "Failed to fetch orders"))?;

    let orders = db.orders().list_for_user(&claims.sub).await?;

    Ok(Json(OrdersResponse { orders }))
}
