//! # Workspace Routes
//!
//! One route per engine operation. Mutations are applied under the state
//! lock, the persisted snapshot is refreshed afterwards (explicit
//! save-after-mutation), and every response carries the full workspace
//! view so the storefront never needs a follow-up read.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use monis_core::{
    CartItem, CoreError, Product, RentalPeriod, Step, Workspace, WorkspaceSnapshot,
};

// =============================================================================
// Response Types
// =============================================================================

/// Derived pricing for the current configuration.
#[derive(Debug, Serialize)]
pub struct WorkspaceTotals {
    pub weekly_price_cents: i64,
    pub total_price_cents: i64,
    pub item_count: i64,
}

/// The gating policy evaluated against the current selections, so every
/// storefront applies identical rules.
#[derive(Debug, Serialize)]
pub struct StepGating {
    /// Per-step navigability, indexed 0-3 (desk, chair, accessories, review).
    pub navigable: [bool; 4],
    /// Whether "Continue" is enabled on the current step.
    pub can_continue: bool,
    /// Whether checkout may begin.
    pub can_checkout: bool,
}

/// Full workspace view returned by every workspace endpoint.
#[derive(Debug, Serialize)]
pub struct WorkspaceResponse {
    pub desk: Option<Product>,
    pub chair: Option<Product>,
    pub accessories: Vec<CartItem>,
    pub rental_period: RentalPeriod,
    pub current_step: u8,
    pub checkout_open: bool,
    pub totals: WorkspaceTotals,
    pub gating: StepGating,
}

impl WorkspaceResponse {
    fn from_workspace(ws: &Workspace) -> Self {
        let config = ws.config();
        let mut navigable = [false; 4];
        for step in Step::ALL {
            navigable[step.index() as usize] = ws.can_navigate_to(step);
        }

        WorkspaceResponse {
            desk: config.desk.clone(),
            chair: config.chair.clone(),
            accessories: config.accessories.clone(),
            rental_period: ws.rental_period(),
            current_step: ws.current_step().index(),
            checkout_open: ws.checkout_open(),
            totals: WorkspaceTotals {
                weekly_price_cents: ws.weekly_price().cents(),
                total_price_cents: ws.total_price().cents(),
                item_count: ws.item_count(),
            },
            gating: StepGating {
                navigable,
                can_continue: ws.can_continue(),
                can_checkout: ws.can_checkout(),
            },
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateQtyRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetPeriodRequest {
    pub period: RentalPeriod,
}

#[derive(Debug, Deserialize)]
pub struct SetStepRequest {
    pub step: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetCheckoutOpenRequest {
    pub open: bool,
}

// =============================================================================
// Helpers
// =============================================================================

/// Applies a fallible mutation, persists the snapshot, returns the view.
async fn mutate(
    state: &AppState,
    f: impl FnOnce(&mut Workspace) -> Result<(), CoreError>,
) -> Result<Json<WorkspaceResponse>, ApiError> {
    let (response, snapshot) = state.workspace.with_workspace_mut(
        |ws| -> Result<(WorkspaceResponse, WorkspaceSnapshot), CoreError> {
            f(ws)?;
            Ok((WorkspaceResponse::from_workspace(ws), ws.snapshot()))
        },
    )?;

    state.persist_snapshot(&snapshot).await;
    Ok(Json(response))
}

/// Applies an infallible mutation, persists the snapshot, returns the view.
async fn mutate_infallible(
    state: &AppState,
    f: impl FnOnce(&mut Workspace),
) -> Json<WorkspaceResponse> {
    let (response, snapshot) = state.workspace.with_workspace_mut(|ws| {
        f(ws);
        (WorkspaceResponse::from_workspace(ws), ws.snapshot())
    });

    state.persist_snapshot(&snapshot).await;
    Json(response)
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/workspace` - current configuration, totals, and gating.
pub async fn get_workspace(State(state): State<AppState>) -> Json<WorkspaceResponse> {
    state
        .workspace
        .with_workspace(|ws| Json(WorkspaceResponse::from_workspace(ws)))
}

/// `PUT /api/workspace/desk` - select or clear the desk slot.
///
/// Body: a product JSON object, or `null` to clear.
pub async fn set_desk(
    State(state): State<AppState>,
    Json(product): Json<Option<Product>>,
) -> Result<Json<WorkspaceResponse>, ApiError> {
    debug!(product = ?product.as_ref().map(|p| &p.id), "PUT /api/workspace/desk");
    mutate(&state, |ws| ws.set_desk(product)).await
}

/// `PUT /api/workspace/chair` - select or clear the chair slot.
pub async fn set_chair(
    State(state): State<AppState>,
    Json(product): Json<Option<Product>>,
) -> Result<Json<WorkspaceResponse>, ApiError> {
    debug!(product = ?product.as_ref().map(|p| &p.id), "PUT /api/workspace/chair");
    mutate(&state, |ws| ws.set_chair(product)).await
}

/// `POST /api/workspace/accessories` - add one unit of an accessory.
pub async fn add_accessory(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Json<WorkspaceResponse>, ApiError> {
    debug!(product = %product.id, "POST /api/workspace/accessories");
    mutate(&state, |ws| ws.add_accessory(product)).await
}

/// `PUT /api/workspace/accessories/{id}` - set an accessory's quantity.
///
/// Quantity 0 removes the item; an id not in the set is a no-op.
pub async fn update_accessory_qty(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateQtyRequest>,
) -> Json<WorkspaceResponse> {
    debug!(product = %product_id, quantity = req.quantity, "PUT /api/workspace/accessories/{{id}}");
    mutate_infallible(&state, |ws| {
        ws.update_accessory_qty(&product_id, req.quantity)
    })
    .await
}

/// `DELETE /api/workspace/accessories/{id}` - remove an accessory.
pub async fn remove_accessory(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Json<WorkspaceResponse> {
    debug!(product = %product_id, "DELETE /api/workspace/accessories/{{id}}");
    mutate_infallible(&state, |ws| ws.remove_accessory(&product_id)).await
}

/// `PUT /api/workspace/rental-period` - select a rental duration.
pub async fn set_rental_period(
    State(state): State<AppState>,
    Json(req): Json<SetPeriodRequest>,
) -> Json<WorkspaceResponse> {
    debug!(period = ?req.period, "PUT /api/workspace/rental-period");
    mutate_infallible(&state, |ws| ws.set_rental_period(req.period)).await
}

/// `PUT /api/workspace/step` - move the step cursor (clamped to 0-3).
pub async fn set_step(
    State(state): State<AppState>,
    Json(req): Json<SetStepRequest>,
) -> Json<WorkspaceResponse> {
    mutate_infallible(&state, |ws| ws.set_step(req.step)).await
}

/// `POST /api/workspace/step/next` - advance the cursor (saturates at 3).
pub async fn next_step(State(state): State<AppState>) -> Json<WorkspaceResponse> {
    mutate_infallible(&state, Workspace::next_step).await
}

/// `POST /api/workspace/step/prev` - step back (saturates at 0).
pub async fn prev_step(State(state): State<AppState>) -> Json<WorkspaceResponse> {
    mutate_infallible(&state, Workspace::prev_step).await
}

/// `PUT /api/workspace/checkout-open` - open/close the checkout modal.
pub async fn set_checkout_open(
    State(state): State<AppState>,
    Json(req): Json<SetCheckoutOpenRequest>,
) -> Json<WorkspaceResponse> {
    mutate_infallible(&state, |ws| ws.set_checkout_open(req.open)).await
}

/// `POST /api/workspace/reset` - clear the configuration.
pub async fn reset(State(state): State<AppState>) -> Json<WorkspaceResponse> {
    debug!("POST /api/workspace/reset");
    mutate_infallible(&state, Workspace::reset).await
}
