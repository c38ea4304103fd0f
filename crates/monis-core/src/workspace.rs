//! # Workspace Configuration Engine
//!
//! Owns the mutable workspace configuration (selected desk, selected chair,
//! accessory quantities), the rental-duration selection, the wizard step
//! cursor, and derived pricing.
//!
//! ## Engine Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Workspace Operations                                 │
//! │                                                                         │
//! │  Storefront Action        Engine Operation         State Change         │
//! │  ─────────────────        ────────────────         ────────────         │
//! │                                                                         │
//! │  Pick a desk ────────────► set_desk() ───────────► config.desk = p     │
//! │                                                                         │
//! │  Pick a chair ───────────► set_chair() ──────────► config.chair = p    │
//! │                                                                         │
//! │  Click accessory ────────► add_accessory() ──────► qty += 1 or push    │
//! │                                                                         │
//! │  Change quantity ────────► update_accessory_qty()─► qty = n (0 drops)  │
//! │                                                                         │
//! │  Click remove ───────────► remove_accessory() ───► item dropped        │
//! │                                                                         │
//! │  Pick a plan ────────────► set_rental_period() ──► period = p          │
//! │                                                                         │
//! │  Order confirmed ────────► reset() ──────────────► empty config        │
//! │                                                                         │
//! │  Every mutation commits immediately; there is no rollback or undo.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing
//! ```text
//! base_weekly = desk + chair + Σ accessory × qty      (cents per week)
//! total       = base_weekly × weeks, minus the period's bundled discount,
//!               rounded to the nearest cent
//! ```
//! The weekly price is a "sticker price": it ignores the selected period
//! entirely, so switching plans never changes it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::steps::{self, Step};
use crate::types::{Category, Product, RentalPeriod};

// =============================================================================
// Cart Item
// =============================================================================

/// An accessory selection: a product together with how many of it.
///
/// ## Invariants
/// - `quantity` >= 1 while the item is in the accessory set; a quantity
///   reaching 0 removes the item entirely
/// - the product's category is never desk or chair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    /// Weekly rate for this line (unit weekly rate × quantity).
    #[inline]
    pub fn line_weekly_price(&self) -> Money {
        self.product.weekly_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Workspace Configuration
// =============================================================================

/// The user's current selection: at most one desk, at most one chair,
/// and a set of accessories unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkspaceConfig {
    pub desk: Option<Product>,
    pub chair: Option<Product>,
    pub accessories: Vec<CartItem>,
}

impl WorkspaceConfig {
    /// Both base slots filled? Checkout and the later wizard steps
    /// require this.
    #[inline]
    pub fn has_base_items(&self) -> bool {
        self.desk.is_some() && self.chair.is_some()
    }

    /// Total selected items: base slots count 1 each, accessories count
    /// their quantities.
    pub fn item_count(&self) -> i64 {
        let base = self.desk.is_some() as i64 + self.chair.is_some() as i64;
        base + self.accessories.iter().map(|i| i.quantity).sum::<i64>()
    }
}

// =============================================================================
// Persisted Snapshot
// =============================================================================

/// The subset of engine state that survives a session.
///
/// Only the configuration and the rental period are persisted; the step
/// cursor and the checkout-modal flag are transient UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkspaceSnapshot {
    pub config: WorkspaceConfig,
    pub rental_period: RentalPeriod,
}

// =============================================================================
// Pricing
// =============================================================================

/// Computes the rental total for a configuration over a period.
///
/// ## Formula
/// ```text
/// base_weekly = desk + chair + Σ accessory × qty
/// total       = base_weekly × weeks
/// result      = total - discount, rounded to the nearest cent
/// ```
///
/// Missing base slots simply contribute zero; an empty configuration
/// prices at zero.
pub fn rental_total(
    desk: Option<&Product>,
    chair: Option<&Product>,
    accessories: &[CartItem],
    weeks: u32,
    discount_bps: u32,
) -> Money {
    let base_weekly = desk.map(Product::weekly_price).unwrap_or_default()
        + chair.map(Product::weekly_price).unwrap_or_default()
        + accessories
            .iter()
            .map(CartItem::line_weekly_price)
            .fold(Money::zero(), |acc, m| acc + m);

    (base_weekly * weeks as i64).apply_percentage_discount(discount_bps)
}

// =============================================================================
// Workspace Engine
// =============================================================================

/// The workspace configuration engine.
///
/// ## Invariants
/// - At most one desk and one chair selected at any time
/// - Accessories are unique by product id; insertion order is preserved
/// - No accessory entry has category desk or chair
/// - The step cursor stays within [0, 3]
///
/// ## Concurrency
/// The engine itself is single-threaded and synchronous: every operation
/// runs to completion before the next is observed. The composing layer is
/// responsible for serializing access (see the server's `WorkspaceState`).
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    config: WorkspaceConfig,
    rental_period: RentalPeriod,
    current_step: Step,
    checkout_open: bool,
}

impl Workspace {
    /// Creates an empty workspace: no selections, default rental period,
    /// step cursor at the desk step.
    pub fn new() -> Self {
        Workspace::default()
    }

    /// Rebuilds a workspace from a persisted snapshot.
    ///
    /// Transient state (step cursor, checkout flag) starts fresh.
    pub fn from_snapshot(snapshot: WorkspaceSnapshot) -> Self {
        Workspace {
            config: snapshot.config,
            rental_period: snapshot.rental_period,
            current_step: Step::default(),
            checkout_open: false,
        }
    }

    /// The persistable subset of the current state.
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            config: self.config.clone(),
            rental_period: self.rental_period,
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn rental_period(&self) -> RentalPeriod {
        self.rental_period
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn checkout_open(&self) -> bool {
        self.checkout_open
    }

    // -------------------------------------------------------------------------
    // Base slots
    // -------------------------------------------------------------------------

    /// Selects (or clears) the desk slot, replacing any prior selection.
    ///
    /// A non-desk product is rejected rather than silently admitted;
    /// callers filter their pickers by category, so a mismatch here is a
    /// programming error worth surfacing.
    pub fn set_desk(&mut self, product: Option<Product>) -> CoreResult<()> {
        if let Some(ref p) = product {
            if p.category != Category::Desk {
                return Err(CoreError::CategoryMismatch {
                    product_id: p.id.clone(),
                    expected: Category::Desk,
                    found: p.category,
                });
            }
        }
        self.config.desk = product;
        Ok(())
    }

    /// Selects (or clears) the chair slot. Symmetric to [`Self::set_desk`].
    pub fn set_chair(&mut self, product: Option<Product>) -> CoreResult<()> {
        if let Some(ref p) = product {
            if p.category != Category::Chair {
                return Err(CoreError::CategoryMismatch {
                    product_id: p.id.clone(),
                    expected: Category::Chair,
                    found: p.category,
                });
            }
        }
        self.config.chair = product;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessories
    // -------------------------------------------------------------------------

    /// Adds one unit of an accessory.
    ///
    /// If the product is already selected its quantity goes up by one and
    /// its position in the set is unchanged; otherwise it appends with
    /// quantity 1. Base-category products never enter the accessory set.
    pub fn add_accessory(&mut self, product: Product) -> CoreResult<()> {
        if product.category.is_base() {
            return Err(CoreError::CategoryMismatch {
                product_id: product.id.clone(),
                expected: Category::Accessory,
                found: product.category,
            });
        }

        if let Some(item) = self
            .config
            .accessories
            .iter_mut()
            .find(|i| i.product.id == product.id)
        {
            item.quantity += 1;
            return Ok(());
        }

        self.config.accessories.push(CartItem {
            product,
            quantity: 1,
        });
        Ok(())
    }

    /// Removes an accessory by product id. Absent ids are a no-op.
    pub fn remove_accessory(&mut self, product_id: &str) {
        self.config.accessories.retain(|i| i.product.id != product_id);
    }

    /// Sets an accessory's quantity outright (not an increment).
    ///
    /// A quantity of zero (or less) behaves as [`Self::remove_accessory`].
    /// An absent id is a no-op, not an insert: inserting would need a full
    /// `Product`, and the picker always goes through `add_accessory` first.
    pub fn update_accessory_qty(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_accessory(product_id);
            return;
        }

        if let Some(item) = self
            .config
            .accessories
            .iter_mut()
            .find(|i| i.product.id == product_id)
        {
            item.quantity = quantity;
        }
    }

    // -------------------------------------------------------------------------
    // Rental period, step cursor, modal
    // -------------------------------------------------------------------------

    /// Replaces the selected rental duration. The value is drawn from a
    /// closed enum, so there is nothing to validate.
    pub fn set_rental_period(&mut self, period: RentalPeriod) {
        self.rental_period = period;
    }

    /// Moves the step cursor, clamping to the valid range.
    ///
    /// The engine does not gate navigation; see [`crate::steps`] for the
    /// policy presentation layers apply.
    pub fn set_step(&mut self, step: i64) {
        self.current_step = Step::from_index(step);
    }

    /// Advances the step cursor, saturating at the review step.
    pub fn next_step(&mut self) {
        self.current_step = self.current_step.next();
    }

    /// Moves the step cursor back, saturating at the desk step.
    pub fn prev_step(&mut self) {
        self.current_step = self.current_step.prev();
    }

    /// Opens or closes the checkout modal (transient, never persisted).
    pub fn set_checkout_open(&mut self, open: bool) {
        self.checkout_open = open;
    }

    /// Clears the configuration after a completed order (or on demand):
    /// empty slots and accessories, step cursor back to the start, modal
    /// closed. The rental period selection is preserved.
    pub fn reset(&mut self) {
        self.config = WorkspaceConfig::default();
        self.current_step = Step::default();
        self.checkout_open = false;
    }

    // -------------------------------------------------------------------------
    // Derived pricing
    // -------------------------------------------------------------------------

    /// The undiscounted base weekly rate across all selected items.
    ///
    /// Deliberately independent of the selected rental period: this is the
    /// sticker price, distinct from the discounted total.
    pub fn weekly_price(&self) -> Money {
        rental_total(
            self.config.desk.as_ref(),
            self.config.chair.as_ref(),
            &self.config.accessories,
            1,
            0,
        )
    }

    /// Total for the selected rental period, discount applied, rounded to
    /// the nearest cent.
    pub fn total_price(&self) -> Money {
        rental_total(
            self.config.desk.as_ref(),
            self.config.chair.as_ref(),
            &self.config.accessories,
            self.rental_period.weeks(),
            self.rental_period.discount_bps(),
        )
    }

    /// Number of selected items: 1 per filled base slot plus the sum of
    /// accessory quantities.
    pub fn item_count(&self) -> i64 {
        self.config.item_count()
    }

    // -------------------------------------------------------------------------
    // Gating queries (presentation-facing policy, see crate::steps)
    // -------------------------------------------------------------------------

    /// Whether the given step may be navigated to with the current
    /// selections.
    pub fn can_navigate_to(&self, step: Step) -> bool {
        steps::can_navigate_to(&self.config, step)
    }

    /// Whether "Continue" is enabled on the current step.
    pub fn can_continue(&self) -> bool {
        steps::can_continue(&self.config, self.current_step)
    }

    /// Whether checkout may be opened: both base slots must be filled,
    /// accessories are optional.
    pub fn can_checkout(&self) -> bool {
        steps::can_checkout(&self.config)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: Category, weekly_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category,
            price_per_week_cents: weekly_cents,
            price_per_month_cents: weekly_cents * 3,
            description: String::new(),
            is_base: category.is_base(),
            is_featured: false,
        }
    }

    fn desk() -> Product {
        product("desk-1", Category::Desk, 500)
    }

    fn chair() -> Product {
        product("chair-1", Category::Chair, 600)
    }

    fn lamp() -> Product {
        product("lamp-1", Category::Lamp, 200)
    }

    #[test]
    fn test_set_desk_replaces_selection() {
        let mut ws = Workspace::new();
        ws.set_desk(Some(desk())).unwrap();
        ws.set_desk(Some(product("desk-2", Category::Desk, 300)))
            .unwrap();

        assert_eq!(ws.config().desk.as_ref().unwrap().id, "desk-2");

        ws.set_desk(None).unwrap();
        assert!(ws.config().desk.is_none());
    }

    #[test]
    fn test_set_desk_rejects_wrong_category() {
        let mut ws = Workspace::new();
        let err = ws.set_desk(Some(chair())).unwrap_err();
        assert!(matches!(err, CoreError::CategoryMismatch { .. }));
        assert!(ws.config().desk.is_none());
    }

    #[test]
    fn test_set_chair_rejects_wrong_category() {
        let mut ws = Workspace::new();
        assert!(ws.set_chair(Some(desk())).is_err());
        assert!(ws.set_chair(Some(chair())).is_ok());
    }

    #[test]
    fn test_add_accessory_repeated_accumulates_quantity() {
        let mut ws = Workspace::new();
        for _ in 0..4 {
            ws.add_accessory(lamp()).unwrap();
        }

        // Exactly one CartItem for the id, quantity equals the call count
        assert_eq!(ws.config().accessories.len(), 1);
        assert_eq!(ws.config().accessories[0].quantity, 4);
    }

    #[test]
    fn test_add_accessory_preserves_insertion_order() {
        let mut ws = Workspace::new();
        ws.add_accessory(lamp()).unwrap();
        ws.add_accessory(product("plant-1", Category::Plant, 100))
            .unwrap();
        ws.add_accessory(lamp()).unwrap();

        let ids: Vec<&str> = ws
            .config()
            .accessories
            .iter()
            .map(|i| i.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["lamp-1", "plant-1"]);
    }

    #[test]
    fn test_add_accessory_rejects_base_items() {
        let mut ws = Workspace::new();
        assert!(ws.add_accessory(desk()).is_err());
        assert!(ws.config().accessories.is_empty());
    }

    #[test]
    fn test_remove_accessory_is_idempotent() {
        let mut ws = Workspace::new();
        ws.add_accessory(lamp()).unwrap();

        ws.remove_accessory("lamp-1");
        assert!(ws.config().accessories.is_empty());

        // Second removal is a no-op, not an error
        ws.remove_accessory("lamp-1");
        assert!(ws.config().accessories.is_empty());
    }

    #[test]
    fn test_update_qty_zero_equals_remove() {
        let mut ws = Workspace::new();
        ws.add_accessory(lamp()).unwrap();
        ws.update_accessory_qty("lamp-1", 0);
        assert!(ws.config().accessories.is_empty());
    }

    #[test]
    fn test_update_qty_sets_not_increments() {
        let mut ws = Workspace::new();
        ws.add_accessory(lamp()).unwrap();
        ws.update_accessory_qty("lamp-1", 5);
        assert_eq!(ws.config().accessories[0].quantity, 5);
        ws.update_accessory_qty("lamp-1", 2);
        assert_eq!(ws.config().accessories[0].quantity, 2);
    }

    #[test]
    fn test_update_qty_absent_id_is_noop() {
        let mut ws = Workspace::new();
        ws.update_accessory_qty("ghost", 3);
        assert!(ws.config().accessories.is_empty());
    }

    #[test]
    fn test_item_count() {
        let mut ws = Workspace::new();
        assert_eq!(ws.item_count(), 0);

        ws.set_desk(Some(desk())).unwrap();
        ws.set_chair(Some(chair())).unwrap();
        ws.add_accessory(lamp()).unwrap();
        ws.add_accessory(lamp()).unwrap();
        ws.add_accessory(product("plant-1", Category::Plant, 100))
            .unwrap();

        // 1 desk + 1 chair + 2 lamps + 1 plant
        assert_eq!(ws.item_count(), 5);
    }

    #[test]
    fn test_weekly_price_invariant_under_period_change() {
        let mut ws = Workspace::new();
        ws.set_desk(Some(desk())).unwrap();
        ws.add_accessory(lamp()).unwrap();

        let sticker = ws.weekly_price();
        for period in RentalPeriod::ALL {
            ws.set_rental_period(period);
            assert_eq!(ws.weekly_price(), sticker);
        }
    }

    #[test]
    fn test_pricing_one_month_discounted() {
        // desk @5/wk + chair @6/wk + 2× accessory @2/wk, 1 month
        // weekly = 5+6+4 = 15; total = 15 × 4 × 0.9 = 54.00
        let mut ws = Workspace::new();
        ws.set_desk(Some(desk())).unwrap();
        ws.set_chair(Some(chair())).unwrap();
        ws.add_accessory(lamp()).unwrap();
        ws.add_accessory(lamp()).unwrap();
        ws.set_rental_period(RentalPeriod::OneMonth);

        assert_eq!(ws.weekly_price().cents(), 1500);
        assert_eq!(ws.total_price().cents(), 5400);
    }

    #[test]
    fn test_pricing_accessory_only_one_week() {
        // no desk/chair, one accessory @3/wk qty 1, 1 week, 0% → 3.00
        let mut ws = Workspace::new();
        ws.add_accessory(product("plant-2", Category::Plant, 300))
            .unwrap();
        ws.set_rental_period(RentalPeriod::OneWeek);

        assert_eq!(ws.total_price().cents(), 300);
    }

    #[test]
    fn test_pricing_empty_configuration_is_zero() {
        let ws = Workspace::new();
        assert!(ws.weekly_price().is_zero());
        assert!(ws.total_price().is_zero());
    }

    #[test]
    fn test_reset_clears_everything_but_period() {
        let mut ws = Workspace::new();
        ws.set_desk(Some(desk())).unwrap();
        ws.set_chair(Some(chair())).unwrap();
        ws.add_accessory(lamp()).unwrap();
        ws.set_rental_period(RentalPeriod::SixMonths);
        ws.set_step(3);
        ws.set_checkout_open(true);

        ws.reset();

        assert!(ws.config().desk.is_none());
        assert!(ws.config().chair.is_none());
        assert!(ws.config().accessories.is_empty());
        assert_eq!(ws.current_step(), Step::Desk);
        assert!(!ws.checkout_open());
        // Period selection survives the reset
        assert_eq!(ws.rental_period(), RentalPeriod::SixMonths);
    }

    #[test]
    fn test_step_cursor_clamps() {
        let mut ws = Workspace::new();

        ws.set_step(-5);
        assert_eq!(ws.current_step(), Step::Desk);

        ws.set_step(99);
        assert_eq!(ws.current_step(), Step::Review);

        ws.next_step();
        assert_eq!(ws.current_step(), Step::Review); // saturates at 3

        ws.set_step(0);
        ws.prev_step();
        assert_eq!(ws.current_step(), Step::Desk); // saturates at 0
    }

    #[test]
    fn test_snapshot_roundtrip_drops_transient_state() {
        let mut ws = Workspace::new();
        ws.set_desk(Some(desk())).unwrap();
        ws.set_rental_period(RentalPeriod::ThreeMonths);
        ws.set_step(2);
        ws.set_checkout_open(true);

        let restored = Workspace::from_snapshot(ws.snapshot());

        assert_eq!(restored.config(), ws.config());
        assert_eq!(restored.rental_period(), RentalPeriod::ThreeMonths);
        // Step cursor and modal flag are not persisted
        assert_eq!(restored.current_step(), Step::Desk);
        assert!(!restored.checkout_open());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut ws = Workspace::new();
        ws.set_desk(Some(desk())).unwrap();

        let json = serde_json::to_string(&ws.snapshot()).unwrap();
        let parsed: WorkspaceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ws.snapshot());
    }
}
