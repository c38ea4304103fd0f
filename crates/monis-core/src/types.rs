//! # Domain Types
//!
//! Core domain types used throughout Monis.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  RentalPeriod   │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (string)    │   │  1_week   0%    │   │  id             │       │
//! │  │  category       │   │  2_weeks  5%    │   │  config (JSON)  │       │
//! │  │  price/wk cents │   │  1_month  10%   │   │  total_cents    │       │
//! │  │  price/mo cents │   │  3_months 20%   │   │  status         │       │
//! │  └─────────────────┘   │  6_months 30%   │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  Category: desk | chair | monitor | lamp | plant | keyboard |           │
//! │            accessory | storage                                          │
//! │                                                                         │
//! │  Desk and chair are BASE items: required, single-slot.                  │
//! │  Everything else is a multi-select accessory.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::workspace::WorkspaceConfig;

// =============================================================================
// Category
// =============================================================================

/// Product category. Closed set; desk and chair are the base categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Desk,
    Chair,
    Monitor,
    Lamp,
    Plant,
    Keyboard,
    Accessory,
    Storage,
}

impl Category {
    /// Whether this category fills one of the two required base slots.
    ///
    /// Base items (desk, chair) are single-slot selections; all other
    /// categories go into the accessory set.
    #[inline]
    pub const fn is_base(&self) -> bool {
        matches!(self, Category::Desk | Category::Chair)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Desk => "desk",
            Category::Chair => "chair",
            Category::Monitor => "monitor",
            Category::Lamp => "lamp",
            Category::Plant => "plant",
            Category::Keyboard => "keyboard",
            Category::Accessory => "accessory",
            Category::Storage => "storage",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for rent.
///
/// Catalog entries are immutable: the engine only ever reads them.
/// The `id` is unique within a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (e.g. "desk-electric").
    pub id: String,

    /// Display name shown in the picker and on the order.
    pub name: String,

    /// Product category.
    pub category: Category,

    /// Rental rate per week, in cents.
    pub price_per_week_cents: i64,

    /// Rental rate per month, in cents (display only; pricing is weekly).
    pub price_per_month_cents: i64,

    /// Descriptive text for product details.
    pub description: String,

    /// True only for desk/chair entries (the required base slots).
    pub is_base: bool,

    /// Highlighted in the picker.
    pub is_featured: bool,
}

impl Product {
    /// Returns the weekly rate as a Money type.
    #[inline]
    pub fn weekly_price(&self) -> crate::Money {
        crate::Money::from_cents(self.price_per_week_cents)
    }

    /// Returns the monthly rate as a Money type.
    #[inline]
    pub fn monthly_price(&self) -> crate::Money {
        crate::Money::from_cents(self.price_per_month_cents)
    }
}

// =============================================================================
// Rental Period
// =============================================================================

/// Selectable rental duration with its bundled discount.
///
/// ## Why an enum and not a table?
/// The set is closed and small; making it an enum gives exhaustive matching
/// everywhere a period is handled, and `set_rental_period` needs no
/// validation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum RentalPeriod {
    #[serde(rename = "1_week")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "1_week"))]
    OneWeek,

    #[serde(rename = "2_weeks")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "2_weeks"))]
    TwoWeeks,

    #[serde(rename = "1_month")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "1_month"))]
    OneMonth,

    #[serde(rename = "3_months")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "3_months"))]
    ThreeMonths,

    #[serde(rename = "6_months")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "6_months"))]
    SixMonths,
}

impl RentalPeriod {
    /// All selectable periods, in display order.
    pub const ALL: [RentalPeriod; 5] = [
        RentalPeriod::OneWeek,
        RentalPeriod::TwoWeeks,
        RentalPeriod::OneMonth,
        RentalPeriod::ThreeMonths,
        RentalPeriod::SixMonths,
    ];

    /// Duration of the period in whole weeks.
    pub const fn weeks(&self) -> u32 {
        match self {
            RentalPeriod::OneWeek => 1,
            RentalPeriod::TwoWeeks => 2,
            RentalPeriod::OneMonth => 4,
            RentalPeriod::ThreeMonths => 13,
            RentalPeriod::SixMonths => 26,
        }
    }

    /// Discount bundled with the period, in basis points (500 = 5%).
    pub const fn discount_bps(&self) -> u32 {
        match self {
            RentalPeriod::OneWeek => 0,
            RentalPeriod::TwoWeeks => 500,
            RentalPeriod::OneMonth => 1000,
            RentalPeriod::ThreeMonths => 2000,
            RentalPeriod::SixMonths => 3000,
        }
    }

    /// Human-readable label for display.
    pub const fn label(&self) -> &'static str {
        match self {
            RentalPeriod::OneWeek => "1 Week",
            RentalPeriod::TwoWeeks => "2 Weeks",
            RentalPeriod::OneMonth => "1 Month",
            RentalPeriod::ThreeMonths => "3 Months",
            RentalPeriod::SixMonths => "6 Months",
        }
    }
}

impl Default for RentalPeriod {
    /// New sessions start on the one-month plan.
    fn default() -> Self {
        RentalPeriod::OneMonth
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a rental order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order submitted, awaiting confirmation.
    Pending,
    /// Confirmed by the team.
    Confirmed,
    /// Delivered; rental is running.
    Active,
    /// Rental finished, items returned.
    Completed,
    /// Cancelled before delivery.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted rental order.
///
/// The workspace configuration is frozen into the order at submission time:
/// later catalog changes never alter what was ordered.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,

    /// Owning identity, when the customer was signed in.
    pub user_id: Option<String>,

    /// The configured workspace at submission time (frozen).
    pub workspace_config: WorkspaceConfig,

    pub rental_period: RentalPeriod,

    /// First rental day; must be at least one day in the future.
    #[ts(as = "String")]
    pub start_date: NaiveDate,

    /// Free-text delivery address.
    pub delivery_address: String,

    /// Total for the full period, discount applied, in cents.
    pub total_price_cents: i64,

    pub status: OrderStatus,

    pub contact_name: String,
    pub contact_email: String,
    pub contact_whatsapp: String,

    pub notes: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Checkout Details
// =============================================================================

/// Customer-entered checkout fields, validated before an order is built.
///
/// See [`crate::validation::validate_checkout`] for the per-field rules.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutDetails {
    pub contact_name: String,
    pub contact_email: String,
    pub contact_whatsapp: String,
    pub delivery_address: String,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    pub notes: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_is_base() {
        assert!(Category::Desk.is_base());
        assert!(Category::Chair.is_base());
        assert!(!Category::Monitor.is_base());
        assert!(!Category::Storage.is_base());
    }

    #[test]
    fn test_category_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Desk).unwrap(), "\"desk\"");
        let parsed: Category = serde_json::from_str("\"keyboard\"").unwrap();
        assert_eq!(parsed, Category::Keyboard);
    }

    #[test]
    fn test_rental_period_weeks_and_discounts() {
        assert_eq!(RentalPeriod::OneWeek.weeks(), 1);
        assert_eq!(RentalPeriod::OneWeek.discount_bps(), 0);
        assert_eq!(RentalPeriod::TwoWeeks.weeks(), 2);
        assert_eq!(RentalPeriod::TwoWeeks.discount_bps(), 500);
        assert_eq!(RentalPeriod::OneMonth.weeks(), 4);
        assert_eq!(RentalPeriod::OneMonth.discount_bps(), 1000);
        assert_eq!(RentalPeriod::ThreeMonths.weeks(), 13);
        assert_eq!(RentalPeriod::ThreeMonths.discount_bps(), 2000);
        assert_eq!(RentalPeriod::SixMonths.weeks(), 26);
        assert_eq!(RentalPeriod::SixMonths.discount_bps(), 3000);
    }

    #[test]
    fn test_rental_period_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&RentalPeriod::OneMonth).unwrap(),
            "\"1_month\""
        );
        let parsed: RentalPeriod = serde_json::from_str("\"6_months\"").unwrap();
        assert_eq!(parsed, RentalPeriod::SixMonths);
    }

    #[test]
    fn test_rental_period_default() {
        assert_eq!(RentalPeriod::default(), RentalPeriod::OneMonth);
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
