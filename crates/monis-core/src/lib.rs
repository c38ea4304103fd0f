//! # monis-core: Pure Business Logic for the Monis Workspace Configurator
//!
//! This crate is the **heart** of Monis. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Monis Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (Web UI)                          │   │
//! │  │    Desk Picker ──► Chair Picker ──► Accessories ──► Review     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (JSON)                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    API Routes                                   │   │
//! │  │    /api/products, /api/workspace/*, /api/orders                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ monis-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ workspace │  │   steps   │  │   │
//! │  │   │  Product  │  │   Money   │  │ Workspace │  │  gating   │  │   │
//! │  │   │   Order   │  │ Discount  │  │ CartItem  │  │  policy   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    monis-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, RentalPeriod, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`workspace`] - The workspace configuration engine and pricing
//! - [`steps`] - Wizard step cursor and navigation gating policy
//! - [`catalog`] - Built-in fallback product catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout form validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use monis_core::workspace::Workspace;
//! use monis_core::types::RentalPeriod;
//! use monis_core::catalog;
//!
//! let mut ws = Workspace::new();
//! let desk = catalog::builtin_catalog()
//!     .into_iter()
//!     .find(|p| p.id == "desk-electric")
//!     .unwrap();
//!
//! ws.set_desk(Some(desk)).unwrap();
//! ws.set_rental_period(RentalPeriod::OneMonth);
//!
//! // Electric desk: $5.00/week, 1 month = 4 weeks at 10% off
//! assert_eq!(ws.weekly_price().cents(), 500);
//! assert_eq!(ws.total_price().cents(), 1800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod steps;
pub mod types;
pub mod validation;
pub mod workspace;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use monis_core::Money` instead of
// `use monis_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use steps::Step;
pub use types::*;
pub use workspace::{CartItem, Workspace, WorkspaceConfig, WorkspaceSnapshot};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Namespaced key under which the workspace snapshot is persisted.
///
/// ## Why a constant?
/// The snapshot store is a plain key-value surface. Only the configuration
/// and the selected rental period live under this key; the step cursor and
/// modal flags are transient and never persisted.
pub const SNAPSHOT_KEY: &str = "monis-workspace-config";
