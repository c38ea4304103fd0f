//! # Wizard Steps and Gating Policy
//!
//! The configurator walks four steps: desk, chair, accessories, review.
//! The engine's step cursor moves freely within the range. *Gating* (which
//! steps a user may actually reach) is a presentation-layer policy defined
//! here so every UI built on the engine replicates the same rules.
//!
//! ## Gating Table
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │ target step  │ navigable when               │
//! ├──────────────┼──────────────────────────────┤
//! │ 0 desk       │ always                       │
//! │ 1 chair      │ desk selected                │
//! │ 2 accessories│ desk AND chair selected      │
//! │ 3 review     │ desk AND chair selected      │
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! "Continue" from the desk step needs a desk, from the chair step a chair.
//! Checkout needs both base slots filled; accessories are optional.

use crate::workspace::WorkspaceConfig;

// =============================================================================
// Step
// =============================================================================

/// A wizard step. The cursor is clamped to this range; `next`/`prev`
/// saturate at the ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    Desk,
    Chair,
    Accessories,
    Review,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Step; 4] = [Step::Desk, Step::Chair, Step::Accessories, Step::Review];

    /// The step's position in the wizard (0-3).
    pub const fn index(&self) -> u8 {
        match self {
            Step::Desk => 0,
            Step::Chair => 1,
            Step::Accessories => 2,
            Step::Review => 3,
        }
    }

    /// Maps an arbitrary integer onto a step, clamping out-of-range values.
    pub const fn from_index(index: i64) -> Step {
        match index {
            i64::MIN..=0 => Step::Desk,
            1 => Step::Chair,
            2 => Step::Accessories,
            _ => Step::Review,
        }
    }

    /// The following step; saturates at review.
    pub const fn next(&self) -> Step {
        match self {
            Step::Desk => Step::Chair,
            Step::Chair => Step::Accessories,
            Step::Accessories => Step::Review,
            Step::Review => Step::Review,
        }
    }

    /// The preceding step; saturates at desk.
    pub const fn prev(&self) -> Step {
        match self {
            Step::Desk => Step::Desk,
            Step::Chair => Step::Desk,
            Step::Accessories => Step::Chair,
            Step::Review => Step::Accessories,
        }
    }

    /// Display label for the step bar.
    pub const fn label(&self) -> &'static str {
        match self {
            Step::Desk => "Desk",
            Step::Chair => "Chair",
            Step::Accessories => "Accessories",
            Step::Review => "Review",
        }
    }
}

// =============================================================================
// Gating Policy
// =============================================================================

/// Whether `step` may be navigated to given the current selections.
pub fn can_navigate_to(config: &WorkspaceConfig, step: Step) -> bool {
    match step {
        Step::Desk => true,
        Step::Chair => config.desk.is_some(),
        Step::Accessories | Step::Review => config.has_base_items(),
    }
}

/// Whether "Continue" is enabled on `current`.
///
/// The desk step requires a desk, the chair step a chair; the accessories
/// step always lets the user move on (accessories are optional). There is
/// no "Continue" past review.
pub fn can_continue(config: &WorkspaceConfig, current: Step) -> bool {
    match current {
        Step::Desk => config.desk.is_some(),
        Step::Chair => config.chair.is_some(),
        Step::Accessories => true,
        Step::Review => false,
    }
}

/// Whether checkout may begin: both base slots filled, regardless of
/// accessories.
pub fn can_checkout(config: &WorkspaceConfig) -> bool {
    config.has_base_items()
}

// =============================================================================
// Unit Tests
// =============================================================================
