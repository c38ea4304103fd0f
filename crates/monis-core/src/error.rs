//! # Error Types
//!
//! Domain-specific error types for monis-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  monis-core errors (this file)                                         │
//! │  ├── CoreError        - Configuration rule violations                  │
//! │  └── ValidationError  - Checkout field validation failures             │
//! │                                                                         │
//! │  monis-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in server)                                                │
//! │  └── ApiError         - What the storefront sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Storefront   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, field name, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::Category;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent configuration rule violations. Most engine
/// operations are total functions; only the category-checked slot and
/// accessory operations can fail.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product was offered to a slot it does not belong to.
    ///
    /// ## When This Occurs
    /// - A chair (or anything else) passed to the desk slot
    /// - A desk passed to the chair slot
    /// - A desk/chair passed to the accessory set
    #[error("Product {product_id} has category {found}, expected {expected}")]
    CategoryMismatch {
        product_id: String,
        expected: Category,
        found: Category,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout form validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// They are reported inline per field; submission stays blocked until
/// every field passes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// A date that must lie in the future does not.
    #[error("{field} must be at least one day in the future")]
    NotInFuture { field: &'static str },
}

impl ValidationError {
    /// The name of the field this error is attached to.
    ///
    /// Used by the API layer to report errors inline per field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotInFuture { field } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CategoryMismatch {
            product_id: "chair-gaming".to_string(),
            expected: Category::Desk,
            found: Category::Chair,
        };
        assert_eq!(
            err.to_string(),
            "Product chair-gaming has category chair, expected desk"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "contact_name",
        };
        assert_eq!(err.to_string(), "contact_name is required");

        let err = ValidationError::NotInFuture {
            field: "start_date",
        };
        assert_eq!(
            err.to_string(),
            "start_date must be at least one day in the future"
        );
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::InvalidFormat {
            field: "contact_email",
            reason: "must look like name@example.com",
        };
        assert_eq!(err.field(), "contact_email");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "delivery_address",
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
