//! # Checkout Validation
//!
//! Per-field validation for the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form                                              │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules, all failures reported together          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL constraints                                              │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Submission stays blocked until every field passes; errors carry the
//! field name so the UI can report them inline.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::CheckoutDetails;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the contact name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_contact_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "contact_name",
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "contact_name",
            max: 100,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// Matches the storefront's pattern: one `@`, a non-empty local part, and
/// a domain containing a dot, with no whitespace anywhere.
///
/// ## Example
/// ```rust
/// use monis_core::validation::validate_email;
///
/// assert!(validate_email("alex@email.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// assert!(validate_email("two@@signs.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "contact_email",
        });
    }

    let malformed = ValidationError::InvalidFormat {
        field: "contact_email",
        reason: "must look like name@example.com",
    };

    if email.chars().any(char::is_whitespace) {
        return Err(malformed);
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(malformed),
    };

    if local.is_empty() || domain.is_empty() {
        return Err(malformed);
    }

    // Domain needs a dot with something on both sides
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(malformed),
    }
}

/// Validates a WhatsApp-style phone number.
///
/// ## Rules
/// - Must not be empty
/// - Only digits, spaces, and `+ - ( )` are allowed
/// - Must contain at least 6 digits
pub fn validate_whatsapp(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "contact_whatsapp",
        });
    }

    let valid_chars = number
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    let digit_count = number.chars().filter(char::is_ascii_digit).count();

    if !valid_chars || digit_count < 6 {
        return Err(ValidationError::InvalidFormat {
            field: "contact_whatsapp",
            reason: "must be a phone number like +62 812 3456 7890",
        });
    }

    Ok(())
}

/// Validates the delivery address.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 500 characters
pub fn validate_delivery_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "delivery_address",
        });
    }

    if address.chars().count() > 500 {
        return Err(ValidationError::TooLong {
            field: "delivery_address",
            max: 500,
        });
    }

    Ok(())
}

/// Validates the rental start date against a reference "today".
///
/// ## Rules
/// The start date must be at least one day in the future. "Today" is
/// passed in by the caller so this stays a pure function.
pub fn validate_start_date(start: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if start <= today {
        return Err(ValidationError::NotInFuture {
            field: "start_date",
        });
    }

    Ok(())
}

// =============================================================================
// Whole-Form Validation
// =============================================================================

/// Validates every checkout field, collecting all failures.
///
/// Returns the full list rather than the first error so the storefront can
/// mark every offending field in one pass.
pub fn validate_checkout(
    details: &CheckoutDetails,
    today: NaiveDate,
) -> Result<(), Vec<ValidationError>> {
    let checks = [
        validate_contact_name(&details.contact_name),
        validate_email(&details.contact_email),
        validate_whatsapp(&details.contact_whatsapp),
        validate_delivery_address(&details.delivery_address),
        validate_start_date(details.start_date, today),
    ];

    let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            contact_name: "Alex Johnson".to_string(),
            contact_email: "alex@email.com".to_string(),
            contact_whatsapp: "+62 812 3456 7890".to_string(),
            delivery_address: "Jl. Pantai Batu Bolong No. 69, Canggu".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    #[test]
    fn test_validate_contact_name() {
        assert!(validate_contact_name("Alex Johnson").is_ok());
        assert!(validate_contact_name("").is_err());
        assert!(validate_contact_name("   ").is_err());
        assert!(validate_contact_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alex@email.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@nodomain.com").is_err());
        assert!(validate_email("nolocal@").is_err());
        assert!(validate_email("no@dot").is_err());
        assert!(validate_email("sp ace@mail.com").is_err());
        assert!(validate_email("two@@signs.com").is_err());
        assert!(validate_email("dot@end.").is_err());
    }

    #[test]
    fn test_validate_whatsapp() {
        assert!(validate_whatsapp("+62 812 3456 7890").is_ok());
        assert!(validate_whatsapp("0812-3456-7890").is_ok());

        assert!(validate_whatsapp("").is_err());
        assert!(validate_whatsapp("call me").is_err());
        assert!(validate_whatsapp("+123").is_err()); // too few digits
    }

    #[test]
    fn test_validate_delivery_address() {
        assert!(validate_delivery_address("Jl. Raya Canggu 12").is_ok());
        assert!(validate_delivery_address("").is_err());
        assert!(validate_delivery_address(&"x".repeat(600)).is_err());
    }

    #[test]
    fn test_validate_start_date() {
        let today = today();

        // Tomorrow is the earliest valid start
        assert!(validate_start_date(today.succ_opt().unwrap(), today).is_ok());
        assert!(validate_start_date(today, today).is_err());
        assert!(validate_start_date(today.pred_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_validate_checkout_collects_all_errors() {
        let bad = CheckoutDetails {
            contact_name: "".to_string(),
            contact_email: "nope".to_string(),
            contact_whatsapp: "".to_string(),
            delivery_address: "".to_string(),
            start_date: today(),
            notes: None,
        };

        let errors = validate_checkout(&bad, today()).unwrap_err();
        assert_eq!(errors.len(), 5);

        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert!(fields.contains(&"contact_name"));
        assert!(fields.contains(&"contact_email"));
        assert!(fields.contains(&"contact_whatsapp"));
        assert!(fields.contains(&"delivery_address"));
        assert!(fields.contains(&"start_date"));
    }

    #[test]
    fn test_validate_checkout_accepts_valid_form() {
        assert!(validate_checkout(&details(), today()).is_ok());
    }
}
