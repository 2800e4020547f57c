//! # Validation Module
//!
//! Input validation for catalog entries and the checkout form.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen (console / browser form)                                        │
//! │  └── Basic parsing (numbers, method names)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: rule validation                                           │
//! │  ├── Catalog: names present, prices non-negative                        │
//! │  └── Checkout: name/email/address present, payment method selected      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{CheckoutDetails, PaymentMethod, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted free-text form field.
pub const MAX_FIELD_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_FIELD_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use techstore_core::validation::validate_required;
///
/// assert!(validate_required("name", "Ada").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LENGTH,
        });
    }

    Ok(())
}

/// Validates an email address the way a browser `type=email` input does:
/// exactly one `@`, non-empty local part, domain with no whitespace.
///
/// ## Example
/// ```rust
/// use techstore_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("ada.example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;

    let email = email.trim();
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.is_empty() {
        return Err(invalid("must look like name@domain"));
    }

    if domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid("must look like name@domain"));
    }

    Ok(())
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates the delivery details of the checkout form.
pub fn validate_checkout_details(details: &CheckoutDetails) -> ValidationResult<()> {
    validate_required("name", &details.name)?;
    validate_email(&details.email)?;
    validate_required("address", &details.address)?;
    Ok(())
}

/// Requires a selected payment method.
///
/// ## User Workflow
/// ```text
/// Confirm and Pay
///      │
///      ▼
/// validate_payment_selection(None) ← THIS FUNCTION
///      │
///      ▼
/// "Please select a payment method" (blocking, no state change)
/// ```
pub fn validate_payment_selection(
    method: Option<PaymentMethod>,
) -> ValidationResult<PaymentMethod> {
    method.ok_or(ValidationError::PaymentMethodRequired)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a catalog product.
///
/// ## Rules
/// - Name must be present
/// - Price must be non-negative (zero allowed)
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_required("name", &product.name)?;

    if product.price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Ada Lovelace").is_ok());
        assert_eq!(
            validate_required("name", ""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_required("address", &"x".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("  ada@example.com ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("ada").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("ada lovelace@example.com").is_err());
    }

    #[test]
    fn test_validate_checkout_details() {
        let details = CheckoutDetails::new("Ada", "ada@example.com", "1 Main St");
        assert!(validate_checkout_details(&details).is_ok());

        let missing_address = CheckoutDetails::new("Ada", "ada@example.com", " ");
        assert_eq!(
            validate_checkout_details(&missing_address),
            Err(ValidationError::Required {
                field: "address".to_string()
            })
        );
    }

    #[test]
    fn test_validate_payment_selection() {
        assert_eq!(
            validate_payment_selection(None),
            Err(ValidationError::PaymentMethodRequired)
        );
        assert_eq!(
            validate_payment_selection(Some(PaymentMethod::PayPal)),
            Ok(PaymentMethod::PayPal)
        );
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&Product::new(1, "Free Sticker", 0, "🏷", "Misc")).is_ok());
        assert!(validate_product(&Product::new(1, "", 10, "🏷", "Misc")).is_err());
        assert!(validate_product(&Product::new(1, "Refund", -1, "🏷", "Misc")).is_err());
    }
}
