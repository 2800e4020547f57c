//! # Error Types
//!
//! Domain-specific error types for techstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  techstore-core errors (this file)                                     │
//! │  ├── CoreError        - Catalog, cart and checkout rule violations      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  techstore-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  Storefront app errors                                                 │
//! │  └── ApiError         - What the screen sees (code + message)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Screen                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{ProductId, ViewState};

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
///
/// A command that fails with a `CoreError` leaves the state machine
/// untouched: no view change, no cart change, no effects.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not part of the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Two catalog entries share the same id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),

    /// The cart cannot be edited from the current screen.
    ///
    /// ## When This Occurs
    /// The checkout screen has no cart controls; the user must go back to
    /// the cart first.
    #[error("Cart cannot be modified from the {view} view")]
    CartLocked { view: ViewState },

    /// A simulated payment is already being processed.
    #[error("Payment is already being processed")]
    PaymentInProgress,

    /// The action makes no sense on the current screen.
    #[error("Cannot {action} from the {view} view")]
    InvalidTransition {
        action: &'static str,
        view: ViewState,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Payment submitted with no payment method selected.
    ///
    /// This is the blocking message shown on the checkout form.
    #[error("Please select a payment method")]
    PaymentMethodRequired,

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
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
        assert_eq!(
            CoreError::ProductNotFound(42).to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            CoreError::CartLocked {
                view: ViewState::Checkout
            }
            .to_string(),
            "Cart cannot be modified from the checkout view"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");
        assert_eq!(
            ValidationError::PaymentMethodRequired.to_string(),
            "Please select a payment method"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::PaymentMethodRequired.into();
        assert!(matches!(
            core_err,
            CoreError::Validation(ValidationError::PaymentMethodRequired)
        ));
    }
}
