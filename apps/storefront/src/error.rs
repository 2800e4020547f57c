//! # API Error Type
//!
//! Unified error type for storefront commands, plus the startup errors.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in TechStore                              │
//! │                                                                         │
//! │  Console                     Rust Backend                               │
//! │  ───────                     ────────────                               │
//! │                                                                         │
//! │  "submit Ada | ada@x.io | 1 Main St"                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  commands::submit_payment → Result<SessionView, ApiError>        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule violated? ─── CoreError::Validation(..) ───┐               │  │
//! │  │         │                                        ▼               │  │
//! │  │  Storage failed? ── DbError::QueryFailed(..) ── ApiError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ! [VALIDATION_ERROR] Please select a payment method                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use techstore_core::{CoreError, ValidationError};
use techstore_db::DbError;
use thiserror::Error;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Please select a payment method"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart can't be changed right now
    CartError,

    /// Checkout sequence rejected the action
    PaymentError,

    /// The store failed
    StorageError,

    /// Session gone or invariant broken
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::PaymentError => "PAYMENT_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "Storage operation failed");
        ApiError::new(ErrorCode::StorageError, "Storage operation failed")
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::DuplicateProduct(_) => ApiError::internal(err.to_string()),
            CoreError::CartLocked { .. } => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::PaymentInProgress | CoreError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::PaymentError, err.to_string())
            }
            // The bare message is what the checkout form shows
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Configuration & Startup Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Config file is not valid TOML for [`crate::config::StorefrontConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that stop the storefront from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] DbError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use techstore_core::ViewState;

    #[test]
    fn test_payment_method_required_message() {
        let err = ApiError::from(CoreError::Validation(ValidationError::PaymentMethodRequired));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please select a payment method");
    }

    #[test]
    fn test_core_error_codes() {
        assert_eq!(
            ApiError::from(CoreError::ProductNotFound(9)),
            ApiError::new(ErrorCode::NotFound, "Product not found: 9")
        );
        assert_eq!(
            ApiError::from(CoreError::CartLocked {
                view: ViewState::Checkout
            })
            .code,
            ErrorCode::CartError
        );
        assert_eq!(
            ApiError::from(CoreError::PaymentInProgress).code,
            ErrorCode::PaymentError
        );
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::validation("bad")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "VALIDATION_ERROR", "message": "bad" })
        );
        assert_eq!(ApiError::validation("bad").to_string(), "[VALIDATION_ERROR] bad");
    }
}
