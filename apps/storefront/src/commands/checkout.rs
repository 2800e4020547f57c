//! # Checkout Commands
//!
//! Payment method selection and payment submission.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select_payment_method("PayPal")                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  submit_payment(name, email, address)                                   │
//! │         │                                                               │
//! │         ├── details invalid ──────────► VALIDATION_ERROR                │
//! │         ├── no method ────────────────► "Please select a payment method"│
//! │         │                                                               │
//! │         ▼                                                               │
//! │  processing (1.5 s) ──► order confirmed, cart cleared                   │
//! │                                  │                                      │
//! │                                  ▼ (3 s)                                │
//! │                          back to products                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both timed steps run inside the session; callers see them through
//! [`SessionHandle::subscribe`].

use tracing::debug;

use techstore_core::{CheckoutDetails, Command, PaymentMethod};

use crate::error::ApiError;
use crate::state::{SessionHandle, SessionView};

/// Selects a payment method by label or serialized name.
///
/// ## Arguments
/// * `method` - e.g. `"Credit Card"`, `"paypal"`, `"bank_transfer"`
pub async fn select_payment_method(
    session: &SessionHandle,
    method: &str,
) -> Result<SessionView, ApiError> {
    debug!(method = %method, "select_payment_method command");
    let method: PaymentMethod = method.parse()?;
    session.send(Command::SelectPaymentMethod(method)).await
}

/// Submits the checkout form.
///
/// On success the returned view has `processing` set. The order is placed
/// when the processing delay elapses.
pub async fn submit_payment(
    session: &SessionHandle,
    details: CheckoutDetails,
) -> Result<SessionView, ApiError> {
    debug!(email = %details.email, "submit_payment command");
    session.send(Command::SubmitPayment(details)).await
}
