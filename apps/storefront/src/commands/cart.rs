//! # Cart Commands
//!
//! Commands that change cart contents.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  (locked)│     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                             │             │
//! │                   update_quantity                         │             │
//! │                   remove_from_cart                        │             │
//! │                                                           ▼             │
//! │                                              cart cleared (empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every change is written to the configured store before the command
//! returns.

use tracing::debug;

use techstore_core::{Command, ProductId};

use crate::error::ApiError;
use crate::state::{SessionHandle, SessionView};

/// Adds one unit of a catalog product.
///
/// ## Behavior
/// - Already in cart: quantity goes up by one
/// - Not in cart: added with quantity 1 and the catalog's current price
/// - Unknown id: `NOT_FOUND`, nothing changes
/// - On the checkout screen: `CART_ERROR`, nothing changes
pub async fn add_to_cart(
    session: &SessionHandle,
    product_id: ProductId,
) -> Result<SessionView, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");
    session.send(Command::AddToCart(product_id)).await
}

/// Changes a line's quantity by `delta`.
///
/// A result below 1 removes the line. Ids not in the cart are ignored.
pub async fn update_quantity(
    session: &SessionHandle,
    product_id: ProductId,
    delta: i64,
) -> Result<SessionView, ApiError> {
    debug!(product_id = %product_id, delta = delta, "update_quantity command");
    session
        .send(Command::UpdateQuantity {
            id: product_id,
            delta,
        })
        .await
}

/// Removes a line whatever its quantity.
pub async fn remove_from_cart(
    session: &SessionHandle,
    product_id: ProductId,
) -> Result<SessionView, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    session.send(Command::RemoveFromCart(product_id)).await
}
