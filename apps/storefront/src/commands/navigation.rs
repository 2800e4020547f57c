//! # Navigation Commands
//!
//! Moving between the products grid, the cart and the checkout form.
//!
//! ```text
//!                 view_cart                 checkout
//!   ┌──────────┐ ─────────► ┌──────────┐ ─────────► ┌──────────┐
//!   │ Products │            │   Cart   │            │ Checkout │
//!   └──────────┘ ◄───────── └──────────┘ ◄───────── └──────────┘
//!        ▲      continue_shopping       back_to_cart      │
//!        └──────────────── order confirmed ───────────────┘
//! ```
//!
//! `checkout` with an empty cart and `back_to_cart` outside checkout are
//! accepted and change nothing. Leaving checkout while a payment is being
//! processed cancels the payment.

use tracing::debug;

use techstore_core::Command;

use crate::error::ApiError;
use crate::state::{SessionHandle, SessionView};

/// Shows the cart.
pub async fn view_cart(session: &SessionHandle) -> Result<SessionView, ApiError> {
    debug!("view_cart command");
    session.send(Command::ViewCart).await
}

/// Shows the products grid.
pub async fn continue_shopping(session: &SessionHandle) -> Result<SessionView, ApiError> {
    debug!("continue_shopping command");
    session.send(Command::ContinueShopping).await
}

/// Opens the checkout form.
pub async fn checkout(session: &SessionHandle) -> Result<SessionView, ApiError> {
    debug!("checkout command");
    session.send(Command::Checkout).await
}

/// Returns from checkout to the cart.
pub async fn back_to_cart(session: &SessionHandle) -> Result<SessionView, ApiError> {
    debug!("back_to_cart command");
    session.send(Command::BackToCart).await
}

/// Current state without changing anything.
pub fn get_session(session: &SessionHandle) -> SessionView {
    debug!("get_session command");
    session.view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use techstore_core::{Catalog, ViewState};
    use techstore_db::{CartRepository, MemoryStore};

    use crate::commands::add_to_cart;
    use crate::state::{SessionActor, SessionOptions};

    async fn session() -> SessionHandle {
        SessionActor::start(
            Catalog::default(),
            CartRepository::new(MemoryStore::new()),
            SessionOptions::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_checkout() {
        let session = session().await;

        view_cart(&session).await.unwrap();
        let view = checkout(&session).await.unwrap();
        assert_eq!(view.view, ViewState::Cart);
    }

    #[tokio::test]
    async fn test_round_trip_through_screens() {
        let session = session().await;
        assert_eq!(get_session(&session).view, ViewState::Products);

        add_to_cart(&session, 6).await.unwrap();
        assert_eq!(view_cart(&session).await.unwrap().view, ViewState::Cart);
        assert_eq!(checkout(&session).await.unwrap().view, ViewState::Checkout);
        assert_eq!(back_to_cart(&session).await.unwrap().view, ViewState::Cart);

        // Outside checkout this is a no-op
        assert_eq!(back_to_cart(&session).await.unwrap().view, ViewState::Cart);

        let view = continue_shopping(&session).await.unwrap();
        assert_eq!(view.view, ViewState::Products);
        assert_eq!(view.item_count, 1);
    }
}
