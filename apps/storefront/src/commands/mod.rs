//! # Storefront Commands
//!
//! Every user action the storefront accepts.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── cart.rs        ◄─── Add, quantity changes, removal
//! ├── navigation.rs  ◄─── Products / cart / checkout screens
//! └── checkout.rs    ◄─── Payment method and submission
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Console                                                                │
//! │  ───────                                                                │
//! │  > add 3                                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::add_to_cart(&session, 3)                                     │
//! │         │                                                               │
//! │         │ (mpsc + oneshot)                                              │
//! │         ▼                                                               │
//! │  SessionActor: machine.handle(Command::AddToCart(3))                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<SessionView, ApiError>                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the full [`SessionView`](crate::state::SessionView)
//! after the change, so the caller can redraw without a second round trip.

pub mod cart;
pub mod checkout;
pub mod navigation;

pub use cart::{add_to_cart, remove_from_cart, update_quantity};
pub use checkout::{select_payment_method, submit_payment};
pub use navigation::{back_to_cart, checkout, continue_shopping, get_session, view_cart};
