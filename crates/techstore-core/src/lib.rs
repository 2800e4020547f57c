//! # techstore-core: Pure Storefront Logic for TechStore
//!
//! This crate holds everything the storefront decides: what is in the
//! catalog, what the cart contains, which screen is up and how checkout
//! advances. None of it touches storage, the clock or the terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TechStore Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Console screens (apps/storefront)               │   │
//! │  │   Products ──► Cart ──► Checkout ──► Processing ──► Confirmed   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Session actor (timers, persistence, replies)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Command → Vec<Effect>                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ techstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ catalog │ │  cart   │ │ machine │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO SLEEPING • PURE TRANSITIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              techstore-db (key-value persistence)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, CartLine, ViewState, PaymentMethod, Order
//! - [`money`] - Whole-unit integer money
//! - [`catalog`] - The immutable product list
//! - [`cart`] - Cart operations and restore reconciliation
//! - [`machine`] - View flow and checkout state machine
//! - [`validation`] - Checkout form and catalog rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use techstore_core::{Cart, Catalog, CheckoutTimings, Command, StorefrontMachine};
//!
//! let mut machine =
//!     StorefrontMachine::new(Catalog::default(), Cart::new(), CheckoutTimings::default());
//!
//! machine.handle(Command::AddToCart(1)).unwrap(); // Laptop Pro, $1299
//! machine.handle(Command::AddToCart(3)).unwrap(); // Wireless Headphones, $199
//!
//! assert_eq!(machine.total().units(), 1498);
//! assert_eq!(machine.cart().item_count(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod machine;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, ReconcileReport, MAX_LINE_QUANTITY};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use machine::{
    CheckoutPhase, CheckoutTimings, Command, Effect, StorefrontMachine, StorefrontView, TimerKind,
    TimerToken,
};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot lives under.
///
/// The value is a JSON array of cart lines. There is no schema version.
pub const CART_STORAGE_KEY: &str = "cart";
