//! # Storefront State Machine
//!
//! The view flow and checkout sequence as an explicit finite-state machine.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐  ViewCart   ┌──────────┐  Checkout (cart non-empty)      │
//! │   │ products │────────────►│   cart   │─────────────────┐               │
//! │   │          │◄────────────│          │◄──────┐         ▼               │
//! │   └──────────┘  Continue   └──────────┘ Back  │  ┌──────────────────┐   │
//! │        ▲        Shopping                      └──│ checkout/editing │   │
//! │        │                                         └────────┬─────────┘   │
//! │        │                                    SubmitPayment │             │
//! │        │                                                  ▼             │
//! │        │                                   ┌────────────────────────┐   │
//! │        │                                   │ checkout/processing    │   │
//! │        │                                   │ timer: PaymentProcessing│  │
//! │        │                                   └───────────┬────────────┘   │
//! │        │                                    timer fires│ cart cleared   │
//! │        │                                               ▼                │
//! │        │   timer fires:                    ┌────────────────────────┐   │
//! │        └───reset view, method, ────────────│ checkout/confirmed     │   │
//! │            order flag                      │ timer: ConfirmationDisplay│ │
//! │                                            └────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Effects, Not I/O
//! The machine never sleeps and never writes storage. Every transition
//! returns the [`Effect`]s the driver must execute: persist the cart, start
//! or cancel a timer, announce a placed order. A timer reports back with
//! [`Command::TimerElapsed`] carrying its [`TimerToken`]; only the token the
//! machine currently has armed is honored, so a timer that outlives its
//! state can never act on a newer one.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, CheckoutDetails, Order, PaymentMethod, ProductId, ViewState};
use crate::validation::{validate_checkout_details, validate_payment_selection};

// =============================================================================
// Timers
// =============================================================================

/// Identity of one scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn value(&self) -> u64 {
        self.0
    }
}

/// What a timer is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Simulated payment gateway latency.
    PaymentProcessing,
    /// How long the confirmation screen stays up.
    ConfirmationDisplay,
}

/// Delays of the simulated checkout sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTimings {
    pub processing_delay: Duration,
    pub confirmation_delay: Duration,
}

impl Default for CheckoutTimings {
    /// 1.5 s processing, 3 s confirmation.
    fn default() -> Self {
        CheckoutTimings {
            processing_delay: Duration::from_millis(1500),
            confirmation_delay: Duration::from_millis(3000),
        }
    }
}

// =============================================================================
// Commands & Effects
// =============================================================================

/// Everything that can drive the machine: user actions and timer expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddToCart(ProductId),
    UpdateQuantity { id: ProductId, delta: i64 },
    RemoveFromCart(ProductId),
    /// Header cart button, available from every view.
    ViewCart,
    /// "Continue shopping" back to the product grid.
    ContinueShopping,
    /// "Proceed to checkout" from the cart.
    Checkout,
    /// "Back to cart" from the checkout form.
    BackToCart,
    SelectPaymentMethod(PaymentMethod),
    SubmitPayment(CheckoutDetails),
    TimerElapsed(TimerToken),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::AddToCart(_) => "add to cart",
            Command::UpdateQuantity { .. } => "update quantity",
            Command::RemoveFromCart(_) => "remove from cart",
            Command::ViewCart => "view cart",
            Command::ContinueShopping => "continue shopping",
            Command::Checkout => "checkout",
            Command::BackToCart => "back to cart",
            Command::SelectPaymentMethod(_) => "select payment method",
            Command::SubmitPayment(_) => "submit payment",
            Command::TimerElapsed(_) => "timer elapsed",
        }
    }
}

/// Work the driver performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write this cart snapshot to storage.
    PersistCart(Cart),
    /// Schedule `Command::TimerElapsed(token)` after `after`.
    StartTimer {
        token: TimerToken,
        kind: TimerKind,
        after: Duration,
    },
    /// Drop a scheduled timer.
    CancelTimer(TimerToken),
    /// The simulated payment went through.
    OrderPlaced(Order),
}

// =============================================================================
// Checkout Phase
// =============================================================================

/// Sub-state of the checkout view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    /// Form is shown and editable.
    #[default]
    Editing,
    /// Payment submitted, waiting for the processing timer.
    Processing {
        token: TimerToken,
        method: PaymentMethod,
        details: CheckoutDetails,
    },
    /// Order placed, confirmation on screen until its timer fires.
    Confirmed { token: TimerToken, order: Order },
}

impl CheckoutPhase {
    fn armed_timer(&self) -> Option<TimerToken> {
        match self {
            CheckoutPhase::Editing => None,
            CheckoutPhase::Processing { token, .. } | CheckoutPhase::Confirmed { token, .. } => {
                Some(*token)
            }
        }
    }
}

// =============================================================================
// Machine
// =============================================================================

/// The storefront session: view, cart and checkout state.
#[derive(Debug, Clone)]
pub struct StorefrontMachine {
    catalog: Catalog,
    cart: Cart,
    view: ViewState,
    payment_method: Option<PaymentMethod>,
    phase: CheckoutPhase,
    timings: CheckoutTimings,
    next_token: u64,
}

impl StorefrontMachine {
    /// Starts a session on the product grid with a (restored) cart.
    pub fn new(catalog: Catalog, cart: Cart, timings: CheckoutTimings) -> Self {
        StorefrontMachine {
            catalog,
            cart,
            view: ViewState::Products,
            payment_method: None,
            phase: CheckoutPhase::Editing,
            timings,
            next_token: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// True while the confirmation screen is up.
    pub fn order_complete(&self) -> bool {
        matches!(self.phase, CheckoutPhase::Confirmed { .. })
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, CheckoutPhase::Processing { .. })
    }

    /// Cart total, recomputed on demand.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Serializable snapshot for screens.
    pub fn snapshot(&self) -> StorefrontView {
        let order = match &self.phase {
            CheckoutPhase::Confirmed { order, .. } => Some(order.clone()),
            _ => None,
        };

        StorefrontView {
            view: self.view,
            lines: self.cart.lines().to_vec(),
            total: self.cart.total(),
            item_count: self.cart.item_count(),
            payment_method: self.payment_method,
            processing: self.is_processing(),
            order_complete: self.order_complete(),
            order,
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Applies one command.
    ///
    /// On `Err` nothing changed. `Ok(vec![])` means the command was accepted
    /// but had nothing to do (checkout with an empty cart, a stale timer).
    pub fn handle(&mut self, command: Command) -> CoreResult<Vec<Effect>> {
        let action = command.name();

        match command {
            Command::AddToCart(id) => {
                self.ensure_cart_editable()?;
                let product = self.catalog.require(id)?.clone();
                let changed = self.cart.add(&product);
                Ok(self.persist_if(changed))
            }

            Command::UpdateQuantity { id, delta } => {
                self.ensure_cart_editable()?;
                let changed = self.cart.update_quantity(id, delta);
                Ok(self.persist_if(changed))
            }

            Command::RemoveFromCart(id) => {
                self.ensure_cart_editable()?;
                let changed = self.cart.remove(id);
                Ok(self.persist_if(changed))
            }

            Command::ViewCart => {
                let effects = self.leave_checkout();
                self.view = ViewState::Cart;
                Ok(effects)
            }

            Command::ContinueShopping => {
                let effects = self.leave_checkout();
                self.view = ViewState::Products;
                Ok(effects)
            }

            Command::Checkout => {
                if self.view == ViewState::Checkout || self.cart.is_empty() {
                    return Ok(Vec::new());
                }
                self.phase = CheckoutPhase::Editing;
                self.view = ViewState::Checkout;
                Ok(Vec::new())
            }

            Command::BackToCart => {
                if self.view != ViewState::Checkout {
                    return Ok(Vec::new());
                }
                let effects = self.leave_checkout();
                self.view = ViewState::Cart;
                Ok(effects)
            }

            Command::SelectPaymentMethod(method) => {
                match self.phase {
                    CheckoutPhase::Editing => {}
                    CheckoutPhase::Processing { .. } => return Err(CoreError::PaymentInProgress),
                    CheckoutPhase::Confirmed { .. } => return Err(self.invalid(action)),
                }
                self.payment_method = Some(method);
                Ok(Vec::new())
            }

            Command::SubmitPayment(details) => self.submit_payment(details, action),

            Command::TimerElapsed(token) => Ok(self.timer_elapsed(token)),
        }
    }

    /// Cancels whatever timer is armed. Called when the session shuts down.
    pub fn teardown(&mut self) -> Vec<Effect> {
        self.phase
            .armed_timer()
            .map(Effect::CancelTimer)
            .into_iter()
            .collect()
    }

    fn submit_payment(
        &mut self,
        details: CheckoutDetails,
        action: &'static str,
    ) -> CoreResult<Vec<Effect>> {
        if self.view != ViewState::Checkout {
            return Err(self.invalid(action));
        }

        match self.phase {
            CheckoutPhase::Editing => {}
            CheckoutPhase::Processing { .. } => return Err(CoreError::PaymentInProgress),
            CheckoutPhase::Confirmed { .. } => return Err(self.invalid(action)),
        }

        validate_checkout_details(&details)?;
        let method = validate_payment_selection(self.payment_method)?;

        let token = self.issue_token();
        self.phase = CheckoutPhase::Processing {
            token,
            method,
            details,
        };

        Ok(vec![Effect::StartTimer {
            token,
            kind: TimerKind::PaymentProcessing,
            after: self.timings.processing_delay,
        }])
    }

    fn timer_elapsed(&mut self, token: TimerToken) -> Vec<Effect> {
        if self.phase.armed_timer() != Some(token) {
            return Vec::new();
        }

        match std::mem::take(&mut self.phase) {
            CheckoutPhase::Processing {
                method, details, ..
            } => {
                let order = Order::place(self.cart.lines().to_vec(), method, details);
                self.cart.clear();

                let next = self.issue_token();
                self.phase = CheckoutPhase::Confirmed {
                    token: next,
                    order: order.clone(),
                };

                vec![
                    self.persist(),
                    Effect::OrderPlaced(order),
                    Effect::StartTimer {
                        token: next,
                        kind: TimerKind::ConfirmationDisplay,
                        after: self.timings.confirmation_delay,
                    },
                ]
            }
            CheckoutPhase::Confirmed { .. } => {
                self.payment_method = None;
                self.view = ViewState::Products;
                Vec::new()
            }
            CheckoutPhase::Editing => Vec::new(),
        }
    }

    /// Leaves the checkout view's sub-state behind.
    ///
    /// - processing: the pending payment is cancelled, the cart is kept
    /// - confirmed: the pending reset is applied now
    fn leave_checkout(&mut self) -> Vec<Effect> {
        match std::mem::take(&mut self.phase) {
            CheckoutPhase::Editing => Vec::new(),
            CheckoutPhase::Processing { token, .. } => vec![Effect::CancelTimer(token)],
            CheckoutPhase::Confirmed { token, .. } => {
                self.payment_method = None;
                vec![Effect::CancelTimer(token)]
            }
        }
    }

    fn ensure_cart_editable(&self) -> CoreResult<()> {
        if self.view == ViewState::Checkout {
            return Err(CoreError::CartLocked { view: self.view });
        }
        Ok(())
    }

    fn persist(&self) -> Effect {
        Effect::PersistCart(self.cart.clone())
    }

    fn persist_if(&self, changed: bool) -> Vec<Effect> {
        if changed {
            vec![self.persist()]
        } else {
            Vec::new()
        }
    }

    fn issue_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken(self.next_token)
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            action,
            view: self.view,
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// What a screen needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StorefrontView {
    pub view: ViewState,
    pub lines: Vec<CartLine>,
    pub total: Money,
    /// Header badge: total quantity.
    pub item_count: u32,
    pub payment_method: Option<PaymentMethod>,
    pub processing: bool,
    pub order_complete: bool,
    /// The placed order while the confirmation is on screen.
    pub order: Option<Order>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MAX_LINE_QUANTITY;
    use crate::error::ValidationError;
    use crate::types::Product;

    fn machine() -> StorefrontMachine {
        StorefrontMachine::new(Catalog::default(), Cart::new(), CheckoutTimings::default())
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails::new("Ada Lovelace", "ada@example.com", "12 Analytical St")
    }

    fn started_timer(effects: &[Effect]) -> (TimerToken, TimerKind, Duration) {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::StartTimer { token, kind, after } => Some((*token, *kind, *after)),
                _ => None,
            })
            .expect("expected a StartTimer effect")
    }

    /// Puts the machine on the checkout form with one laptop in the cart.
    fn at_checkout() -> StorefrontMachine {
        let mut m = machine();
        m.handle(Command::AddToCart(1)).unwrap();
        m.handle(Command::ViewCart).unwrap();
        m.handle(Command::Checkout).unwrap();
        assert_eq!(m.view(), ViewState::Checkout);
        m
    }

    #[test]
    fn test_add_persists_cart() {
        let mut m = machine();
        let effects = m.handle(Command::AddToCart(1)).unwrap();

        assert_eq!(effects.len(), 1);
        assert!(matches!(&effects[0], Effect::PersistCart(cart) if cart.item_count() == 1));
    }

    #[test]
    fn test_add_unknown_product() {
        let mut m = machine();
        assert!(matches!(
            m.handle(Command::AddToCart(404)),
            Err(CoreError::ProductNotFound(404))
        ));
        assert!(m.cart().is_empty());
    }

    #[test]
    fn test_noop_updates_do_not_persist() {
        let mut m = machine();
        assert!(m
            .handle(Command::UpdateQuantity { id: 1, delta: 1 })
            .unwrap()
            .is_empty());
        assert!(m.handle(Command::RemoveFromCart(1)).unwrap().is_empty());
    }

    #[test]
    fn test_checkout_with_empty_cart_is_ignored() {
        let mut m = machine();
        m.handle(Command::ViewCart).unwrap();

        assert!(m.handle(Command::Checkout).unwrap().is_empty());
        assert_eq!(m.view(), ViewState::Cart);

        m.handle(Command::ContinueShopping).unwrap();
        m.handle(Command::Checkout).unwrap();
        assert_eq!(m.view(), ViewState::Products);
    }

    #[test]
    fn test_cart_locked_on_checkout() {
        let mut m = at_checkout();
        assert!(matches!(
            m.handle(Command::AddToCart(2)),
            Err(CoreError::CartLocked { .. })
        ));
        assert!(matches!(
            m.handle(Command::RemoveFromCart(1)),
            Err(CoreError::CartLocked { .. })
        ));
    }

    #[test]
    fn test_payment_requires_method() {
        let mut m = at_checkout();
        let result = m.handle(Command::SubmitPayment(details()));

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::PaymentMethodRequired))
        ));
        assert!(!m.order_complete());
        assert!(!m.is_processing());
        assert_eq!(m.view(), ViewState::Checkout);
    }

    #[test]
    fn test_payment_requires_delivery_details() {
        let mut m = at_checkout();
        m.handle(Command::SelectPaymentMethod(PaymentMethod::PayPal))
            .unwrap();

        let result = m.handle(Command::SubmitPayment(CheckoutDetails::new(
            "Ada", "not-an-email", "12 St",
        )));
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));
        assert!(!m.is_processing());
    }

    #[test]
    fn test_submit_outside_checkout_is_rejected() {
        let mut m = machine();
        m.handle(Command::AddToCart(1)).unwrap();
        assert!(matches!(
            m.handle(Command::SubmitPayment(details())),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_full_payment_sequence() {
        let mut m = at_checkout();
        m.handle(Command::SelectPaymentMethod(PaymentMethod::CreditCard))
            .unwrap();

        let effects = m.handle(Command::SubmitPayment(details())).unwrap();
        let (processing, kind, after) = started_timer(&effects);
        assert_eq!(kind, TimerKind::PaymentProcessing);
        assert_eq!(after, Duration::from_millis(1500));
        assert!(m.is_processing());

        // Double submit while processing
        assert!(matches!(
            m.handle(Command::SubmitPayment(details())),
            Err(CoreError::PaymentInProgress)
        ));

        let effects = m.handle(Command::TimerElapsed(processing)).unwrap();
        assert!(m.order_complete());
        assert!(m.cart().is_empty());
        assert!(matches!(&effects[0], Effect::PersistCart(cart) if cart.is_empty()));
        assert!(matches!(&effects[1], Effect::OrderPlaced(order) if order.total.units() == 1299));
        let (confirmation, kind, after) = started_timer(&effects);
        assert_eq!(kind, TimerKind::ConfirmationDisplay);
        assert_eq!(after, Duration::from_millis(3000));

        let snapshot = m.snapshot();
        assert!(snapshot.order_complete);
        assert_eq!(snapshot.order.map(|o| o.payment_method), Some(PaymentMethod::CreditCard));

        m.handle(Command::TimerElapsed(confirmation)).unwrap();
        assert_eq!(m.view(), ViewState::Products);
        assert!(!m.order_complete());
        assert_eq!(m.payment_method(), None);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut m = at_checkout();
        m.handle(Command::SelectPaymentMethod(PaymentMethod::PayPal))
            .unwrap();
        let effects = m.handle(Command::SubmitPayment(details())).unwrap();
        let (first, _, _) = started_timer(&effects);

        // Leave and come back: the first payment is cancelled
        let effects = m.handle(Command::BackToCart).unwrap();
        assert_eq!(effects, vec![Effect::CancelTimer(first)]);
        m.handle(Command::Checkout).unwrap();
        let effects = m.handle(Command::SubmitPayment(details())).unwrap();
        let (second, _, _) = started_timer(&effects);
        assert_ne!(first, second);

        // The cancelled timer firing late changes nothing
        assert!(m.handle(Command::TimerElapsed(first)).unwrap().is_empty());
        assert!(m.is_processing());
        assert_eq!(m.cart().item_count(), 1);

        m.handle(Command::TimerElapsed(second)).unwrap();
        assert!(m.order_complete());
    }

    #[test]
    fn test_back_to_cart_during_processing_keeps_cart_and_method() {
        let mut m = at_checkout();
        m.handle(Command::SelectPaymentMethod(PaymentMethod::DebitCard))
            .unwrap();
        m.handle(Command::SubmitPayment(details())).unwrap();

        m.handle(Command::BackToCart).unwrap();
        assert_eq!(m.view(), ViewState::Cart);
        assert!(!m.is_processing());
        assert_eq!(m.cart().item_count(), 1);
        assert_eq!(m.payment_method(), Some(PaymentMethod::DebitCard));
    }

    #[test]
    fn test_leaving_confirmation_applies_reset() {
        let mut m = at_checkout();
        m.handle(Command::SelectPaymentMethod(PaymentMethod::BankTransfer))
            .unwrap();
        let effects = m.handle(Command::SubmitPayment(details())).unwrap();
        let (processing, _, _) = started_timer(&effects);
        let effects = m.handle(Command::TimerElapsed(processing)).unwrap();
        let (confirmation, _, _) = started_timer(&effects);

        let effects = m.handle(Command::ViewCart).unwrap();
        assert_eq!(effects, vec![Effect::CancelTimer(confirmation)]);
        assert_eq!(m.view(), ViewState::Cart);
        assert!(!m.order_complete());
        assert_eq!(m.payment_method(), None);

        // Late confirmation timer does not yank the user to products
        m.handle(Command::TimerElapsed(confirmation)).unwrap();
        assert_eq!(m.view(), ViewState::Cart);
    }

    #[test]
    fn test_teardown_cancels_armed_timer() {
        let mut m = at_checkout();
        assert!(m.teardown().is_empty());

        m.handle(Command::SelectPaymentMethod(PaymentMethod::MercadoPago))
            .unwrap();
        let effects = m.handle(Command::SubmitPayment(details())).unwrap();
        let (token, _, _) = started_timer(&effects);

        assert_eq!(m.teardown(), vec![Effect::CancelTimer(token)]);
    }

    #[test]
    fn test_end_to_end_paypal_checkout() {
        let catalog = Catalog::new(vec![
            Product::new(1, "Laptop Pro", 1299, "💻", "Electronics"),
            Product::new(2, "Wireless Headphones", 199, "🎧", "Audio"),
        ])
        .unwrap();
        let mut m = StorefrontMachine::new(catalog, Cart::new(), CheckoutTimings::default());

        m.handle(Command::AddToCart(1)).unwrap();
        m.handle(Command::AddToCart(2)).unwrap();
        assert_eq!(m.total().units(), 1498);

        m.handle(Command::ViewCart).unwrap();
        m.handle(Command::UpdateQuantity { id: 1, delta: 1 }).unwrap();
        assert_eq!(m.total().units(), 2797);

        m.handle(Command::RemoveFromCart(2)).unwrap();
        assert_eq!(m.cart().line_count(), 1);
        assert_eq!(m.cart().line(1).map(|l| l.quantity), Some(2));
        assert_eq!(m.total().units(), 2598);

        m.handle(Command::Checkout).unwrap();
        m.handle(Command::SelectPaymentMethod(PaymentMethod::PayPal))
            .unwrap();
        let effects = m.handle(Command::SubmitPayment(details())).unwrap();
        let (processing, _, _) = started_timer(&effects);

        let effects = m.handle(Command::TimerElapsed(processing)).unwrap();
        assert!(m.cart().is_empty());
        assert!(m.order_complete());
        assert!(matches!(
            &effects[1],
            Effect::OrderPlaced(order)
                if order.total.units() == 2598 && order.payment_method == PaymentMethod::PayPal
        ));

        let (confirmation, _, _) = started_timer(&effects);
        m.handle(Command::TimerElapsed(confirmation)).unwrap();
        assert_eq!(m.view(), ViewState::Products);
        assert_eq!(m.payment_method(), None);
        assert!(!m.order_complete());
        assert!(m.cart().is_empty());
    }

    #[test]
    fn test_huge_quantity_change_is_capped() {
        let mut m = machine();
        m.handle(Command::AddToCart(1)).unwrap();
        m.handle(Command::UpdateQuantity {
            id: 1,
            delta: i64::from(u32::MAX),
        })
        .unwrap();

        // At the cap another add has nothing to persist
        assert!(m.handle(Command::AddToCart(1)).unwrap().is_empty());
        m.handle(Command::AddToCart(2)).unwrap();

        let snapshot = m.snapshot();
        assert_eq!(snapshot.item_count, MAX_LINE_QUANTITY + 1);
        assert_eq!(snapshot.total.units(), 1299 * 999 + 899);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut m = machine();
        m.handle(Command::AddToCart(5)).unwrap();

        let value = serde_json::to_value(m.snapshot()).unwrap();
        assert_eq!(value["view"], "products");
        assert_eq!(value["itemCount"], 1);
        assert_eq!(value["total"], 299);
        assert_eq!(value["orderComplete"], false);
    }
}
