//! # Console Screens
//!
//! Draws a [`SessionView`] as plain text.
//!
//! ## Screen Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ══ TechStore ═════════════════════════════════════════ [cart: 3] ══   │
//! │                                                                         │
//! │  Products ──► product grid with ids and prices                         │
//! │  Cart     ──► lines, per-line totals, total                            │
//! │  Checkout ──► form + payment methods │ processing notice │ confirmation │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is a pure function of the view, the catalog and the display
//! config, so every screen is tested without a terminal.

use std::fmt::{self, Write as _};

use techstore_core::{Catalog, Money, PaymentMethod, ViewState};

use crate::config::StorefrontConfig;
use crate::state::SessionView;

const WIDTH: usize = 60;

/// One full console frame.
pub struct Screen<'a> {
    view: &'a SessionView,
    catalog: &'a Catalog,
    config: &'a StorefrontConfig,
}

impl<'a> Screen<'a> {
    pub fn new(view: &'a SessionView, catalog: &'a Catalog, config: &'a StorefrontConfig) -> Self {
        Screen {
            view,
            catalog,
            config,
        }
    }

    fn money(&self, amount: Money) -> String {
        self.config.format_currency(amount)
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let badge = format!("[cart: {}]", self.view.item_count);
        let title = format!("══ {} ", self.config.store_name);
        let fill = WIDTH.saturating_sub(title.chars().count() + badge.chars().count() + 4);
        writeln!(f, "{}{} {} ══", title, "═".repeat(fill), badge)?;
        writeln!(f)
    }

    fn products(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Featured Products")?;
        writeln!(f)?;

        for product in self.catalog.products() {
            writeln!(
                f,
                "  [{}] {} {:<22} {:<12} {:>8}",
                product.id,
                product.image,
                product.name,
                product.category,
                self.money(product.price)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "add <id> to add a product, cart to view your cart")
    }

    fn cart(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Cart")?;
        writeln!(f)?;

        if self.view.lines.is_empty() {
            writeln!(f, "  Your cart is empty")?;
            writeln!(f)?;
            return writeln!(f, "shop to keep browsing");
        }

        for line in &self.view.lines {
            writeln!(
                f,
                "  [{}] {} {:<22} {:>8} x {:<3} = {:>8}",
                line.id,
                line.image,
                line.name,
                self.money(line.price),
                line.quantity,
                self.money(line.line_total())
            )?;
        }

        writeln!(f, "  {}", "─".repeat(WIDTH - 4))?;
        writeln!(f, "  Total: {}", self.money(self.view.total))?;
        writeln!(f)?;
        writeln!(
            f,
            "inc/dec <id>, qty <id> <+n|-n>, rm <id>, checkout, shop"
        )
    }

    fn checkout(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Checkout")?;
        writeln!(f)?;

        if let Some(order) = self.view.order.as_ref().filter(|_| self.view.order_complete) {
            writeln!(f, "  ✓ Payment successful!")?;
            writeln!(f, "  Your order has been confirmed")?;
            writeln!(f)?;
            writeln!(f, "  Order:   {}", order.id)?;
            writeln!(f, "  Total:   {}", self.money(order.total))?;
            writeln!(f, "  Method:  {}", order.payment_method)?;
            writeln!(f, "  Ship to: {}", order.details.address)?;
            writeln!(f)?;
            return writeln!(f, "Returning to the store shortly...");
        }

        if self.view.processing {
            writeln!(f, "  Processing payment...")?;
            writeln!(f)?;
            return writeln!(f, "back cancels the payment");
        }

        writeln!(f, "  Delivery details")?;
        writeln!(f, "    submit <full name> | <email> | <address>")?;
        writeln!(f)?;
        writeln!(f, "  Payment method")?;
        for method in PaymentMethod::ALL {
            let mark = if self.view.payment_method == Some(method) {
                "(•)"
            } else {
                "( )"
            };
            writeln!(f, "    {} {}", mark, method)?;
        }
        writeln!(f)?;
        writeln!(f, "  Total to pay: {}", self.money(self.view.total))?;
        writeln!(f)?;
        writeln!(f, "method <name>, submit ..., back")
    }
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header(f)?;
        match self.view.view {
            ViewState::Products => self.products(f),
            ViewState::Cart => self.cart(f),
            ViewState::Checkout => self.checkout(f),
        }
    }
}

/// Command reference printed by `help`.
pub fn help() -> String {
    let mut out = String::new();
    let rows = [
        ("add <id>", "add a product to the cart"),
        ("inc <id> / dec <id>", "change a quantity by one"),
        ("qty <id> <delta>", "change a quantity by delta"),
        ("rm <id>", "remove a product from the cart"),
        ("cart / shop", "show the cart / the products"),
        ("checkout / back", "open checkout / return to the cart"),
        ("method <name>", "choose a payment method"),
        ("submit <name> | <email> | <address>", "pay"),
        ("quit", "leave the store"),
    ];
    for (usage, what) in rows {
        let _ = writeln!(out, "  {:<38} {}", usage, what);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use techstore_core::{Cart, CheckoutTimings, Command, StorefrontMachine};

    fn machine() -> StorefrontMachine {
        StorefrontMachine::new(Catalog::default(), Cart::new(), CheckoutTimings::default())
    }

    fn draw(machine: &StorefrontMachine) -> String {
        let config = StorefrontConfig::default();
        Screen::new(&machine.snapshot(), machine.catalog(), &config).to_string()
    }

    #[test]
    fn test_products_screen_lists_catalog() {
        let screen = draw(&machine());
        assert!(screen.contains("TechStore"));
        assert!(screen.contains("[cart: 0]"));
        assert!(screen.contains("Laptop Pro"));
        assert!(screen.contains("$1299"));
        assert!(screen.contains("4K Camera"));
    }

    #[test]
    fn test_cart_screen_totals() {
        let mut m = machine();
        m.handle(Command::AddToCart(3)).unwrap();
        m.handle(Command::AddToCart(3)).unwrap();
        m.handle(Command::ViewCart).unwrap();

        let screen = draw(&m);
        assert!(screen.contains("[cart: 2]"));
        assert!(screen.contains("Wireless Headphones"));
        assert!(screen.contains("$398"));
        assert!(screen.contains("Total: $398"));
    }

    #[test]
    fn test_empty_cart_message() {
        let mut m = machine();
        m.handle(Command::ViewCart).unwrap();
        assert!(draw(&m).contains("Your cart is empty"));
    }

    #[test]
    fn test_checkout_marks_selected_method() {
        let mut m = machine();
        m.handle(Command::AddToCart(1)).unwrap();
        m.handle(Command::Checkout).unwrap();
        m.handle(Command::SelectPaymentMethod(PaymentMethod::BankTransfer))
            .unwrap();

        let screen = draw(&m);
        assert!(screen.contains("(•) Bank Transfer"));
        assert!(screen.contains("( ) PayPal"));
        assert!(screen.contains("Total to pay: $1299"));
    }

    #[test]
    fn test_uses_configured_currency() {
        let m = machine();
        let config = StorefrontConfig {
            store_name: "Gadget Hut".to_string(),
            currency_symbol: "€".to_string(),
            ..StorefrontConfig::default()
        };
        let screen = Screen::new(&m.snapshot(), m.catalog(), &config).to_string();
        assert!(screen.contains("Gadget Hut"));
        assert!(screen.contains("€1299"));
    }

    #[test]
    fn test_help_lists_commands() {
        let text = help();
        assert!(text.contains("submit <name> | <email> | <address>"));
        assert!(text.contains("quit"));
    }
}
