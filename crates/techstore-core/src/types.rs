//! # Domain Types
//!
//! Core domain types used throughout TechStore.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │──►│  product fields │──►│  id (UUID)      │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  lines, total   │       │
//! │  │  price          │   └─────────────────┘   │  payment_method │       │
//! │  │  image          │                         └─────────────────┘       │
//! │  │  category       │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  └─────────────────┘   │   ViewState     │   │ PaymentMethod   │       │
//! │                        │  products       │   │  CreditCard     │       │
//! │                        │  cart           │   │  DebitCard      │       │
//! │                        │  checkout       │   │  PayPal  ...    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;

/// Catalog identifier of a product.
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Catalog-defined and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique catalog id.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Price in whole currency units.
    pub price: Money,

    /// Display token (an emoji in the default catalog).
    pub image: String,

    /// Category label shown above the name.
    pub category: String,
}

impl Product {
    /// Creates a product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: i64,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            price: Money::from_units(price),
            image: image.into(),
            category: category.into(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product's entry in the cart.
///
/// ## Snapshot Pattern
/// The line carries a copy of the product fields rather than a reference, so
/// the persisted JSON is self-contained:
/// ```json
/// {"id":1,"name":"Laptop Pro","price":1299,"image":"💻","category":"Electronics","quantity":2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub category: String,
    /// Always ≥ 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line for `product` with the given quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        CartLine {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// View State
// =============================================================================

/// Which screen is currently displayed. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    /// Product grid (initial screen).
    #[default]
    Products,
    /// Cart list with quantity controls and total.
    Cart,
    /// Checkout form, processing notice, or confirmation.
    Checkout,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewState::Products => "products",
            ViewState::Cart => "cart",
            ViewState::Checkout => "checkout",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// The fixed set of payment methods offered on the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    PayPal,
    BankTransfer,
    MercadoPago,
}

impl PaymentMethod {
    /// All methods in the order the form lists them.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::PayPal,
        PaymentMethod::BankTransfer,
        PaymentMethod::MercadoPago,
    ];

    /// Label shown on the form.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::MercadoPago => "Mercado Pago",
        }
    }

    /// snake_case name, as serialized.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::PayPal => "pay_pal",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::MercadoPago => "mercado_pago",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a label ("PayPal", "credit card") or serialized name
/// ("bank_transfer"), ignoring case, spaces, hyphens and underscores.
impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        PaymentMethod::ALL
            .into_iter()
            .find(|m| {
                let label: String = m
                    .label()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .collect();
                label == wanted
            })
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: PaymentMethod::ALL
                    .iter()
                    .map(|m| m.label().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Checkout Details
// =============================================================================

/// Delivery details entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutDetails {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl CheckoutDetails {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        CheckoutDetails {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed (simulated) order, shown on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Confirmation number.
    #[ts(as = "String")]
    pub id: Uuid,
    /// Cart snapshot at payment time.
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub details: CheckoutDetails,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order from a cart snapshot, stamping id and time.
    pub fn place(
        lines: Vec<CartLine>,
        payment_method: PaymentMethod,
        details: CheckoutDetails,
    ) -> Self {
        let total = lines.iter().map(CartLine::line_total).sum();
        Order {
            id: Uuid::new_v4(),
            lines,
            total,
            payment_method,
            details,
            placed_at: Utc::now(),
        }
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, l| count.saturating_add(l.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_line_json_shape() {
        let product = Product::new(1, "Laptop Pro", 1299, "💻", "Electronics");
        let line = CartLine::from_product(&product, 2);

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "name": "Laptop Pro",
                "price": 1299,
                "image": "💻",
                "category": "Electronics",
                "quantity": 2
            })
        );
        assert_eq!(line.line_total().units(), 2598);
    }

    #[test]
    fn test_view_state_serialization() {
        assert_eq!(
            serde_json::to_string(&ViewState::Products).unwrap(),
            "\"products\""
        );
        assert_eq!(ViewState::default(), ViewState::Products);
        assert_eq!(ViewState::Checkout.to_string(), "checkout");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("PayPal".parse::<PaymentMethod>(), Ok(PaymentMethod::PayPal));
        assert_eq!("paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::PayPal));
        assert_eq!(
            "Credit Card".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CreditCard)
        );
        assert_eq!(
            "bank_transfer".parse::<PaymentMethod>(),
            Ok(PaymentMethod::BankTransfer)
        );
        assert_eq!(
            "mercado-pago".parse::<PaymentMethod>(),
            Ok(PaymentMethod::MercadoPago)
        );
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_round_trips_as_str() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
            assert_eq!(method.as_str().parse::<PaymentMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_order_totals() {
        let laptop = Product::new(1, "Laptop Pro", 1299, "💻", "Electronics");
        let watch = Product::new(5, "Smartwatch", 299, "⌚", "Accessories");
        let order = Order::place(
            vec![
                CartLine::from_product(&laptop, 2),
                CartLine::from_product(&watch, 1),
            ],
            PaymentMethod::PayPal,
            CheckoutDetails::default(),
        );

        assert_eq!(order.total.units(), 2897);
        assert_eq!(order.item_count(), 3);
    }
}
