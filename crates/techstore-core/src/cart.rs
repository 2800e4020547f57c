//! # Cart
//!
//! The shopping cart: an ordered list of [`CartLine`]s.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action            Cart Method              Change               │
//! │  ─────────────            ───────────              ──────               │
//! │                                                                         │
//! │  "Add" on product ───────► add()      ────────────► qty += 1 or push   │
//! │                                                                         │
//! │  + / − on line ──────────► update_quantity() ─────► qty += delta,      │
//! │                                                     drop line at 0     │
//! │                                                                         │
//! │  Trash on line ──────────► remove()   ────────────► retain(id != x)    │
//! │                                                                         │
//! │  Payment completes ──────► clear()    ────────────► lines.clear()      │
//! │                                                                         │
//! │  Total row ──────────────► total()    ────────────► (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id (adding the same product bumps quantity)
//! - Quantity is ≥ 1 for every line; a line that would reach 0 is removed
//! - Quantity is at most [`MAX_LINE_QUANTITY`]; changes past it are capped
//! - Line order is the order products were first added

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{CartLine, Product, ProductId};

/// Largest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// The shopping cart.
///
/// Serializes as a bare JSON array of lines, the persisted snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart verbatim from a persisted snapshot.
    ///
    /// No checks against the catalog; see [`Cart::reconcile`].
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1
    /// - Product not in cart: new line with quantity 1 at the end
    /// - Line already at [`MAX_LINE_QUANTITY`]: unchanged
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn add(&mut self, product: &Product) -> bool {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            let updated = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
            let changed = updated != line.quantity;
            line.quantity = updated;
            return changed;
        }

        self.lines.push(CartLine::from_product(product, 1));
        true
    }

    /// Adds `delta` to a line's quantity, floored at zero and capped at
    /// [`MAX_LINE_QUANTITY`].
    ///
    /// A line left at zero is removed. Unknown ids are a no-op.
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> bool {
        let Some(index) = self.lines.iter().position(|l| l.id == id) else {
            return false;
        };

        let current = i64::from(self.lines[index].quantity);
        let updated = current
            .saturating_add(delta)
            .clamp(0, i64::from(MAX_LINE_QUANTITY));

        if updated == current {
            return false;
        }

        if updated == 0 {
            self.lines.remove(index);
        } else {
            // clamp above keeps this in u32 range
            self.lines[index].quantity = updated as u32;
        }

        true
    }

    /// Removes the line for `id`. Absent ids are not an error.
    ///
    /// ## Returns
    /// `true` if a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() != initial_len
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price × quantity. Recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total quantity across lines (the header badge).
    ///
    /// Saturates: a restored snapshot may carry any quantity.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, l| count.saturating_add(l.quantity))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `id`, if present.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Brings a restored cart in line with the catalog.
    ///
    /// ## Rules
    /// - Lines whose id is not in the catalog are dropped
    /// - Lines with quantity 0 are dropped
    /// - Duplicate ids are merged into the first occurrence
    /// - Quantities are capped at [`MAX_LINE_QUANTITY`]
    /// - Product fields (name, price, image, category) are refreshed from the
    ///   catalog; quantities are kept
    pub fn reconcile(&mut self, catalog: &Catalog) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut merged: Vec<CartLine> = Vec::with_capacity(self.lines.len());

        for line in self.lines.drain(..) {
            let Some(product) = catalog.get(line.id) else {
                report.dropped_unknown.push(line.id);
                continue;
            };

            if line.quantity == 0 {
                report.dropped_empty += 1;
                continue;
            }

            if let Some(existing) = merged.iter_mut().find(|l| l.id == line.id) {
                existing.quantity = existing
                    .quantity
                    .saturating_add(line.quantity)
                    .min(MAX_LINE_QUANTITY);
                report.merged_duplicates += 1;
                continue;
            }

            let refreshed = CartLine::from_product(product, line.quantity.min(MAX_LINE_QUANTITY));
            if refreshed != line {
                report.refreshed += 1;
            }
            merged.push(refreshed);
        }

        self.lines = merged;
        report
    }
}

/// What [`Cart::reconcile`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Ids that are no longer in the catalog.
    pub dropped_unknown: Vec<ProductId>,
    /// Lines stored with quantity 0.
    pub dropped_empty: usize,
    /// Lines folded into an earlier line with the same id.
    pub merged_duplicates: usize,
    /// Lines whose product fields differed from the catalog.
    pub refreshed: usize,
}

impl ReconcileReport {
    /// True when reconciliation left the cart untouched.
    pub fn is_clean(&self) -> bool {
        self.dropped_unknown.is_empty()
            && self.dropped_empty == 0
            && self.merged_duplicates == 0
            && self.refreshed == 0
    }
}
