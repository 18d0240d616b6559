//! # Cart Module
//!
//! The transient cart assembled on the sale screen, and the pure settlement
//! step that turns it into a persistable [`SaleDraft`].
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐  add_line   ┌──────────┐  settle(tendered)  ┌──────────┐ │
//! │  │  Empty   │────────────►│  Lines   │───────────────────►│ SaleDraft│ │
//! │  │  Cart    │             │  + total │                    │ (to db)  │ │
//! │  └──────────┘             └────┬─────┘                    └──────────┘ │
//! │       ▲                        │                                        │
//! │       │                        │ clear() after a successful checkout,   │
//! │       └────────────────────────┘ or cancel()                            │
//! │                                                                         │
//! │  The cart exists only in memory. Nothing here touches the store;        │
//! │  persistence of the SaleDraft is the sale repository's job.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Medicine, SaleDraft, SaleLineDraft};

// =============================================================================
// Cart Line
// =============================================================================

/// A line of the transient cart.
///
/// ## Price Freezing
/// The unit price is copied out of the medicine at add time. If the medicine
/// is repriced while the cart is open, the line keeps the price the customer
/// was quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Medicine this line references.
    pub medicine_id: i64,

    /// Name at time of adding (frozen, for display).
    pub name: String,

    /// Price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity of units.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a medicine, freezing name and price.
    pub fn from_medicine(medicine: &Medicine, quantity: i64) -> Self {
        CartLine {
            medicine_id: medicine.id,
            name: medicine.name.clone(),
            unit_price: medicine.price,
            quantity,
        }
    }

    /// Line subtotal: unit price × quantity.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The transient list of lines being assembled before payment.
///
/// ## Invariants
/// - `total()` always equals the sum of line subtotals
/// - Adding the same medicine twice appends a second line (the sale record
///   keeps one row per add, matching the cashier's keystrokes)
/// - At most [`crate::MAX_CART_LINES`] lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Appends a line and returns the updated running total.
    ///
    /// ## Errors
    /// [`CoreError::CartTooLarge`] when the cart already holds the maximum
    /// number of lines.
    pub fn add_line(&mut self, line: CartLine) -> CoreResult<Money> {
        if self.lines.len() >= crate::MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: crate::MAX_CART_LINES,
            });
        }
        self.lines.push(line);
        Ok(self.total())
    }

    /// Running total: the sum of every line's subtotal.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Number of lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Read access to the lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Discards all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Validates the tendered amount against the running total and produces
    /// the draft to persist.
    ///
    /// This is the pure half of checkout. It does not mutate the cart; the
    /// caller clears the cart only after the draft has been committed.
    ///
    /// ## Errors
    /// [`CoreError::InsufficientPayment`] when `tendered < total`.
    ///
    /// ## Example
    /// ```rust
    /// use apotek_core::cart::{Cart, CartLine};
    /// use apotek_core::Money;
    ///
    /// let mut cart = Cart::new();
    /// cart.add_line(CartLine {
    ///     medicine_id: 1,
    ///     name: "Paracetamol 500mg".into(),
    ///     unit_price: Money::from_rupiah(10_000),
    ///     quantity: 1,
    /// })
    /// .unwrap();
    ///
    /// let draft = cart.settle(Money::from_rupiah(15_000)).unwrap();
    /// assert_eq!(draft.total, Money::from_rupiah(10_000));
    /// assert_eq!(draft.change, Money::from_rupiah(5_000));
    /// ```
    pub fn settle(&self, tendered: Money) -> CoreResult<SaleDraft> {
        let total = self.total();

        if tendered < total {
            return Err(CoreError::InsufficientPayment { total, tendered });
        }

        Ok(SaleDraft {
            total,
            tendered,
            change: tendered - total,
            lines: self
                .lines
                .iter()
                .map(|l| SaleLineDraft {
                    medicine_id: l.medicine_id,
                    quantity: l.quantity,
                    subtotal: l.subtotal(),
                })
                .collect(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_medicine(id: i64, price: i64, stock: i64) -> Medicine {
        Medicine {
            id,
            name: format!("Medicine {}", id),
            category: "Analgesic".to_string(),
            unit: "Strip".to_string(),
            stock,
            price: Money::from_rupiah(price),
            status: None,
        }
    }

    #[test]
    fn test_running_total_accumulates() {
        let mut cart = Cart::new();

        let t1 = cart
            .add_line(CartLine::from_medicine(&test_medicine(1, 10_000, 5), 1))
            .unwrap();
        assert_eq!(t1, Money::from_rupiah(10_000));

        let t2 = cart
            .add_line(CartLine::from_medicine(&test_medicine(2, 2_500, 9), 3))
            .unwrap();
        assert_eq!(t2, Money::from_rupiah(17_500));

        assert_eq!(cart.total(), Money::from_rupiah(17_500));
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_same_medicine_appends_a_second_line() {
        let mut cart = Cart::new();
        let med = test_medicine(1, 10_000, 5);

        cart.add_line(CartLine::from_medicine(&med, 1)).unwrap();
        cart.add_line(CartLine::from_medicine(&med, 1)).unwrap();

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total(), Money::from_rupiah(20_000));
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut med = test_medicine(1, 10_000, 5);

        cart.add_line(CartLine::from_medicine(&med, 1)).unwrap();

        // Repricing after the add must not move the cart total
        med.price = Money::from_rupiah(99_000);
        assert_eq!(cart.total(), Money::from_rupiah(10_000));
    }

    #[test]
    fn test_cart_line_cap() {
        let mut cart = Cart::new();
        let med = test_medicine(1, 100, 1);

        for _ in 0..crate::MAX_CART_LINES {
            cart.add_line(CartLine::from_medicine(&med, 1)).unwrap();
        }

        let err = cart
            .add_line(CartLine::from_medicine(&med, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_settle_exact_payment() {
        let mut cart = Cart::new();
        cart.add_line(CartLine::from_medicine(&test_medicine(1, 10_000, 5), 1))
            .unwrap();

        let draft = cart.settle(Money::from_rupiah(10_000)).unwrap();

        assert_eq!(draft.total, Money::from_rupiah(10_000));
        assert_eq!(draft.tendered, Money::from_rupiah(10_000));
        assert!(draft.change.is_zero());
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].medicine_id, 1);
        assert_eq!(draft.lines[0].quantity, 1);
        assert_eq!(draft.lines[0].subtotal, Money::from_rupiah(10_000));
    }

    #[test]
    fn test_settle_underpayment_rejected() {
        let mut cart = Cart::new();
        cart.add_line(CartLine::from_medicine(&test_medicine(1, 10_000, 5), 1))
            .unwrap();

        let err = cart.settle(Money::from_rupiah(5_000)).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientPayment { total, tendered }
                if total == Money::from_rupiah(10_000) && tendered == Money::from_rupiah(5_000)
        ));
        // The cart is untouched and can be retried
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_settle_change_never_negative() {
        let mut cart = Cart::new();
        cart.add_line(CartLine::from_medicine(&test_medicine(1, 7_500, 5), 2))
            .unwrap();

        let draft = cart.settle(Money::from_rupiah(20_000)).unwrap();
        assert_eq!(draft.change, Money::from_rupiah(5_000));
        assert!(!draft.change.is_negative());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_line(CartLine::from_medicine(&test_medicine(1, 10_000, 5), 1))
            .unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }
}
