//! # Sale Transaction Service
//!
//! The workflow the sale screen drives: accumulate a cart, validate payment,
//! and commit the sale with its stock decrements as one atomic unit.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Flow                                      │
//! │                                                                         │
//! │  add_to_cart(medicine_id, qty)                                          │
//! │       │  look up price, freeze it on the line                           │
//! │       ▼                                                                 │
//! │  Cart ──────────► running total back to the caller                      │
//! │       │                                                                 │
//! │  checkout("Rp 20.000")                                                  │
//! │       │                                                                 │
//! │       ├── parse_rupiah ────────────► ValidationError (cart kept)        │
//! │       ├── empty cart ──────────────► Ok(None), nothing written          │
//! │       ├── cart.settle(tendered) ───► InsufficientPayment (cart kept)    │
//! │       ▼                                                                 │
//! │  SaleRepository::record_sale  ← ONE transaction:                        │
//! │       │                         sale row + line rows + stock decrements │
//! │       ├── failure ─────────────────► rollback, cart kept                │
//! │       ▼                                                                 │
//! │  cart.clear()  ← success only                                           │
//! │       ▼                                                                 │
//! │  Receipt { sale, lines }                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use apotek_core::{
    validation::{parse_rupiah, validate_quantity},
    Cart, CartLine, CoreError, Medicine, Money, Purchase, PurchaseDraft, RestockItem, Sale,
    SaleLine, StockPolicy,
};
use apotek_db::Database;

use crate::config::PosConfig;
use crate::error::PosResult;

// =============================================================================
// Receipt
// =============================================================================

/// What a successful checkout hands back for the receipt view.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    /// The persisted sale (total, tendered, change, timestamp).
    pub sale: Sale,
    /// One line per cart line, as persisted.
    pub lines: Vec<SaleLine>,
}

impl Receipt {
    /// Change to hand back to the customer.
    #[inline]
    pub fn change(&self) -> Money {
        self.sale.change
    }
}

// =============================================================================
// Sale Transaction Service
// =============================================================================

/// Accumulates a cart, validates payment, and commits sales and restocks
/// against the store.
///
/// One service instance serves one register. The cart is plain owned state:
/// the register is single-user and exactly one checkout is ever in flight.
#[derive(Debug)]
pub struct SaleService {
    db: Database,
    cart: Cart,
    policy: StockPolicy,
}

impl SaleService {
    /// Creates a service over an open database with the default stock policy.
    pub fn new(db: Database) -> Self {
        SaleService::with_policy(db, StockPolicy::default())
    }

    /// Creates a service with an explicit stock policy.
    pub fn with_policy(db: Database, policy: StockPolicy) -> Self {
        SaleService {
            db,
            cart: Cart::new(),
            policy,
        }
    }

    /// Opens the configured database and creates a service over it.
    pub async fn connect(config: &PosConfig) -> PosResult<Self> {
        let db = Database::new(config.db_config()).await?;
        Ok(SaleService::with_policy(db, config.stock_policy))
    }

    /// The stock policy this service checks out under.
    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Read access to the cart being assembled.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Running total of the cart.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// The database handle, for read paths the sale screen needs directly
    /// (medicine listing, sale history, dashboard numbers).
    pub fn db(&self) -> &Database {
        &self.db
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Adds a medicine to the cart and returns the updated running total.
    ///
    /// The medicine's current price is looked up and frozen on the line.
    /// No stock check happens here; under [`StockPolicy::Block`] the check
    /// runs inside the checkout transaction, where it is authoritative.
    ///
    /// ## Errors
    /// - [`CoreError::MedicineNotFound`] for an unknown id
    /// - `ValidationError` for a non-positive or oversized quantity
    pub async fn add_to_cart(&mut self, medicine_id: i64, quantity: i64) -> PosResult<Money> {
        validate_quantity(quantity).map_err(CoreError::from)?;

        let medicine: Medicine = self
            .db
            .medicines()
            .get_by_id(medicine_id)
            .await?
            .ok_or(CoreError::MedicineNotFound(medicine_id))?;

        let total = self
            .cart
            .add_line(CartLine::from_medicine(&medicine, quantity))?;

        debug!(
            medicine = %medicine.name,
            quantity,
            total = %total,
            "Added to cart"
        );

        Ok(total)
    }

    /// Discards the cart without writing anything.
    pub fn cancel(&mut self) {
        debug!(lines = self.cart.line_count(), "Cart cancelled");
        self.cart.clear();
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Checks out the cart against raw pay-field input.
    ///
    /// Parses the tendered amount (`ValidationError` on malformed input,
    /// cart preserved), then proceeds as [`checkout_amount`](Self::checkout_amount).
    pub async fn checkout(&mut self, tendered_input: &str) -> PosResult<Option<Receipt>> {
        let tendered = parse_rupiah(tendered_input).map_err(CoreError::from)?;
        self.checkout_amount(tendered).await
    }

    /// Checks out the cart against an already-parsed tendered amount.
    ///
    /// ## Behavior
    /// - Empty cart: a no-op; returns `Ok(None)` and writes nothing
    /// - `tendered < total`: [`CoreError::InsufficientPayment`]; no writes,
    ///   cart preserved
    /// - Otherwise: persists the sale, its lines and the stock decrements in
    ///   one transaction, clears the cart, and returns the receipt
    ///
    /// The cart is cleared on success ONLY. Every failure path leaves it
    /// intact for a retry.
    pub async fn checkout_amount(&mut self, tendered: Money) -> PosResult<Option<Receipt>> {
        if self.cart.is_empty() {
            debug!("Checkout on empty cart ignored");
            return Ok(None);
        }

        let draft = self.cart.settle(tendered)?;
        let sale = self.db.sales().record_sale(&draft, self.policy).await?;

        let lines = draft
            .lines
            .iter()
            .map(|l| SaleLine {
                sale_id: sale.id,
                medicine_id: l.medicine_id,
                quantity: l.quantity,
                subtotal: l.subtotal,
            })
            .collect();

        self.cart.clear();

        info!(
            sale_id = %sale.id,
            total = %sale.total,
            change = %sale.change,
            "Checkout complete"
        );

        Ok(Some(Receipt { sale, lines }))
    }

    // -------------------------------------------------------------------------
    // Restocking
    // -------------------------------------------------------------------------

    /// Records a restocking purchase: one purchase row plus a stock increment
    /// per item, committed atomically.
    ///
    /// The purchase total is the sum of the items' costs.
    pub async fn record_restock(
        &self,
        supplier_id: Option<i64>,
        items: Vec<RestockItem>,
    ) -> PosResult<Purchase> {
        for item in &items {
            validate_quantity(item.quantity).map_err(CoreError::from)?;
        }

        let draft = PurchaseDraft::from_items(supplier_id, items);
        let purchase = self.db.purchases().record_purchase(&draft).await?;

        info!(
            purchase_id = %purchase.id,
            total = %purchase.total,
            "Restock recorded"
        );

        Ok(purchase)
    }
}
