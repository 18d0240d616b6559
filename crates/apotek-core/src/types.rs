//! # Domain Types
//!
//! Core domain types used throughout Apotek POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │      Sale       │   │    SaleLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  sale_id (FK)   │       │
//! │  │  name           │   │  recorded_at    │   │  medicine_id    │       │
//! │  │  stock          │   │  total/tendered │   │  quantity       │       │
//! │  │  price          │   │  change         │   │  subtotal       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Member, Supplier, Purchase mirror the remaining store tables.          │
//! │  SaleDraft / PurchaseDraft are the write-side inputs handed to the      │
//! │  repositories; the transient Cart lives in [`crate::cart`].             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every persisted entity uses the store's INTEGER autoincrement key. Row ids
//! are assigned by the store at insert time, which is why the write-side types
//! (`NewMedicine`, `SaleDraft`, ...) carry no id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Stock Policy
// =============================================================================

/// What checkout does when a cart line asks for more units than are in stock.
///
/// The legacy flow performed no check at all, which made overselling an
/// accident rather than a decision. Here it is an explicit, configurable
/// choice on the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Reject the whole checkout; no sale row, no stock movement.
    Block,
    /// Commit anyway; stock may go negative (manual staff override mode).
    Allow,
}

impl Default for StockPolicy {
    fn default() -> Self {
        StockPolicy::Block
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A medicine available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Medicine {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name shown to the cashier and on the sale screen.
    pub name: String,

    /// Category label (analgesic, antibiotic, ...).
    pub category: String,

    /// Sales unit (strip, bottle, box, ...).
    pub unit: String,

    /// Current stock level. Non-negative whenever checkout runs under
    /// [`StockPolicy::Block`].
    pub stock: i64,

    /// Sale price per unit.
    pub price: Money,

    /// Free-form availability label carried by the store schema.
    pub status: Option<String>,
}

/// Write-side input for inserting a medicine (id assigned by the store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub stock: i64,
    pub price: Money,
    pub status: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted, immutable record of a completed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    /// Sum of the sale's line subtotals.
    pub total: Money,
    /// Cash amount the customer handed over.
    pub tendered: Money,
    /// `tendered - total`; never negative.
    pub change: Money,
}

/// A line item of a persisted sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub sale_id: i64,
    pub medicine_id: i64,
    pub quantity: i64,
    /// Unit price at sale time × quantity.
    pub subtotal: Money,
}

// =============================================================================
// Write-Side Drafts
// =============================================================================

/// The validated outcome of settling a cart against a tendered amount.
///
/// Produced by [`crate::cart::Cart::settle`]; consumed whole by the sale
/// repository, which persists it as one atomic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
    pub lines: Vec<SaleLineDraft>,
}

/// One cart line ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLineDraft {
    pub medicine_id: i64,
    pub quantity: i64,
    pub subtotal: Money,
}

// =============================================================================
// Member & Supplier
// =============================================================================

/// A registered pharmacy member (loyalty customer).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Write-side input for registering a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// A medicine supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Write-side input for registering a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

// =============================================================================
// Purchase (Restocking)
// =============================================================================

/// A persisted restocking purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Purchase {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub supplier_id: Option<i64>,
    pub total: Money,
}

/// Purchase row joined with its supplier's name for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PurchaseListing {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub supplier_name: Option<String>,
    pub total: Money,
}

/// One medicine being restocked as part of a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockItem {
    pub medicine_id: i64,
    pub quantity: i64,
    /// What the pharmacy paid per unit (feeds the purchase total, not the
    /// sale price).
    pub unit_cost: Money,
}

impl RestockItem {
    /// Cost of this restock line.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_cost.multiply_quantity(self.quantity)
    }
}

/// A restocking purchase ready for persistence: one purchase row plus the
/// stock increments it implies, committed as one atomic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseDraft {
    pub supplier_id: Option<i64>,
    pub total: Money,
    pub items: Vec<RestockItem>,
}

impl PurchaseDraft {
    /// Builds a draft from restock items, totalling their costs.
    pub fn from_items(supplier_id: Option<i64>, items: Vec<RestockItem>) -> Self {
        let total = items.iter().map(RestockItem::subtotal).sum();
        PurchaseDraft {
            supplier_id,
            total,
            items,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
