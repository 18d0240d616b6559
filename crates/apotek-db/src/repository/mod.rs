//! # Repository Module
//!
//! Database repository implementations for Apotek POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  SaleService                                                            │
//! │       │                                                                 │
//! │       │  db.medicines().list_in_stock()                                 │
//! │       │  db.sales().record_sale(&draft, policy)                         │
//! │       ▼                                                                 │
//! │  MedicineRepository / SaleRepository / ...                              │
//! │       │                                                                 │
//! │       │  SQL (column names are the store schema; row types carry        │
//! │       │  English field names via SELECT aliases)                        │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`medicine::MedicineRepository`] - Medicine CRUD and stock adjustment
//! - [`sale::SaleRepository`] - Atomic checkout persistence and sale history
//! - [`member::MemberRepository`] - Member registry
//! - [`supplier::SupplierRepository`] - Supplier registry
//! - [`purchase::PurchaseRepository`] - Restocking purchases
//! - [`report::ReportRepository`] - Dashboard aggregates

pub mod medicine;
pub mod member;
pub mod purchase;
pub mod report;
pub mod sale;
pub mod supplier;
