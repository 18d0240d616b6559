//! # apotek-pos: Sale Transaction Service for Apotek POS
//!
//! The orchestration layer between the presentation code (external) and the
//! pure core / persistence crates.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Presentation layer (external)                                         │
//! │        │ add_to_cart / checkout / cancel / record_restock               │
//! │        ▼                                                                │
//! │   apotek-pos (THIS CRATE): SaleService, PosConfig, PosError             │
//! │        │                                                                │
//! │        ├── apotek-core: cart math, payment settlement, validation       │
//! │        └── apotek-db:   atomic checkout / restock transactions          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apotek_pos::{PosConfig, SaleService};
//!
//! let mut service = SaleService::connect(&PosConfig::default()).await?;
//!
//! let total = service.add_to_cart(medicine_id, 1).await?;
//! let receipt = service.checkout("Rp 20.000").await?;
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::{ConfigError, PosConfig};
pub use error::{PosError, PosResult};
pub use service::{Receipt, SaleService};

// Re-export the types callers need to drive the service
pub use apotek_core::{Money, RestockItem, StockPolicy};
pub use apotek_db::{Database, DbConfig};
