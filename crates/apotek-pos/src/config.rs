//! # Service Configuration
//!
//! Configuration for the Sale Transaction Service.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. JSON Config File (when the host app passes one)                     │
//! │     { "database_path": "./db_apotek.db", "stock_policy": "block" }      │
//! │                                                                         │
//! │  2. Default Values                                                      │
//! │     ./db_apotek.db, StockPolicy::Block                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use apotek_core::StockPolicy;
use apotek_db::DbConfig;

// =============================================================================
// Config Type
// =============================================================================

/// Configuration for the Sale Transaction Service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PosConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// What checkout does when a cart line exceeds available stock.
    ///
    /// `block` rejects the checkout; `allow` is the manual-override mode
    /// where overselling is permitted and stock may go negative.
    pub stock_policy: StockPolicy,
}

impl Default for PosConfig {
    fn default() -> Self {
        PosConfig {
            database_path: PathBuf::from("./db_apotek.db"),
            stock_policy: StockPolicy::default(),
        }
    }
}

impl PosConfig {
    /// Loads configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: PosConfig = serde_json::from_str(&raw)?;

        info!(
            path = %path.display(),
            database = %config.database_path.display(),
            policy = ?config.stock_policy,
            "Loaded service configuration"
        );

        Ok(config)
    }

    /// Derives the database configuration for this service config.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`PosConfig`].
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================
