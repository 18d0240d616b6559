//! # Service Error Type
//!
//! Unified error type for the Sale Transaction Service.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in Apotek POS                               │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │                    ├──► CoreError ──┐                                   │
//! │  business rules ───┘                ├──► PosError ──► caller            │
//! │                                     │                                   │
//! │  DbError (incl. InsufficientStock) ─┘                                   │
//! │                                                                         │
//! │  Recoverable errors (bad input, underpayment, oversell) leave the       │
//! │  cart untouched so the cashier can retry. Store failures do too, but    │
//! │  the caller should treat them as fatal for this checkout attempt.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use apotek_core::{CoreError, ValidationError};
use apotek_db::DbError;

/// Error returned by the Sale Transaction Service.
#[derive(Debug, Error)]
pub enum PosError {
    /// Business rule violation (validation, underpayment, cart limits).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failure, or a stock-policy rejection raised inside the
    /// checkout transaction.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for PosError {
    fn from(err: ValidationError) -> Self {
        PosError::Core(CoreError::Validation(err))
    }
}

impl PosError {
    /// Whether the caller can fix the input and retry with the same cart.
    ///
    /// Validation errors, underpayment and stock-policy rejections are
    /// recoverable: nothing was written and the cart is preserved. Every
    /// other store failure means the checkout attempt itself failed and the
    /// store should be checked before retrying.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PosError::Core(_) => true,
            PosError::Db(DbError::InsufficientStock { .. }) => true,
            PosError::Db(_) => false,
        }
    }
}

/// Result type for service operations.
pub type PosResult<T> = Result<T, PosError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use apotek_core::Money;

    #[test]
    fn test_payment_errors_are_recoverable() {
        let err: PosError = CoreError::InsufficientPayment {
            total: Money::from_rupiah(10_000),
            tendered: Money::from_rupiah(5_000),
        }
        .into();
        assert!(err.is_recoverable());

        let err: PosError = ValidationError::Required {
            field: "uang bayar".to_string(),
        }
        .into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_stock_rejection_is_recoverable() {
        let err: PosError = DbError::InsufficientStock {
            medicine: "Paracetamol 500mg".to_string(),
            available: 1,
            requested: 3,
        }
        .into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_store_failures_are_not_recoverable() {
        let err: PosError = DbError::ConnectionFailed("disk full".to_string()).into();
        assert!(!err.is_recoverable());

        let err: PosError = DbError::QueryFailed("malformed".to_string()).into();
        assert!(!err.is_recoverable());
    }
}
