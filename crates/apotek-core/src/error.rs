//! # Error Types
//!
//! Domain-specific error types for apotek-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  apotek-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  apotek-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  apotek-pos errors (service crate)                                      │
//! │  └── PosError         - What the presentation layer sees                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PosError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, ids)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are recoverable:
/// the cart that triggered them is left untouched so the cashier can retry.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Medicine cannot be found.
    #[error("Medicine not found: {0}")]
    MedicineNotFound(i64),

    /// Tendered cash does not cover the cart total.
    ///
    /// ## When This Occurs
    /// ```text
    /// Cart total: Rp 10.000
    ///      │
    ///      ▼
    /// checkout(tendered = Rp 5.000)
    ///      │
    ///      ▼
    /// InsufficientPayment { total: 10000, tendered: 5000 }
    ///      │
    ///      ▼
    /// UI shows "Uang kurang", cart stays as-is
    /// ```
    #[error("Insufficient payment: tendered {tendered} is below total {total}")]
    InsufficientPayment { total: Money, tendered: Money },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric payment input).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            total: Money::from_rupiah(10_000),
            tendered: Money::from_rupiah(5_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: tendered Rp 5.000 is below total Rp 10.000"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "uang bayar".to_string(),
        };
        assert_eq!(err.to_string(), "uang bayar is required");

        let err = ValidationError::MustBePositive {
            field: "jumlah".to_string(),
        };
        assert_eq!(err.to_string(), "jumlah must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "uang bayar".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
