//! # Validation Module
//!
//! Input validation for Apotek POS.
//!
//! The presentation layer hands over raw strings (the pay field) and raw
//! numbers (quantities). Everything is validated here, before any business
//! logic or persistence runs.
//!
//! ## Usage
//! ```rust
//! use apotek_core::validation::{parse_rupiah, validate_quantity};
//!
//! // Parse the tendered amount the cashier typed
//! let tendered = parse_rupiah("Rp 10.000").unwrap();
//! assert_eq!(tendered.rupiah(), 10_000);
//!
//! // Validate a quantity before a cart operation
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Tendered Amount Parsing
// =============================================================================

/// Parses a tendered cash amount from raw pay-field input.
///
/// ## Accepted Shapes
/// The cashier may type the amount bare or formatted; currency prefix,
/// thousands separators and spaces are stripped before parsing:
///
/// | Input          | Parsed    |
/// |----------------|-----------|
/// | `10000`        | Rp 10.000 |
/// | `Rp 10.000`    | Rp 10.000 |
/// | `10,000`       | Rp 10.000 |
/// | `rp10000`      | Rp 10.000 |
///
/// ## Errors
/// - [`ValidationError::Required`] for empty input
/// - [`ValidationError::InvalidFormat`] for non-numeric or negative input
///
/// ## Example
/// ```rust
/// use apotek_core::validation::parse_rupiah;
///
/// assert_eq!(parse_rupiah("15000").unwrap().rupiah(), 15_000);
/// assert!(parse_rupiah("abc").is_err());
/// assert!(parse_rupiah("-500").is_err());
/// ```
pub fn parse_rupiah(input: &str) -> ValidationResult<Money> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "uang bayar".to_string(),
        });
    }

    // Strip the currency prefix, then every separator the cashier might type
    let stripped = trimmed
        .strip_prefix("Rp")
        .or_else(|| trimmed.strip_prefix("rp"))
        .or_else(|| trimmed.strip_prefix("RP"))
        .unwrap_or(trimmed);
    let digits: String = stripped
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' '))
        .collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "uang bayar".to_string(),
        });
    }

    let amount: i64 = digits.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "uang bayar".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if amount < 0 {
        return Err(ValidationError::InvalidFormat {
            field: "uang bayar".to_string(),
            reason: "must be a non-negative amount".to_string(),
        });
    }

    Ok(Money::from_rupiah(amount))
}

// =============================================================================
// Quantity Validation
// =============================================================================

/// Validates a line quantity for cart and restock operations.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "jumlah".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "jumlah".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
