//! # Validation Module
//!
//! Input validation utilities shared by the computations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React forms)                                       │
//! │  └── Immediate user feedback, best effort                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request handler                                              │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: numeric and format rules                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Computation (invoice, subsidy, payment)                      │
//! │  └── Fails fast on the first invalid input, no partial results         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a money value is zero or more.
pub fn validate_non_negative(field: &str, value: Money) -> ValidationResult<()> {
    if value.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that a money value is strictly positive.
pub fn validate_positive(field: &str, value: Money) -> ValidationResult<()> {
    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that a money value has at most two decimal places.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use solarbooks_core::money::Money;
/// use solarbooks_core::validation::validate_minor_units;
///
/// assert!(validate_minor_units("discount", Money::new(dec!(0.1))).is_ok());
/// assert!(validate_minor_units("discount", Money::new(dec!(0.005))).is_err());
/// ```
pub fn validate_minor_units(field: &str, value: Money) -> ValidationResult<()> {
    if !value.is_minor_units() {
        return Err(ValidationError::NotMinorUnits {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a registry identifier (UUID format).
///
/// ## Example
/// ```rust
/// use solarbooks_core::validation::validate_reference;
///
/// assert!(validate_reference("product", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_reference("product", "not-a-uuid").is_err());
/// ```
pub fn validate_reference(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a due date, when present, does not precede the issue date.
pub fn validate_due_date(invoice_date: NaiveDate, due_date: Option<NaiveDate>) -> ValidationResult<()> {
    match due_date {
        Some(due_date) if due_date < invoice_date => Err(ValidationError::DueBeforeInvoiceDate {
            invoice_date,
            due_date,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("discount", Money::ZERO).is_ok());
        assert!(validate_non_negative("discount", Money::from_minor(1)).is_ok());
        assert!(matches!(
            validate_non_negative("discount", Money::from_minor(-1)),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("payment", Money::from_minor(1)).is_ok());
        assert!(validate_positive("payment", Money::ZERO).is_err());
        assert!(validate_positive("payment", Money::from_minor(-100)).is_err());
    }

    #[test]
    fn test_validate_minor_units() {
        assert!(validate_minor_units("price", Money::new(dec!(500))).is_ok());
        assert!(validate_minor_units("price", Money::new(dec!(333.33))).is_ok());
        assert!(validate_minor_units("price", Money::new(dec!(333.330))).is_ok());

        let err = validate_minor_units("discount", Money::new(dec!(0.005))).unwrap_err();
        assert_eq!(err.code(), "must_be_minor_units");
        assert!(err.to_string().starts_with("discount "));
    }

    #[test]
    fn test_validate_reference() {
        assert!(validate_reference("product", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_reference("product", "").is_err());
        assert!(validate_reference("product", "123").is_err());
    }

    #[test]
    fn test_validate_due_date() {
        let issued = date(2024, 6, 15);
        assert!(validate_due_date(issued, None).is_ok());
        assert!(validate_due_date(issued, Some(issued)).is_ok());
        assert!(validate_due_date(issued, Some(date(2024, 7, 15))).is_ok());

        let err = validate_due_date(issued, Some(date(2024, 6, 1))).unwrap_err();
        assert_eq!(err.code(), "due_date_before_invoice_date");
    }
}
