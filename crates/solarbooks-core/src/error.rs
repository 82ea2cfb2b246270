//! # Error Types
//!
//! Domain-specific error types for solarbooks-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  solarbooks-core errors (this file)                                    │
//! │  ├── CoreError        - Configuration / general domain errors          │
//! │  ├── ValidationError  - Caller-correctable input problems              │
//! │  └── LineIssue        - What exactly is wrong with one invoice line    │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                  │
//! │  ├── ConfigError      - Policy file / environment problems             │
//! │  └── ApiError         - What the caller sees (code + message)          │
//! │                                                                         │
//! │  Flow: LineIssue → ValidationError → CoreError → ApiError → caller     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (line index, field, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each variant has a stable machine-readable `code()`

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A subsidy schedule that would make the calculator non-monotonic or
    /// otherwise nonsensical.
    #[error("Invalid subsidy schedule: {reason}")]
    InvalidSchedule { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Invoice Line Problems
// =============================================================================

/// The numeric fields of a line item, used to name the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Quantity,
    UnitPrice,
    Discount,
    TaxRate,
}

impl LineField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineField::Quantity => "quantity",
            LineField::UnitPrice => "unit_price",
            LineField::Discount => "discount",
            LineField::TaxRate => "tax_rate",
        }
    }
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is wrong with a single invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineIssue {
    /// A numeric field is below zero.
    #[error("{0} must not be negative")]
    Negative(LineField),

    /// The line discount is larger than quantity × unit price.
    #[error("discount {discount} exceeds line total {line_total}")]
    DiscountExceedsLineTotal { discount: Money, line_total: Decimal },

    /// The discount fits the unrounded line total but not the rounded one.
    #[error("amount {amount} is negative")]
    NegativeAmount { amount: Decimal },

    /// The product reference is present but is not a registry identifier.
    #[error("product reference '{0}' is not a valid identifier")]
    InvalidProductReference(String),

    /// A money field carries digits below the currency's minor unit.
    #[error("{0} has more than two decimal places")]
    NotMinorUnits(LineField),

    /// Decimal arithmetic overflowed while computing this line.
    #[error("{0} is too large to compute")]
    Overflow(LineField),
}

impl LineIssue {
    /// Stable reason code for the request layer.
    pub fn code(&self) -> &'static str {
        match self {
            LineIssue::Negative(LineField::Quantity) => "negative_quantity",
            LineIssue::Negative(LineField::UnitPrice) => "negative_unit_price",
            LineIssue::Negative(LineField::Discount) => "negative_discount",
            LineIssue::Negative(LineField::TaxRate) => "negative_tax_rate",
            LineIssue::DiscountExceedsLineTotal { .. } => "discount_exceeds_line_total",
            LineIssue::NegativeAmount { .. } => "negative_amount",
            LineIssue::InvalidProductReference(_) => "invalid_product_reference",
            LineIssue::NotMinorUnits(_) => "must_be_minor_units",
            LineIssue::Overflow(_) => "overflow",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The only error kind the computations raise. Every variant is
/// caller-correctable: the request layer maps it to a user-facing message
/// and decides whether to reject the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Money with digits below the minor unit (`0.005`).
    #[error("{field} must be in whole minor units (at most two decimal places)")]
    NotMinorUnits { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Decimal arithmetic overflowed.
    #[error("{field} is too large to compute")]
    Overflow { field: String },

    /// A specific invoice line is malformed.
    #[error("line {index}: {issue}")]
    Line { index: usize, issue: LineIssue },

    /// Invoice-level discount larger than subtotal plus tax while the
    /// policy forbids negative totals.
    #[error("invoice discount {discount} exceeds subtotal plus tax {gross}")]
    DiscountExceedsTotal { discount: Money, gross: Money },

    /// Subsidy requested for a zero or negative capacity.
    #[error("system capacity must be positive, got {capacity_kw} kW")]
    CapacityMustBePositive { capacity_kw: Decimal },

    #[error("due date {due_date} is before invoice date {invoice_date}")]
    DueBeforeInvoiceDate {
        invoice_date: NaiveDate,
        due_date: NaiveDate,
    },
}

impl ValidationError {
    /// Stable snake_case reason code, independent of the message wording.
    ///
    /// ## Example
    /// ```rust
    /// use solarbooks_core::{SubsidySchedule, ValidationError};
    /// use rust_decimal::Decimal;
    ///
    /// let err = SubsidySchedule::default().subsidy_for(Decimal::ZERO).unwrap_err();
    /// assert_eq!(err.code(), "capacity_must_be_positive");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Required { .. } => "required",
            ValidationError::MustBePositive { .. } => "must_be_positive",
            ValidationError::MustNotBeNegative { .. } => "must_not_be_negative",
            ValidationError::NotMinorUnits { .. } => "must_be_minor_units",
            ValidationError::InvalidFormat { .. } => "invalid_format",
            ValidationError::Overflow { .. } => "overflow",
            ValidationError::Line { issue, .. } => issue.code(),
            ValidationError::DiscountExceedsTotal { .. } => "discount_exceeds_total",
            ValidationError::CapacityMustBePositive { .. } => "capacity_must_be_positive",
            ValidationError::DueBeforeInvoiceDate { .. } => "due_date_before_invoice_date",
        }
    }

    /// Index of the offending invoice line, if the error is about one.
    pub fn line_index(&self) -> Option<usize> {
        match self {
            ValidationError::Line { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub(crate) fn line(index: usize, issue: LineIssue) -> Self {
        ValidationError::Line { index, issue }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
