//! # Invoice Totals Engine
//!
//! Turns a list of line items and an invoice-level discount into the figures
//! that get persisted with the invoice.
//!
//! ## Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each line (fail fast, no partial results)                          │
//! │      validate quantity, unit_price, discount, tax_rate ≥ 0              │
//! │      unit_price, discount in whole minor units (≤ 2 dp)                 │
//! │      discount ≤ quantity × unit_price                                   │
//! │      amount   = round2(quantity × unit_price) − discount   (≥ 0)        │
//! │      raw_tax += amount × tax_rate / 100                    (unrounded)  │
//! │                                                                         │
//! │  subtotal = round2(Σ amount)                                            │
//! │  tax      = round2(raw_tax)            ◄── one rounding, not per line   │
//! │  total    = subtotal + tax − invoice_discount                           │
//! │                                                                         │
//! │  invoice_discount > subtotal + tax ──► NegativeTotalPolicy decides      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use rust_decimal::Decimal;
//! use solarbooks_core::invoice::{compute_invoice_totals, InvoicePolicy};
//! use solarbooks_core::{LineItem, Money, TaxRate};
//!
//! let items = vec![LineItem::new(
//!     Decimal::from(2),
//!     Money::from_major(500),
//!     TaxRate::from_percent(Decimal::from(18)),
//! )];
//! let totals = compute_invoice_totals(&items, Money::ZERO, &InvoicePolicy::default()).unwrap();
//! assert_eq!(totals.subtotal.to_string(), "1000.00");
//! assert_eq!(totals.tax.to_string(), "180.00");
//! assert_eq!(totals.total.to_string(), "1180.00");
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use ts_rs::TS;

use crate::error::{LineField, LineIssue, ValidationError};
use crate::money::{round2, Money};
use crate::types::LineItem;
use crate::validation::{
    validate_due_date, validate_minor_units, validate_non_negative, validate_reference,
    ValidationResult,
};

// =============================================================================
// Policy
// =============================================================================

/// What to do when the invoice discount exceeds subtotal plus tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NegativeTotalPolicy {
    /// Fail with `discount_exceeds_total`.
    #[default]
    Reject,
    /// Return the negative total as computed (credit notes).
    Allow,
    /// Report a total of zero; the supplied discount is kept as is.
    ClampToZero,
}

/// Caller-configurable invoice rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicePolicy {
    pub negative_total: NegativeTotalPolicy,
}

impl InvoicePolicy {
    pub const fn new(negative_total: NegativeTotalPolicy) -> Self {
        InvoicePolicy { negative_total }
    }
}

// =============================================================================
// Results
// =============================================================================

/// The computed figures of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    /// `round2(quantity × unit_price) − discount` for each line, in input order.
    pub line_amounts: Vec<Money>,
    pub subtotal: Money,
    pub tax: Money,
    /// The invoice-level discount, at two decimal places.
    pub discount: Money,
    pub total: Money,
}

/// A line's amount together with its unrounded tax contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineComputation {
    pub amount: Money,
    pub raw_tax: Decimal,
}

// =============================================================================
// Engine
// =============================================================================

/// Computes a single line, naming `index` in any error.
pub fn compute_line(index: usize, item: &LineItem) -> ValidationResult<LineComputation> {
    let fail = |issue| ValidationError::line(index, issue);

    if let Some(reference) = item.product_reference.as_deref() {
        if !reference.trim().is_empty() && validate_reference("product_reference", reference).is_err() {
            return Err(fail(LineIssue::InvalidProductReference(reference.to_string())));
        }
    }

    if item.quantity < Decimal::ZERO {
        return Err(fail(LineIssue::Negative(LineField::Quantity)));
    }
    if item.unit_price.is_negative() {
        return Err(fail(LineIssue::Negative(LineField::UnitPrice)));
    }
    if item.discount.is_negative() {
        return Err(fail(LineIssue::Negative(LineField::Discount)));
    }
    if item.tax_rate.percent() < Decimal::ZERO {
        return Err(fail(LineIssue::Negative(LineField::TaxRate)));
    }
    if !item.unit_price.is_minor_units() {
        return Err(fail(LineIssue::NotMinorUnits(LineField::UnitPrice)));
    }
    if !item.discount.is_minor_units() {
        return Err(fail(LineIssue::NotMinorUnits(LineField::Discount)));
    }

    let gross = item
        .quantity
        .checked_mul(item.unit_price.amount())
        .ok_or_else(|| fail(LineIssue::Overflow(LineField::Quantity)))?;

    if item.discount.amount() > gross {
        return Err(fail(LineIssue::DiscountExceedsLineTotal {
            discount: item.discount,
            line_total: gross,
        }));
    }

    // A whole-cent discount no larger than the gross never exceeds the rounded
    // gross, so this only guards the arithmetic.
    let amount = round2(gross) - item.discount.amount();
    if amount < Decimal::ZERO {
        return Err(fail(LineIssue::NegativeAmount { amount }));
    }

    let amount = Money::new(amount);
    let raw_tax = amount
        .tax_fraction(item.tax_rate)
        .ok_or_else(|| fail(LineIssue::Overflow(LineField::TaxRate)))?;

    trace!(line = index, %amount, %raw_tax, "line computed");

    Ok(LineComputation { amount, raw_tax })
}

/// Computes subtotal, tax and total for an invoice.
///
/// ## Errors
/// - `ValidationError::Line { index, .. }` for the first malformed line
/// - `ValidationError::MustNotBeNegative` for a negative invoice discount
/// - `ValidationError::DiscountExceedsTotal` when the discount exceeds
///   subtotal plus tax and the policy is `Reject`
/// - `ValidationError::Overflow` if the sums do not fit a decimal
pub fn compute_invoice_totals(
    items: &[LineItem],
    invoice_discount: Money,
    policy: &InvoicePolicy,
) -> ValidationResult<InvoiceTotals> {
    validate_non_negative("discount", invoice_discount)?;
    validate_minor_units("discount", invoice_discount)?;
    let invoice_discount = invoice_discount.rounded();

    let mut line_amounts = Vec::with_capacity(items.len());
    let mut amount_sum = Decimal::ZERO;
    let mut raw_tax_sum = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        let line = compute_line(index, item)?;

        amount_sum = amount_sum
            .checked_add(line.amount.amount())
            .ok_or_else(|| overflow("subtotal"))?;
        raw_tax_sum = raw_tax_sum
            .checked_add(line.raw_tax)
            .ok_or_else(|| overflow("tax"))?;

        line_amounts.push(line.amount);
    }

    let subtotal = Money::new(round2(amount_sum));
    let tax = Money::new(round2(raw_tax_sum));
    let gross = subtotal.checked_add(tax).ok_or_else(|| overflow("total"))?;

    let total = if invoice_discount > gross {
        match policy.negative_total {
            NegativeTotalPolicy::Reject => {
                return Err(ValidationError::DiscountExceedsTotal {
                    discount: invoice_discount,
                    gross,
                });
            }
            NegativeTotalPolicy::Allow => {
                warn!(%invoice_discount, %gross, "invoice discount exceeds subtotal plus tax, total is negative");
                gross - invoice_discount
            }
            NegativeTotalPolicy::ClampToZero => {
                warn!(%invoice_discount, %gross, "invoice discount exceeds subtotal plus tax, total clamped to zero");
                Money::ZERO
            }
        }
    } else {
        gross - invoice_discount
    };

    debug!(
        lines = items.len(),
        %subtotal,
        %tax,
        discount = %invoice_discount,
        %total,
        "invoice totals computed"
    );

    Ok(InvoiceTotals {
        line_amounts,
        subtotal,
        tax,
        discount: invoice_discount,
        total,
    })
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
}

// =============================================================================
// Invoice Draft
// =============================================================================

/// An invoice as submitted by the invoice-creation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDraft {
    /// Registry identifier of the customer.
    pub customer_reference: String,

    #[ts(as = "String")]
    pub invoice_date: NaiveDate,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,

    /// Invoice-level flat discount.
    #[serde(default)]
    pub discount: Money,

    #[serde(default)]
    pub notes: Option<String>,

    pub items: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Validates the header fields, then computes the totals.
    ///
    /// An empty item list is accepted; whether such an invoice may be issued
    /// is the workflow's decision.
    pub fn totals(&self, policy: &InvoicePolicy) -> ValidationResult<InvoiceTotals> {
        validate_reference("customer_reference", &self.customer_reference)?;
        validate_due_date(self.invoice_date, self.due_date)?;

        compute_invoice_totals(&self.items, self.discount, policy)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;
    use rust_decimal_macros::dec;

    const CUSTOMER: &str = "7d444840-9dc0-11d1-b245-5ffdce74fad2";

    fn item(quantity: Decimal, price: Decimal, discount: Decimal, tax: Decimal) -> LineItem {
        LineItem::new(quantity, Money::new(price), TaxRate::from_percent(tax))
            .with_discount(Money::new(discount))
    }

    fn reject() -> InvoicePolicy {
        InvoicePolicy::default()
    }

    #[test]
    fn test_single_line_invoice() {
        let items = vec![item(dec!(2), dec!(500), dec!(0), dec!(18))];
        let totals = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap();

        assert_eq!(totals.line_amounts, vec![Money::new(dec!(1000.00))]);
        assert_eq!(totals.subtotal, Money::new(dec!(1000.00)));
        assert_eq!(totals.tax, Money::new(dec!(180.00)));
        assert_eq!(totals.total, Money::new(dec!(1180.00)));
    }

    #[test]
    fn test_two_line_invoice_with_discounts() {
        let items = vec![
            item(dec!(2), dec!(500), dec!(0), dec!(18)),
            item(dec!(1), dec!(300), dec!(50), dec!(12)),
        ];
        let totals = compute_invoice_totals(&items, Money::new(dec!(25)), &reject()).unwrap();

        assert_eq!(
            totals.line_amounts,
            vec![Money::new(dec!(1000.00)), Money::new(dec!(250.00))]
        );
        assert_eq!(totals.subtotal, Money::new(dec!(1250.00)));
        assert_eq!(totals.tax, Money::new(dec!(210.00)));
        assert_eq!(totals.discount, Money::new(dec!(25)));
        assert_eq!(totals.total, Money::new(dec!(1435.00)));
    }

    #[test]
    fn test_empty_invoice_is_allowed() {
        let totals = compute_invoice_totals(&[], Money::ZERO, &reject()).unwrap();
        assert!(totals.line_amounts.is_empty());
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn test_line_amount_rounds_half_away_from_zero() {
        // 2.5 × 333.33 = 833.325 → 833.33
        let items = vec![item(dec!(2.5), dec!(333.33), dec!(0), dec!(0))];
        let totals = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap();
        assert_eq!(totals.line_amounts[0], Money::new(dec!(833.33)));
    }

    #[test]
    fn test_tax_rounded_once_at_aggregate_level() {
        // Each line: 0.05 × 10% = 0.005. Rounded per line that would be
        // 0.01 × 3 = 0.03; summed first it is 0.015 → 0.02.
        let items = vec![
            item(dec!(1), dec!(0.05), dec!(0), dec!(10)),
            item(dec!(1), dec!(0.05), dec!(0), dec!(10)),
            item(dec!(1), dec!(0.05), dec!(0), dec!(10)),
        ];
        let totals = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap();
        assert_eq!(totals.tax, Money::new(dec!(0.02)));
        assert_eq!(totals.subtotal, Money::new(dec!(0.15)));
    }

    #[test]
    fn test_discount_exceeding_line_total_names_line() {
        let items = vec![
            item(dec!(1), dec!(100), dec!(0), dec!(18)),
            item(dec!(2), dec!(10), dec!(25), dec!(18)),
        ];
        let err = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap_err();

        assert_eq!(err.line_index(), Some(1));
        assert_eq!(err.code(), "discount_exceeds_line_total");
    }

    #[test]
    fn test_discount_equal_to_line_total_gives_zero_amount() {
        let items = vec![item(dec!(2), dec!(10), dec!(20), dec!(18))];
        let totals = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap();
        assert_eq!(totals.line_amounts[0], Money::ZERO);
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn test_sub_cent_money_rejected() {
        let cases = [
            (item(dec!(1), dec!(0.004), dec!(0), dec!(0)), "unit_price"),
            (item(dec!(1), dec!(10), dec!(0.005), dec!(0)), "discount"),
        ];

        for (line, field) in cases {
            let err = compute_invoice_totals(&[line], Money::ZERO, &reject()).unwrap_err();
            assert_eq!(err.code(), "must_be_minor_units");
            assert_eq!(err.line_index(), Some(0));
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn test_sub_cent_invoice_discount_rejected() {
        let items = vec![item(dec!(1), dec!(100), dec!(0), dec!(0))];
        let err = compute_invoice_totals(&items, Money::new(dec!(0.005)), &reject()).unwrap_err();
        assert_eq!(err.code(), "must_be_minor_units");
        assert_eq!(err.line_index(), None);
    }

    #[test]
    fn test_invoice_discount_reported_at_two_places() {
        let items = vec![item(dec!(1), dec!(100), dec!(0), dec!(0))];
        let totals = compute_invoice_totals(&items, Money::new(dec!(0.1)), &reject()).unwrap();

        assert_eq!(totals.discount.to_string(), "0.10");
        assert_eq!(serde_json::to_value(&totals).unwrap()["discount"], "0.10");
        assert_eq!(serde_json::to_value(&totals).unwrap()["total"], "99.90");
    }

    #[test]
    fn test_fractional_quantity_with_whole_cent_discount() {
        // 0.333 × 0.03 = 0.00999 rounds to 0.01, which the discount consumes.
        let items = vec![item(dec!(0.333), dec!(0.03), dec!(0), dec!(0))];
        let totals = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap();
        assert_eq!(totals.line_amounts[0], Money::new(dec!(0.01)));

        let items = vec![item(dec!(0.333), dec!(0.03), dec!(0.01), dec!(0))];
        let err = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap_err();
        assert_eq!(err.code(), "discount_exceeds_line_total");
    }

    #[test]
    fn test_negative_fields_rejected() {
        let cases = [
            (item(dec!(-1), dec!(10), dec!(0), dec!(0)), "negative_quantity"),
            (item(dec!(1), dec!(-10), dec!(0), dec!(0)), "negative_unit_price"),
            (item(dec!(1), dec!(10), dec!(-1), dec!(0)), "negative_discount"),
            (item(dec!(1), dec!(10), dec!(0), dec!(-5)), "negative_tax_rate"),
        ];

        for (line, code) in cases {
            let err = compute_invoice_totals(&[line], Money::ZERO, &reject()).unwrap_err();
            assert_eq!(err.code(), code);
            assert_eq!(err.line_index(), Some(0));
        }
    }

    #[test]
    fn test_fails_fast_on_first_bad_line() {
        let items = vec![
            item(dec!(1), dec!(10), dec!(0), dec!(0)),
            item(dec!(-1), dec!(10), dec!(0), dec!(0)),
            item(dec!(1), dec!(-10), dec!(0), dec!(0)),
        ];
        let err = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap_err();
        assert_eq!(err.line_index(), Some(1));
    }

    #[test]
    fn test_invalid_product_reference() {
        let line = item(dec!(1), dec!(10), dec!(0), dec!(0)).with_product("SKU-1");
        let err = compute_invoice_totals(&[line], Money::ZERO, &reject()).unwrap_err();
        assert_eq!(err.code(), "invalid_product_reference");

        let blank = item(dec!(1), dec!(10), dec!(0), dec!(0)).with_product("  ");
        assert!(compute_invoice_totals(&[blank], Money::ZERO, &reject()).is_ok());
    }

    #[test]
    fn test_negative_invoice_discount_rejected() {
        let items = vec![item(dec!(1), dec!(10), dec!(0), dec!(0))];
        let err = compute_invoice_totals(&items, Money::new(dec!(-1)), &reject()).unwrap_err();
        assert_eq!(err.code(), "must_not_be_negative");
    }

    #[test]
    fn test_discount_exceeding_total_policies() {
        let items = vec![item(dec!(1), dec!(100), dec!(0), dec!(18))];
        let discount = Money::new(dec!(200));

        let err = compute_invoice_totals(&items, discount, &reject()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DiscountExceedsTotal {
                discount,
                gross: Money::new(dec!(118.00)),
            }
        );

        let allow = InvoicePolicy::new(NegativeTotalPolicy::Allow);
        let totals = compute_invoice_totals(&items, discount, &allow).unwrap();
        assert_eq!(totals.total, Money::new(dec!(-82.00)));

        let clamp = InvoicePolicy::new(NegativeTotalPolicy::ClampToZero);
        let totals = compute_invoice_totals(&items, discount, &clamp).unwrap();
        assert_eq!(totals.total, Money::ZERO);
        assert_eq!(totals.discount, discount);
    }

    #[test]
    fn test_discount_equal_to_gross_is_not_negative() {
        let items = vec![item(dec!(1), dec!(100), dec!(0), dec!(18))];
        let totals = compute_invoice_totals(&items, Money::new(dec!(118)), &reject()).unwrap();
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn test_overflow_is_an_error_not_a_panic() {
        let items = vec![item(Decimal::MAX, dec!(2), dec!(0), dec!(0))];
        let err = compute_invoice_totals(&items, Money::ZERO, &reject()).unwrap_err();
        assert_eq!(err.code(), "overflow");
    }

    #[test]
    fn test_draft_totals() {
        let draft = InvoiceDraft {
            customer_reference: CUSTOMER.to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 7, 15),
            discount: Money::new(dec!(25)),
            notes: Some("Rooftop install".to_string()),
            items: vec![
                item(dec!(2), dec!(500), dec!(0), dec!(18)),
                item(dec!(1), dec!(300), dec!(50), dec!(12)),
            ],
        };
        let totals = draft.totals(&reject()).unwrap();
        assert_eq!(totals.total, Money::new(dec!(1435)));
    }

    #[test]
    fn test_draft_rejects_due_date_before_invoice_date() {
        let draft = InvoiceDraft {
            customer_reference: CUSTOMER.to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 14),
            discount: Money::ZERO,
            notes: None,
            items: vec![],
        };
        let err = draft.totals(&reject()).unwrap_err();
        assert_eq!(err.code(), "due_date_before_invoice_date");
    }

    #[test]
    fn test_draft_deserializes_from_json() {
        let json = format!(
            r#"{{
                "customer_reference": "{CUSTOMER}",
                "invoice_date": "2024-06-15",
                "items": [
                    {{ "quantity": 2, "unit_price": 500, "tax_rate": 18 }}
                ]
            }}"#
        );
        let draft: InvoiceDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(draft.discount, Money::ZERO);
        assert!(draft.due_date.is_none());

        let totals = draft.totals(&reject()).unwrap();
        assert_eq!(totals.total, Money::new(dec!(1180)));
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        let policy: InvoicePolicy =
            serde_json::from_str(r#"{ "negative_total": "clamp_to_zero" }"#).unwrap();
        assert_eq!(policy.negative_total, NegativeTotalPolicy::ClampToZero);

        let policy: InvoicePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, InvoicePolicy::default());
    }
}
