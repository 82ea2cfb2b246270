//! Expense totals: `total = amount + tax_amount`, both non-negative.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PaymentMethod;
use crate::validation::{validate_minor_units, validate_non_negative, ValidationResult};

/// An expense as entered on the expense form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseDraft {
    pub amount: Money,
    #[serde(default)]
    pub tax_amount: Money,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl ExpenseDraft {
    pub fn total(&self) -> ValidationResult<Money> {
        compute_expense_total(self.amount, self.tax_amount)
    }
}

/// Sums an expense's net amount and tax. Both parts must be in whole minor
/// units; the total is reported at two decimal places.
pub fn compute_expense_total(amount: Money, tax_amount: Money) -> ValidationResult<Money> {
    validate_non_negative("amount", amount)?;
    validate_non_negative("tax_amount", tax_amount)?;
    validate_minor_units("amount", amount)?;
    validate_minor_units("tax_amount", tax_amount)?;

    amount
        .checked_add(tax_amount)
        .map(|total| total.rounded())
        .ok_or_else(|| ValidationError::Overflow {
            field: "total".to_string(),
        })
}
