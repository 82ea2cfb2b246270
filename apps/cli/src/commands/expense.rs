//! Expense command: builds an expense draft from the flags and prints its
//! total along with the category and payment method it was booked under.

use rust_decimal::Decimal;
use serde::Serialize;
use solarbooks_core::expense::ExpenseDraft;
use solarbooks_core::report::category_label;
use solarbooks_core::{Money, PaymentMethod};
use tracing::info;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseTotal {
    pub total: Money,
    pub category_name: String,
    pub payment_method: PaymentMethod,
}

pub fn execute(
    amount: Decimal,
    tax: Decimal,
    category: Option<String>,
    method: PaymentMethod,
) -> Result<ExpenseTotal, ApiError> {
    let draft = ExpenseDraft {
        amount: Money::new(amount),
        tax_amount: Money::new(tax),
        category_name: category,
        payment_method: method,
    };
    let total = draft.total()?;

    let category_name = category_label(draft.category_name.as_deref()).to_string();

    info!(category = %category_name, ?method, %total, "expense computed");
    Ok(ExpenseTotal {
        total,
        category_name,
        payment_method: draft.payment_method,
    })
}
