//! # Payment Application
//!
//! Applies a received payment to an invoice and reclassifies it.
//!
//! ```text
//! paid    = already_paid + payment
//! balance = total − paid
//! status  = paid     if balance ≤ 0
//!           partial  if paid > 0
//!           unpaid   otherwise
//! ```
//!
//! Overpayment is allowed and shows up as a negative balance; refunding it
//! is a separate workflow.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{PaymentMethod, PaymentStatus};
use crate::validation::{
    validate_minor_units, validate_non_negative, validate_positive, ValidationResult,
};

/// A payment received against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentReceipt {
    pub amount: Money,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub reference: Option<String>,
}

/// The invoice's settlement figures after a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentApplication {
    pub paid_amount: Money,
    pub balance: Money,
    pub status: PaymentStatus,
}

/// Applies `payment` to an invoice of `invoice_total` of which
/// `already_paid` has been received.
///
/// ## Example
/// ```rust
/// use solarbooks_core::money::Money;
/// use solarbooks_core::payment::apply_payment;
/// use solarbooks_core::types::PaymentStatus;
///
/// let applied = apply_payment(Money::from_major(1180), Money::ZERO, Money::from_major(500)).unwrap();
/// assert_eq!(applied.balance, Money::from_major(680));
/// assert_eq!(applied.status, PaymentStatus::Partial);
/// ```
pub fn apply_payment(
    invoice_total: Money,
    already_paid: Money,
    payment: Money,
) -> ValidationResult<PaymentApplication> {
    validate_non_negative("paid_amount", already_paid)?;
    validate_positive("payment amount", payment)?;
    validate_minor_units("paid_amount", already_paid)?;
    validate_minor_units("payment amount", payment)?;

    let paid_amount = already_paid
        .checked_add(payment)
        .ok_or_else(|| overflow("paid_amount"))?;
    let balance = invoice_total
        .checked_sub(paid_amount)
        .ok_or_else(|| overflow("balance"))?;
    let status = PaymentStatus::for_balance(invoice_total, paid_amount);

    debug!(%invoice_total, %paid_amount, %balance, ?status, "payment applied");

    Ok(PaymentApplication {
        paid_amount,
        balance,
        status,
    })
}

/// Applies a receipt; the method and reference do not affect the figures.
pub fn apply_receipt(
    invoice_total: Money,
    already_paid: Money,
    receipt: &PaymentReceipt,
) -> ValidationResult<PaymentApplication> {
    apply_payment(invoice_total, already_paid, receipt.amount)
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
}
