//! Payment command: applies one payment to an invoice and prints the new
//! paid amount, balance and status.

use rust_decimal::Decimal;
use solarbooks_core::payment::{apply_receipt, PaymentApplication, PaymentReceipt};
use solarbooks_core::{Money, PaymentMethod};
use tracing::info;

use crate::error::ApiError;

pub fn execute(
    total: Decimal,
    paid: Decimal,
    amount: Decimal,
    method: PaymentMethod,
) -> Result<PaymentApplication, ApiError> {
    let receipt = PaymentReceipt {
        amount: Money::new(amount),
        method,
        reference: None,
    };
    let applied = apply_receipt(Money::new(total), Money::new(paid), &receipt)?;

    info!(?method, status = ?applied.status, "payment applied");
    Ok(applied)
}

/// Parses `cash`, `bank` or `card`.
pub fn parse_method(value: &str) -> Result<PaymentMethod, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "cash" => Ok(PaymentMethod::Cash),
        "bank" => Ok(PaymentMethod::Bank),
        "card" => Ok(PaymentMethod::Card),
        other => Err(format!("unknown payment method '{other}' (expected cash, bank or card)")),
    }
}
