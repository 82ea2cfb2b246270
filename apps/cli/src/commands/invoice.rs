//! # Invoice Command
//!
//! `solarbooks invoice draft.json` reads an invoice draft and prints its
//! line amounts, subtotal, tax and total.
//!
//! ```json
//! {
//!   "customer_reference": "0b0e4a8c-...",
//!   "invoice_date": "2024-06-15",
//!   "discount": "25",
//!   "items": [
//!     { "quantity": "2", "unit_price": "500", "tax_rate": "18" },
//!     { "quantity": "1", "unit_price": "300", "discount": "50", "tax_rate": "12" }
//!   ]
//! }
//! ```

use solarbooks_core::{InvoiceDraft, InvoicePolicy, InvoiceTotals};
use tracing::info;

use crate::error::ApiError;

pub fn execute(draft_json: &str, policy: &InvoicePolicy) -> Result<InvoiceTotals, ApiError> {
    let draft: InvoiceDraft = serde_json::from_str(draft_json)?;
    let totals = draft.totals(policy)?;

    info!(lines = draft.items.len(), total = %totals.total, "invoice computed");
    Ok(totals)
}
