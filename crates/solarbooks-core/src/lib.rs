//! # solarbooks-core: Pure Business Logic for SolarBooks
//!
//! Accounting and solar-installation rules for a small business: invoice
//! totals, payments, expenses, reports and the rooftop-solar subsidy
//! schedule. Everything here is a pure function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SolarBooks Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Forms / API handlers / solarbooks CLI              │   │
//! │  │   Invoice form ──► Payment form ──► Project form ──► Reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain values in, typed results out    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ solarbooks-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  invoice  │  │  subsidy  │  │  payment  │  │  report   │  │   │
//! │  │   │  totals   │  │  tiers    │  │  status   │  │  sums     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │ numbering │  │   solar   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Document store (persists the results)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`invoice`] - Line amounts, subtotal, aggregate tax, invoice total
//! - [`subsidy`] - Tiered solar subsidy schedule
//! - [`payment`] - Applying payments and deriving payment status
//! - [`expense`] - Expense totals
//! - [`numbering`] - `INV-00001` style document numbers
//! - [`report`] - Sales, expense, dashboard and solar aggregates
//! - [`solar`] - Milestones, material consumption, documents and subsidy claims
//! - [`config`] - Tunable policy (negative totals, subsidy rates)
//! - [`money`] - Decimal money with 2-place rounding
//! - [`types`] - Shared domain types
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; no clocks, no I/O
//! 2. **Decimal Money**: never `f64`; quantities may be fractional
//! 3. **Round Once**: tax is summed unrounded and rounded at invoice level
//! 4. **Explicit Errors**: typed `ValidationError`, never a panic or partial result
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use solarbooks_core::{compute_invoice_totals, InvoicePolicy, LineItem, Money, TaxRate};
//!
//! let line = LineItem::new(
//!     Decimal::from(2),
//!     Money::from_major(500),
//!     TaxRate::from_percent(Decimal::from(18)),
//! );
//!
//! let totals = compute_invoice_totals(&[line], Money::ZERO, &InvoicePolicy::default()).unwrap();
//! assert_eq!(totals.subtotal.to_string(), "1000.00");
//! assert_eq!(totals.tax.to_string(), "180.00");
//! assert_eq!(totals.total.to_string(), "1180.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod expense;
pub mod invoice;
pub mod money;
pub mod numbering;
pub mod payment;
pub mod report;
pub mod solar;
pub mod subsidy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::PolicyConfig;
pub use error::{CoreError, CoreResult, LineField, LineIssue, ValidationError};
pub use invoice::{compute_invoice_totals, InvoiceDraft, InvoicePolicy, InvoiceTotals, NegativeTotalPolicy};
pub use money::{round2, Money};
pub use subsidy::{compute_subsidy, SubsidyQuote, SubsidySchedule, SubsidyTier};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST rate pre-filled on new invoice lines, in percent.
///
/// Each line still carries its own rate; this is only the form default.
pub const DEFAULT_TAX_RATE_PERCENT: u32 = 18;
