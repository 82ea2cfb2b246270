//! # Domain Types
//!
//! Core domain types shared by the invoice engine, reports and the solar
//! tracking rules.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  InvoiceRecord  │   │  ExpenseRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity       │   │  total          │   │  total          │       │
//! │  │  unit_price     │   │  tax_amount     │   │  category_name  │       │
//! │  │  discount       │   │  paid / balance │   └─────────────────┘       │
//! │  │  tax_rate       │   │  status         │                              │
//! │  └─────────────────┘   └─────────────────┘   ┌─────────────────┐       │
//! │                                              │  ProjectRecord  │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  ─────────────  │       │
//! │  │    TaxRate      │   │  PaymentStatus  │   │  capacity_kw    │       │
//! │  │  percent        │   │  Unpaid         │   │  estimated_cost │       │
//! │  │  18 = 18% GST   │   │  Partial / Paid │   │  subsidy_amount │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Solar statuses: Installation, Milestone, Subsidy, Document(+Type)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entity records here carry only the fields the pure rules read; the full
//! persisted documents live in the external store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a plain percentage (`18` means 18%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        TaxRate(percent)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// The GST rate new lines start with.
    pub fn standard() -> Self {
        TaxRate(Decimal::from(crate::DEFAULT_TAX_RATE_PERCENT))
    }

    /// `amount × percent / 100`, unrounded. `None` on overflow.
    pub fn fraction_of(&self, amount: Decimal) -> Option<Decimal> {
        amount
            .checked_mul(self.0)?
            .checked_div(Decimal::ONE_HUNDRED)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of an invoice.
///
/// The derived `amount` is not stored; the invoice engine computes it as
/// `round2(quantity × unit_price) − discount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Registry identifier of the product/service, if the row references one.
    #[serde(default)]
    pub product_reference: Option<String>,

    /// Quantity sold. Fractional quantities are allowed (kW, metres).
    #[ts(type = "string")]
    pub quantity: Decimal,

    /// Price per unit in currency units.
    pub unit_price: Money,

    /// Flat discount on this line, in currency units.
    #[serde(default)]
    pub discount: Money,

    /// Tax rate as a percentage. Omitted rates mean standard GST.
    #[serde(default = "TaxRate::standard")]
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates a line without product reference or discount.
    pub fn new(quantity: Decimal, unit_price: Money, tax_rate: TaxRate) -> Self {
        LineItem {
            product_reference: None,
            quantity,
            unit_price,
            discount: Money::ZERO,
            tax_rate,
        }
    }

    /// Sets the flat line discount.
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }

    /// Sets the product reference.
    pub fn with_product(mut self, reference: impl Into<String>) -> Self {
        self.product_reference = Some(reference.into());
        self
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Settlement state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing received yet.
    #[default]
    Unpaid,
    /// Some money received, balance outstanding.
    Partial,
    /// Balance is zero or overpaid.
    Paid,
}

impl PaymentStatus {
    /// Classifies an invoice from its total and the amount paid so far.
    ///
    /// ## Example
    /// ```rust
    /// use solarbooks_core::money::Money;
    /// use solarbooks_core::types::PaymentStatus;
    ///
    /// let total = Money::from_major(1180);
    /// assert_eq!(PaymentStatus::for_balance(total, Money::ZERO), PaymentStatus::Unpaid);
    /// assert_eq!(PaymentStatus::for_balance(total, Money::from_major(100)), PaymentStatus::Partial);
    /// assert_eq!(PaymentStatus::for_balance(total, total), PaymentStatus::Paid);
    /// ```
    pub fn for_balance(total: Money, paid: Money) -> Self {
        if total - paid <= Money::ZERO {
            PaymentStatus::Paid
        } else if paid.is_positive() {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }
}

/// How money changed hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Bank,
    Card,
}

// =============================================================================
// Solar Statuses
// =============================================================================

/// Installation lifecycle of a solar project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InstallationStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl InstallationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InstallationStatus::Planning => "planning",
            InstallationStatus::InProgress => "in_progress",
            InstallationStatus::Completed => "completed",
            InstallationStatus::OnHold => "on_hold",
        }
    }
}

/// Progress of a single project milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Where a government subsidy claim stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubsidyStatus {
    #[default]
    Pending,
    Applied,
    Approved,
    Received,
    Rejected,
}

/// Kind of paperwork filed with the DISCOM or the subsidy portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    SubsidyApplication,
    TechnicalApproval,
    NetMetering,
    CompletionCertificate,
}

/// Review state of a government document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Submitted,
    Approved,
    Rejected,
}

// =============================================================================
// Records Read by Reports
// =============================================================================

/// The persisted figures of an issued invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceRecord {
    pub total: Money,
    #[serde(default)]
    pub tax_amount: Money,
    #[serde(default)]
    pub paid_amount: Money,
    pub balance: Money,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// The persisted figures of a recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseRecord {
    pub total: Money,
    #[serde(default)]
    pub category_name: Option<String>,
}

/// The persisted figures of a solar project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectRecord {
    #[ts(type = "string")]
    pub system_capacity_kw: Decimal,
    pub estimated_cost: Money,
    #[serde(default)]
    pub subsidy_amount: Money,
    #[serde(default)]
    pub installation_status: InstallationStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
