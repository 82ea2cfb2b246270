//! # Reports
//!
//! Aggregations behind the dashboard, the sales/expense reports and the
//! solar dashboard. The store loads the records; these functions only sum.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ InvoiceRecord[]  │────►│  SalesSummary    │     │ ProjectRecord[]  │
//! └──────────────────┘  │  └──────────────────┘     └────────┬─────────┘
//!                       ├─►DashboardStats                    ▼
//! ┌──────────────────┐  │  ┌──────────────────┐     ┌──────────────────┐
//! │ ExpenseRecord[]  │──┴─►│  ExpenseSummary  │     │  SolarDashboard  │
//! └──────────────────┘     └──────────────────┘     └──────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{ExpenseRecord, InstallationStatus, InvoiceRecord, PaymentStatus, ProjectRecord};

/// Category used for expenses recorded without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

// =============================================================================
// Sales
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub total_sales: Money,
    pub total_tax: Money,
    pub total_paid: Money,
    pub total_outstanding: Money,
    pub invoice_count: usize,
}

/// Sums every invoice, paid or not.
pub fn summarize_sales(invoices: &[InvoiceRecord]) -> SalesSummary {
    SalesSummary {
        total_sales: invoices.iter().map(|inv| inv.total).sum(),
        total_tax: invoices.iter().map(|inv| inv.tax_amount).sum(),
        total_paid: invoices.iter().map(|inv| inv.paid_amount).sum(),
        total_outstanding: invoices.iter().map(|inv| inv.balance).sum(),
        invoice_count: invoices.len(),
    }
}

// =============================================================================
// Expenses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseSummary {
    pub total_amount: Money,
    pub expense_count: usize,
    /// Total per category name, ordered by name.
    pub category_breakdown: BTreeMap<String, Money>,
}

/// The trimmed category name, or [`UNCATEGORIZED`] when it is blank.
pub fn category_label(name: Option<&str>) -> &str {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNCATEGORIZED)
}

pub fn summarize_expenses(expenses: &[ExpenseRecord]) -> ExpenseSummary {
    let mut category_breakdown: BTreeMap<String, Money> = BTreeMap::new();

    for expense in expenses {
        let category = category_label(expense.category_name.as_deref());
        *category_breakdown.entry(category.to_string()).or_default() += expense.total;
    }

    ExpenseSummary {
        total_amount: expenses.iter().map(|exp| exp.total).sum(),
        expense_count: expenses.len(),
        category_breakdown,
    }
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub total_sales: Money,
    pub total_expenses: Money,
    pub profit: Money,
    /// Balance of invoices that are not fully paid.
    pub total_outstanding: Money,
    pub invoice_count: usize,
}

pub fn dashboard_stats(invoices: &[InvoiceRecord], expenses: &[ExpenseRecord]) -> DashboardStats {
    let total_sales: Money = invoices.iter().map(|inv| inv.total).sum();
    let total_expenses: Money = expenses.iter().map(|exp| exp.total).sum();
    let total_outstanding = invoices
        .iter()
        .filter(|inv| inv.status != PaymentStatus::Paid)
        .map(|inv| inv.balance)
        .sum();

    DashboardStats {
        total_sales,
        total_expenses,
        profit: total_sales - total_expenses,
        total_outstanding,
        invoice_count: invoices.len(),
    }
}

// =============================================================================
// Solar Dashboard
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SolarDashboard {
    pub total_projects: usize,
    pub projects_by_status: BTreeMap<InstallationStatus, usize>,
    #[ts(type = "string")]
    pub total_capacity_kw: Decimal,
    pub total_estimated_revenue: Money,
    pub total_subsidy_amount: Money,
    pub pending_subsidies_count: usize,
}

/// Aggregates the project portfolio. `pending_claims` is the number of
/// subsidy claims still in `pending` state, counted by the store.
pub fn solar_dashboard(projects: &[ProjectRecord], pending_claims: usize) -> SolarDashboard {
    let mut projects_by_status = BTreeMap::new();
    for project in projects {
        *projects_by_status
            .entry(project.installation_status)
            .or_insert(0) += 1;
    }

    SolarDashboard {
        total_projects: projects.len(),
        projects_by_status,
        total_capacity_kw: projects.iter().map(|p| p.system_capacity_kw).sum(),
        total_estimated_revenue: projects.iter().map(|p| p.estimated_cost).sum(),
        total_subsidy_amount: projects.iter().map(|p| p.subsidy_amount).sum(),
        pending_subsidies_count: pending_claims,
    }
}
