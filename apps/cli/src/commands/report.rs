//! # Report Command
//!
//! Aggregates exported records into the dashboard figures.
//!
//! ## Input
//! ```json
//! {
//!   "invoices": [{ "total": "1180", "tax_amount": "180", "paid_amount": "0",
//!                  "balance": "1180", "status": "unpaid" }],
//!   "expenses": [{ "total": "250", "category_name": "Travel" }],
//!   "projects": [{ "system_capacity_kw": "3", "estimated_cost": "180000",
//!                  "subsidy_amount": "78000", "installation_status": "planning" }],
//!   "subsidy_claims": [{ "applied_amount": "78000", "status": "pending", ... }]
//! }
//! ```
//! Every collection is optional. Output is `{ sales, expenses, dashboard, solar }`.

use serde::{Deserialize, Serialize};
use solarbooks_core::report::{
    dashboard_stats, solar_dashboard, summarize_expenses, summarize_sales, DashboardStats,
    ExpenseSummary, SalesSummary, SolarDashboard,
};
use solarbooks_core::solar::SubsidyClaim;
use solarbooks_core::{ExpenseRecord, InvoiceRecord, ProjectRecord, SubsidyStatus};
use tracing::info;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportInput {
    pub invoices: Vec<InvoiceRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub projects: Vec<ProjectRecord>,
    pub subsidy_claims: Vec<SubsidyClaim>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub sales: SalesSummary,
    pub expenses: ExpenseSummary,
    pub dashboard: DashboardStats,
    pub solar: SolarDashboard,
}

pub fn execute(records_json: &str) -> Result<Report, ApiError> {
    let input: ReportInput = serde_json::from_str(records_json)?;

    let pending_claims = input
        .subsidy_claims
        .iter()
        .filter(|claim| claim.status == SubsidyStatus::Pending)
        .count();

    let report = Report {
        sales: summarize_sales(&input.invoices),
        expenses: summarize_expenses(&input.expenses),
        dashboard: dashboard_stats(&input.invoices, &input.expenses),
        solar: solar_dashboard(&input.projects, pending_claims),
    };

    info!(
        invoices = input.invoices.len(),
        expenses = input.expenses.len(),
        projects = input.projects.len(),
        "report computed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use solarbooks_core::{InstallationStatus, Money};

    #[test]
    fn test_report_from_records() {
        let json = r#"{
            "invoices": [
                { "total": "1180", "tax_amount": "180", "paid_amount": "1180", "balance": "0", "status": "paid" },
                { "total": "1435", "tax_amount": "210", "paid_amount": "435", "balance": "1000", "status": "partial" }
            ],
            "expenses": [
                { "total": "250", "category_name": "Travel" },
                { "total": "100" }
            ],
            "projects": [
                { "system_capacity_kw": "3", "estimated_cost": "180000", "subsidy_amount": "78000", "installation_status": "in_progress" }
            ],
            "subsidy_claims": [
                { "applied_amount": "78000", "status": "pending", "approved_amount": null,
                  "received_amount": null, "approval_date": null, "received_date": null },
                { "applied_amount": "60000", "status": "approved", "approved_amount": "60000",
                  "received_amount": null, "approval_date": "2024-03-05T10:00:00Z", "received_date": null }
            ]
        }"#;

        let report = execute(json).unwrap();

        assert_eq!(report.sales.total_sales, Money::from_major(2615));
        assert_eq!(report.sales.total_outstanding, Money::from_major(1000));
        assert_eq!(report.expenses.category_breakdown["Uncategorized"], Money::from_major(100));
        assert_eq!(report.dashboard.profit, Money::from_major(2265));
        assert_eq!(report.solar.total_projects, 1);
        assert_eq!(
            report.solar.projects_by_status[&InstallationStatus::InProgress],
            1
        );
        assert_eq!(report.solar.pending_subsidies_count, 1);
    }

    #[test]
    fn test_empty_input() {
        let report = execute("{}").unwrap();
        assert_eq!(report.sales.invoice_count, 0);
        assert_eq!(report.dashboard.total_outstanding, Money::ZERO);
    }

    #[test]
    fn test_malformed_record() {
        let err = execute(r#"{ "invoices": [{ "total": "abc" }] }"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
