//! # Solar Project Tracking
//!
//! Milestone progress, material consumption, government paperwork and the
//! lifecycle of a subsidy claim.
//!
//! ## Subsidy Claim Lifecycle
//! ```text
//!   pending ──► applied ──► approved ──► received
//!      │           │           │
//!      └───────────┴───────────┴──────► rejected
//! ```
//!
//! An update to `approved` that carries an amount records the approved
//! amount and timestamp; an update to `received` does the same for the
//! received amount. Any other update only moves the status.
//!
//! ## Government Documents
//! ```text
//!   pending ──► submitted ──► approved
//!                   │
//!                   └───────► rejected
//! ```
//! Any status may be set directly.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{round2, Money};
use crate::types::{DocumentStatus, DocumentType, MilestoneStatus, SubsidyStatus};
use crate::validation::{validate_non_negative, validate_positive, ValidationResult};

// =============================================================================
// Milestones
// =============================================================================

/// Percentage of milestones completed, rounded to 2 decimal places.
/// A project without milestones is at 0.
pub fn milestone_progress(milestones: &[MilestoneStatus]) -> Decimal {
    if milestones.is_empty() {
        return Decimal::ZERO;
    }

    let completed = milestones
        .iter()
        .filter(|status| **status == MilestoneStatus::Completed)
        .count();

    let ratio = Decimal::from(completed) / Decimal::from(milestones.len());
    round2(ratio * Decimal::ONE_HUNDRED)
}

/// A payment milestone of a solar project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Milestone {
    pub milestone_name: String,
    #[serde(default)]
    pub status: MilestoneStatus,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub amount: Money,
}

impl Milestone {
    pub fn new(milestone_name: impl Into<String>, amount: Money) -> Self {
        Milestone {
            milestone_name: milestone_name.into(),
            status: MilestoneStatus::Pending,
            due_date: None,
            completion_date: None,
            amount,
        }
    }

    /// Moves the milestone to `status`. Completing it stamps `at` as the
    /// completion date; any other status clears the date.
    pub fn update_status(&mut self, status: MilestoneStatus, at: DateTime<Utc>) {
        self.completion_date = match status {
            MilestoneStatus::Completed => Some(at),
            _ => None,
        };

        debug!(milestone = %self.milestone_name, from = ?self.status, to = ?status, "milestone updated");
        self.status = status;
    }
}

// =============================================================================
// Material Consumption
// =============================================================================

/// Books `quantity_used` of a product against a project and returns the
/// product's new stock level.
///
/// Stock may go negative; the shortfall is logged, not refused.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use solarbooks_core::solar::consume_material;
///
/// let left = consume_material(Decimal::from(40), Decimal::from(12)).unwrap();
/// assert_eq!(left, Decimal::from(28));
/// assert!(consume_material(Decimal::from(40), Decimal::ZERO).is_err());
/// ```
pub fn consume_material(stock: Decimal, quantity_used: Decimal) -> ValidationResult<Decimal> {
    if quantity_used <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity_used".to_string(),
        });
    }

    let remaining = stock
        .checked_sub(quantity_used)
        .ok_or_else(|| ValidationError::Overflow {
            field: "stock_quantity".to_string(),
        })?;

    if remaining < Decimal::ZERO {
        warn!(%stock, %quantity_used, %remaining, "material consumption exceeds recorded stock");
    } else {
        debug!(%stock, %quantity_used, %remaining, "material consumed");
    }

    Ok(remaining)
}

// =============================================================================
// Government Documents
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GovernmentDocument {
    pub document_type: DocumentType,
    pub document_name: String,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
}

impl GovernmentDocument {
    /// Registers a document that has not been filed yet.
    pub fn new(document_type: DocumentType, document_name: impl Into<String>) -> Self {
        GovernmentDocument {
            document_type,
            document_name: document_name.into(),
            document_number: None,
            status: DocumentStatus::Pending,
        }
    }

    pub fn update_status(&mut self, status: DocumentStatus) {
        debug!(document_type = ?self.document_type, from = ?self.status, to = ?status, "document updated");
        self.status = status;
    }
}

// =============================================================================
// Subsidy Claims
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubsidyClaim {
    pub applied_amount: Money,
    pub status: SubsidyStatus,
    pub approved_amount: Option<Money>,
    pub received_amount: Option<Money>,
    #[ts(as = "Option<String>")]
    pub approval_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub received_date: Option<DateTime<Utc>>,
}

impl SubsidyClaim {
    /// Opens a pending claim for `applied_amount`, which must be positive.
    pub fn new(applied_amount: Money) -> ValidationResult<Self> {
        validate_positive("applied_amount", applied_amount)?;

        Ok(Self {
            applied_amount,
            status: SubsidyStatus::Pending,
            approved_amount: None,
            received_amount: None,
            approval_date: None,
            received_date: None,
        })
    }

    pub fn update(
        &mut self,
        status: SubsidyStatus,
        amount: Option<Money>,
        at: DateTime<Utc>,
    ) -> ValidationResult<()> {
        if let Some(amount) = amount {
            validate_non_negative("amount", amount)?;
        }

        match (status, amount) {
            (SubsidyStatus::Approved, Some(amount)) => {
                self.approved_amount = Some(amount);
                self.approval_date = Some(at);
            }
            (SubsidyStatus::Received, Some(amount)) => {
                self.received_amount = Some(amount);
                self.received_date = Some(at);
            }
            _ => {}
        }

        debug!(from = ?self.status, to = ?status, "subsidy claim updated");
        self.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_milestone_progress() {
        use MilestoneStatus::*;

        assert_eq!(milestone_progress(&[]), Decimal::ZERO);
        assert_eq!(milestone_progress(&[Completed, Pending]), dec!(50));
        assert_eq!(milestone_progress(&[Completed, InProgress, Pending]), dec!(33.33));
        assert_eq!(milestone_progress(&[Completed, Completed, Pending]), dec!(66.67));
        assert_eq!(milestone_progress(&[Completed; 4]), dec!(100));
    }

    #[test]
    fn test_milestone_completion_date() {
        let mut milestone = Milestone::new("Panel installation", Money::from_major(50_000));
        assert_eq!(milestone.status, MilestoneStatus::Pending);

        milestone.update_status(MilestoneStatus::InProgress, at(1));
        assert_eq!(milestone.completion_date, None);

        milestone.update_status(MilestoneStatus::Completed, at(9));
        assert_eq!(milestone.status, MilestoneStatus::Completed);
        assert_eq!(milestone.completion_date, Some(at(9)));

        // Reopened work is no longer complete.
        milestone.update_status(MilestoneStatus::InProgress, at(12));
        assert_eq!(milestone.completion_date, None);
    }

    #[test]
    fn test_milestone_deserialization_defaults() {
        let milestone: Milestone =
            serde_json::from_str(r#"{ "milestone_name": "Net meter", "due_date": "2024-04-30" }"#)
                .unwrap();
        assert_eq!(milestone.status, MilestoneStatus::Pending);
        assert_eq!(milestone.amount, Money::ZERO);
        assert_eq!(milestone.due_date, NaiveDate::from_ymd_opt(2024, 4, 30));
    }

    #[test]
    fn test_consume_material() {
        assert_eq!(consume_material(dec!(40), dec!(12)).unwrap(), dec!(28));
        assert_eq!(consume_material(dec!(10.5), dec!(2.25)).unwrap(), dec!(8.25));
    }

    #[test]
    fn test_consume_material_may_overdraw_stock() {
        assert_eq!(consume_material(dec!(3), dec!(5)).unwrap(), dec!(-2));
    }

    #[test]
    fn test_consume_material_requires_positive_quantity() {
        for quantity in [dec!(0), dec!(-4)] {
            let err = consume_material(dec!(40), quantity).unwrap_err();
            assert_eq!(err.code(), "must_be_positive");
            assert!(err.to_string().contains("quantity_used"));
        }
    }

    #[test]
    fn test_consume_material_overflow() {
        let err = consume_material(Decimal::MIN, dec!(1)).unwrap_err();
        assert_eq!(err.code(), "overflow");
    }

    #[test]
    fn test_document_lifecycle() {
        let mut document =
            GovernmentDocument::new(DocumentType::NetMetering, "Net metering agreement");
        assert_eq!(document.status, DocumentStatus::Pending);

        document.update_status(DocumentStatus::Submitted);
        document.update_status(DocumentStatus::Approved);
        assert_eq!(document.status, DocumentStatus::Approved);
        assert_eq!(document.document_type, DocumentType::NetMetering);
    }

    #[test]
    fn test_document_from_json() {
        let document: GovernmentDocument = serde_json::from_str(
            r#"{ "document_type": "completion_certificate", "document_name": "CEIG certificate" }"#,
        )
        .unwrap();
        assert_eq!(document.document_type, DocumentType::CompletionCertificate);
        assert_eq!(document.status, DocumentStatus::Pending);

        let unknown = serde_json::from_str::<GovernmentDocument>(
            r#"{ "document_type": "completion_certificate", "document_name": "x", "status": "lost" }"#,
        );
        assert!(unknown.is_err());
    }

    #[test]
    fn test_new_claim_is_pending() {
        let claim = SubsidyClaim::new(Money::from_major(78_000)).unwrap();
        assert_eq!(claim.status, SubsidyStatus::Pending);
        assert_eq!(claim.approved_amount, None);
        assert_eq!(claim.received_amount, None);
    }

    #[test]
    fn test_new_claim_requires_positive_amount() {
        let err = SubsidyClaim::new(Money::ZERO).unwrap_err();
        assert_eq!(err.code(), "must_be_positive");
    }

    #[test]
    fn test_approval_then_receipt() {
        let mut claim = SubsidyClaim::new(Money::from_major(78_000)).unwrap();

        claim.update(SubsidyStatus::Applied, None, at(1)).unwrap();
        assert_eq!(claim.status, SubsidyStatus::Applied);
        assert_eq!(claim.approval_date, None);

        claim
            .update(SubsidyStatus::Approved, Some(Money::from_major(70_000)), at(5))
            .unwrap();
        assert_eq!(claim.approved_amount, Some(Money::from_major(70_000)));
        assert_eq!(claim.approval_date, Some(at(5)));

        claim
            .update(SubsidyStatus::Received, Some(Money::from_major(30_000)), at(20))
            .unwrap();
        assert_eq!(claim.status, SubsidyStatus::Received);
        assert_eq!(claim.received_date, Some(at(20)));
        assert_eq!(claim.received_amount, Some(Money::from_major(30_000)));
        assert_eq!(claim.approved_amount, Some(Money::from_major(70_000)));
    }

    #[test]
    fn test_amount_ignored_for_other_statuses() {
        let mut claim = SubsidyClaim::new(Money::from_major(60_000)).unwrap();
        claim
            .update(SubsidyStatus::Rejected, Some(Money::from_major(10)), at(2))
            .unwrap();
        assert_eq!(claim.status, SubsidyStatus::Rejected);
        assert_eq!(claim.approved_amount, None);
        assert_eq!(claim.received_amount, None);
    }

    #[test]
    fn test_negative_update_amount_rejected() {
        let mut claim = SubsidyClaim::new(Money::from_major(60_000)).unwrap();
        let err = claim
            .update(SubsidyStatus::Approved, Some(Money::from_major(-1)), at(2))
            .unwrap_err();
        assert_eq!(err.code(), "must_not_be_negative");
        assert_eq!(claim.status, SubsidyStatus::Pending);
    }
}
