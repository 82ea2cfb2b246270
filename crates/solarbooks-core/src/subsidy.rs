//! # Solar Subsidy Calculator
//!
//! Tiered rooftop-solar incentive keyed on declared system capacity.
//!
//! ## Default Schedule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  capacity_kw            subsidy                                         │
//! │  ───────────────────    ─────────────────────────────────────────────   │
//! │  ≤ 0                    ValidationError (capacity_must_be_positive)     │
//! │  0 < c ≤ 2              c × 30 000                                      │
//! │  2 < c ≤ 3              60 000 + (c − 2) × 18 000                       │
//! │  c > 3                  78 000 (flat)                                   │
//! │                                                                         │
//! │  Exact boundaries (2, 3) belong to the LOWER tier.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The computed amount is a suggestion: the project form pre-fills it and the
//! user may overwrite it before the project is saved.
//!
//! ## Example
//! ```rust
//! use rust_decimal::Decimal;
//! use solarbooks_core::subsidy::SubsidySchedule;
//!
//! let schedule = SubsidySchedule::default();
//! let subsidy = schedule.subsidy_for(Decimal::new(25, 1)).unwrap(); // 2.5 kW
//! assert_eq!(subsidy.to_string(), "69000.00");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{round2, Money};
use crate::validation::ValidationResult;

// =============================================================================
// Default Constants
// =============================================================================

/// Upper bound (inclusive) of the first tier, in kW.
pub const DEFAULT_TIER_1_LIMIT_KW: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Upper bound (inclusive) of the second tier, in kW.
pub const DEFAULT_TIER_2_LIMIT_KW: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Per-kW rate of the first tier.
pub const DEFAULT_RATE_TIER_1: Money = Money::new(Decimal::from_parts(30_000, 0, 0, false, 0));

/// Subsidy earned by a full first tier.
pub const DEFAULT_TIER_1_CAP: Money = Money::new(Decimal::from_parts(60_000, 0, 0, false, 0));

/// Per-kW rate of the second tier.
pub const DEFAULT_RATE_TIER_2: Money = Money::new(Decimal::from_parts(18_000, 0, 0, false, 0));

/// Flat subsidy above the second tier.
pub const DEFAULT_MAX_SUBSIDY: Money = Money::new(Decimal::from_parts(78_000, 0, 0, false, 0));

// =============================================================================
// Schedule
// =============================================================================

/// Which branch of the schedule a capacity falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubsidyTier {
    /// `capacity × rate_tier_1`
    PerKw,
    /// `tier_1_cap + (capacity − tier_1_limit) × rate_tier_2`
    Incremental,
    /// `max_subsidy`
    Flat,
}

/// Tiered incentive schedule. Every figure is configurable because the
/// scheme's rates change with government policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsidySchedule {
    pub tier_1_limit_kw: Decimal,
    pub rate_tier_1: Money,
    pub tier_1_cap: Money,
    pub tier_2_limit_kw: Decimal,
    pub rate_tier_2: Money,
    pub max_subsidy: Money,
}

impl Default for SubsidySchedule {
    fn default() -> Self {
        SubsidySchedule {
            tier_1_limit_kw: DEFAULT_TIER_1_LIMIT_KW,
            rate_tier_1: DEFAULT_RATE_TIER_1,
            tier_1_cap: DEFAULT_TIER_1_CAP,
            tier_2_limit_kw: DEFAULT_TIER_2_LIMIT_KW,
            rate_tier_2: DEFAULT_RATE_TIER_2,
            max_subsidy: DEFAULT_MAX_SUBSIDY,
        }
    }
}

/// A computed subsidy together with the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubsidyQuote {
    #[ts(type = "string")]
    pub capacity_kw: Decimal,
    pub tier: SubsidyTier,
    pub subsidy_amount: Money,
}

impl SubsidySchedule {
    /// Checks that the schedule is non-negative and non-decreasing in
    /// capacity.
    ///
    /// ## Rules
    /// - all rates and amounts ≥ 0
    /// - `0 < tier_1_limit_kw ≤ tier_2_limit_kw`
    /// - `tier_1_cap ≥ rate_tier_1 × tier_1_limit_kw` (no drop entering tier 2)
    /// - `max_subsidy ≥ tier_1_cap + rate_tier_2 × (tier_2_limit_kw − tier_1_limit_kw)`
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidSchedule {
            reason: reason.to_string(),
        };

        for (name, value) in [
            ("rate_tier_1", self.rate_tier_1),
            ("tier_1_cap", self.tier_1_cap),
            ("rate_tier_2", self.rate_tier_2),
            ("max_subsidy", self.max_subsidy),
        ] {
            if value.is_negative() {
                return Err(invalid(&format!("{name} must not be negative")));
            }
        }

        if self.tier_1_limit_kw <= Decimal::ZERO {
            return Err(invalid("tier_1_limit_kw must be positive"));
        }
        if self.tier_2_limit_kw < self.tier_1_limit_kw {
            return Err(invalid("tier_2_limit_kw must not be below tier_1_limit_kw"));
        }

        let tier_1_ceiling = self
            .rate_tier_1
            .amount()
            .checked_mul(self.tier_1_limit_kw)
            .ok_or_else(|| invalid("rate_tier_1 × tier_1_limit_kw overflows"))?;
        if self.tier_1_cap.amount() < tier_1_ceiling {
            return Err(invalid("tier_1_cap is below rate_tier_1 × tier_1_limit_kw"));
        }

        let tier_2_ceiling = (self.tier_2_limit_kw - self.tier_1_limit_kw)
            .checked_mul(self.rate_tier_2.amount())
            .and_then(|span| span.checked_add(self.tier_1_cap.amount()))
            .ok_or_else(|| invalid("tier 2 ceiling overflows"))?;
        if self.max_subsidy.amount() < tier_2_ceiling {
            return Err(invalid("max_subsidy is below the tier 2 ceiling"));
        }

        Ok(())
    }

    /// Picks the tier for a positive capacity. Boundaries belong to the
    /// lower tier.
    pub fn tier_for(&self, capacity_kw: Decimal) -> SubsidyTier {
        if capacity_kw <= self.tier_1_limit_kw {
            SubsidyTier::PerKw
        } else if capacity_kw <= self.tier_2_limit_kw {
            SubsidyTier::Incremental
        } else {
            SubsidyTier::Flat
        }
    }

    /// Computes the subsidy and reports which tier applied.
    pub fn quote(&self, capacity_kw: Decimal) -> ValidationResult<SubsidyQuote> {
        if capacity_kw <= Decimal::ZERO {
            return Err(ValidationError::CapacityMustBePositive { capacity_kw });
        }

        let tier = self.tier_for(capacity_kw);
        let raw = match tier {
            SubsidyTier::PerKw => capacity_kw.checked_mul(self.rate_tier_1.amount()),
            SubsidyTier::Incremental => (capacity_kw - self.tier_1_limit_kw)
                .checked_mul(self.rate_tier_2.amount())
                .and_then(|extra| extra.checked_add(self.tier_1_cap.amount())),
            SubsidyTier::Flat => Some(self.max_subsidy.amount()),
        }
        .ok_or_else(|| ValidationError::Overflow {
            field: "subsidy_amount".to_string(),
        })?;

        let subsidy_amount = Money::new(round2(raw));
        debug!(%capacity_kw, ?tier, %subsidy_amount, "subsidy computed");

        Ok(SubsidyQuote {
            capacity_kw,
            tier,
            subsidy_amount,
        })
    }

    /// Computes the subsidy for a declared capacity.
    pub fn subsidy_for(&self, capacity_kw: Decimal) -> ValidationResult<Money> {
        self.quote(capacity_kw).map(|quote| quote.subsidy_amount)
    }
}

/// Computes the subsidy for `capacity_kw` under `schedule`.
pub fn compute_subsidy(capacity_kw: Decimal, schedule: &SubsidySchedule) -> ValidationResult<Money> {
    schedule.subsidy_for(capacity_kw)
}

// =============================================================================
// Unit Tests
// =============================================================================
