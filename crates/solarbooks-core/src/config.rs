//! # Policy Configuration
//!
//! The business rules a deployment may tune. Every field has a default so a
//! partial document (or none at all) yields a working policy.
//!
//! ```toml
//! [invoice]
//! negative_total = "clamp_to_zero"
//!
//! [subsidy]
//! rate_tier_1 = "32000"
//! max_subsidy = "82000"
//! ```
//!
//! Loading from files and the environment happens in the application; this
//! module only defines the shape and its checks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreResult;
use crate::invoice::InvoicePolicy;
use crate::subsidy::SubsidySchedule;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub invoice: InvoicePolicy,
    pub subsidy: SubsidySchedule,
}

impl PolicyConfig {
    /// Fails with `CoreError::InvalidSchedule` if the subsidy schedule is
    /// not monotonic.
    pub fn validate(&self) -> CoreResult<()> {
        self.subsidy.validate()?;
        debug!(
            negative_total = ?self.invoice.negative_total,
            max_subsidy = %self.subsidy.max_subsidy,
            "policy configuration validated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::invoice::NegativeTotalPolicy;
    use crate::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy_is_valid() {
        let config = PolicyConfig::default();
        assert_eq!(config.invoice.negative_total, NegativeTotalPolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: PolicyConfig = serde_json::from_str(
            r#"{ "invoice": { "negative_total": "allow" }, "subsidy": { "rate_tier_1": "32000" } }"#,
        )
        .unwrap();

        assert_eq!(config.invoice.negative_total, NegativeTotalPolicy::Allow);
        assert_eq!(config.subsidy.rate_tier_1, Money::from_major(32_000));
        assert_eq!(config.subsidy.tier_2_limit_kw, dec!(3));
        assert_eq!(config.subsidy.max_subsidy, Money::from_major(78_000));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: PolicyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PolicyConfig::default());
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let mut config = PolicyConfig::default();
        config.subsidy.max_subsidy = Money::from_major(1_000);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSchedule { .. }));
    }
}
