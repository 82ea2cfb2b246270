//! Subsidy command: `solarbooks subsidy 2.5` prints the quote for a
//! 2.5 kW system under the configured schedule.

use rust_decimal::Decimal;
use solarbooks_core::{SubsidyQuote, SubsidySchedule};

use crate::error::ApiError;

pub fn execute(capacity_kw: Decimal, schedule: &SubsidySchedule) -> Result<SubsidyQuote, ApiError> {
    Ok(schedule.quote(capacity_kw)?)
}
