//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Invoices multiply prices by FRACTIONAL quantities (2.5 kW, 1.75 m),   │
//! │  so integer cents alone are not enough.                                 │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal + explicit minor-unit rounding          │
//! │    2.5 × 333.33 = 833.325 exactly → round2 → 833.33                    │
//! │    Rounding happens where the business rule says, nowhere else         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use solarbooks_core::money::Money;
//!
//! // Create from minor units (paise/cents)
//! let price = Money::from_minor(1099); // 10.99
//!
//! let total = price + Money::from_minor(500); // 15.99
//! assert_eq!(total.to_string(), "15.99");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Number of decimal places of the currency's minor unit.
pub const MINOR_UNIT_DECIMALS: u32 = 2;

/// Rounds to minor-unit precision, half away from zero. The result always
/// carries exactly two decimal places (`69000` becomes `69000.00`).
///
/// ## Example
/// ```rust
/// use solarbooks_core::money::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round2(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round2(Decimal::from_str("-2.345").unwrap()).to_string(), "-2.35");
/// ```
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MINOR_UNIT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MINOR_UNIT_DECIMALS);
    rounded
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in currency units (rupees, dollars) with exact decimal
/// arithmetic.
///
/// ## Design Decisions
/// - **Signed**: invoice totals may go negative under the `allow` policy
/// - **Unrounded until asked**: `Money` keeps whatever precision it was given;
///   `rounded()` applies the minor-unit rule
/// - **Serde transparent**: crosses JSON as the bare decimal
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Zero money value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a decimal amount expressed in currency units.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from minor units (paise/cents).
    ///
    /// ## Example
    /// ```rust
    /// use solarbooks_core::money::Money;
    ///
    /// let price = Money::from_minor(118_000);
    /// assert_eq!(price.to_string(), "1180.00");
    /// ```
    #[inline]
    pub fn from_minor(minor: i64) -> Self {
        Money(Decimal::new(minor, MINOR_UNIT_DECIMALS))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// True when the value has no digits below the minor unit.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use solarbooks_core::money::Money;
    ///
    /// assert!(Money::new(dec!(0.1)).is_minor_units());
    /// assert!(!Money::new(dec!(0.005)).is_minor_units());
    /// ```
    #[inline]
    pub fn is_minor_units(&self) -> bool {
        round2(self.0) == self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to minor-unit precision (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use solarbooks_core::money::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let raw = Money::new(Decimal::from_str("833.325").unwrap());
    /// assert_eq!(raw.rounded(), Money::from_minor(83_333));
    /// ```
    #[inline]
    pub fn rounded(&self) -> Self {
        Money(round2(self.0))
    }

    /// Unrounded tax fraction of this amount at the given rate.
    ///
    /// Returns `None` when the multiplication overflows. Callers sum these
    /// fractions and round once at the aggregate level.
    ///
    /// ## Example
    /// ```rust
    /// use solarbooks_core::money::Money;
    /// use solarbooks_core::types::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Money::from_major(1000);
    /// let tax = amount.tax_fraction(TaxRate::from_percent(Decimal::from(18))).unwrap();
    /// assert_eq!(tax, Decimal::from(180));
    /// ```
    pub fn tax_fraction(&self, rate: TaxRate) -> Option<Decimal> {
        rate.fraction_of(self.0)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount at minor-unit precision without a currency symbol.
///
/// ## Note
/// Currency symbols and grouping are the frontend's job (₹1,180.00).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", round2(self.0))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
