//! Money type with a fixed scale of two fractional digits.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and only ever holds values at
//! scale 2. Rounding is explicit at every entry point:
//! - values supplied from outside round half-up
//! - values produced by a currency conversion round down (floor), so the
//!   bank never credits more than the exact converted value

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of fractional digits carried by every stored or reported amount.
pub const MONEY_SCALE: u32 = 2;

/// A monetary amount held at exactly [`MONEY_SCALE`] fractional digits.
///
/// Equality and ordering are scale-insensitive, inherited from `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Zero at the canonical scale (`0.00`).
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, MONEY_SCALE));

    /// Creates an amount from any decimal, rounding half-up to the money scale.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(to_scale(value, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Creates an amount from a count of minor units (cents).
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, MONEY_SCALE))
    }

    /// Scales a conversion result for crediting, always rounding down.
    #[must_use]
    pub fn floor(value: Decimal) -> Self {
        Self(to_scale(value, RoundingStrategy::ToNegativeInfinity))
    }

    /// Returns the underlying decimal (scale 2).
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self::new)
    }

    /// Subtracts `other` from `self`, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self::new)
    }
}

fn to_scale(value: Decimal, strategy: RoundingStrategy) -> Decimal {
    let mut scaled = value.round_dp_with_strategy(MONEY_SCALE, strategy);
    scaled.rescale(MONEY_SCALE);
    scaled
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self::new)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self::new)
    }
}
