//! Exchange rate types.

use remit_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rate of one currency against the reference currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// The currency this rate prices.
    pub currency: Currency,
    /// Value of one unit of `currency` in the reference currency.
    pub rate_to_reference: Decimal,
    /// Bumped by the ingestion process on every write.
    #[serde(default)]
    pub version: u64,
}

impl ExchangeRate {
    /// Creates a new exchange rate at version 0.
    #[must_use]
    pub const fn new(currency: Currency, rate_to_reference: Decimal) -> Self {
        Self {
            currency,
            rate_to_reference,
            version: 0,
        }
    }

    /// Returns true if the rate can be used for conversion.
    ///
    /// Zero and negative entries mark an unset or corrupted row.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.rate_to_reference > Decimal::ZERO
    }
}
