//! Currency conversion errors.

use remit_shared::types::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while resolving a conversion factor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No rate is stored for the currency.
    #[error("No exchange rate to {reference} registered for the currency {0}", reference = Currency::REFERENCE)]
    CurrencyNotFound(Currency),

    /// A stored rate is zero or negative. Signals corrupted upstream data.
    #[error("Invalid exchange rate to {reference} for the currency {currency}: {rate}", reference = Currency::REFERENCE)]
    InvalidExchangeRate {
        /// The currency whose rate is invalid.
        currency: Currency,
        /// The stored value.
        rate: Decimal,
    },

    /// The factor or the converted amount does not fit in a decimal.
    #[error("Conversion from {from} to {to} is out of range")]
    Overflow {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
    },

    /// The rate lookup did not answer in time.
    #[error("Exchange rate lookup for {currency} timed out after {timeout_ms} ms")]
    Timeout {
        /// The currency being looked up.
        currency: Currency,
        /// The configured bound.
        timeout_ms: u64,
    },

    /// The rate store failed.
    #[error("Exchange rate store error: {0}")]
    Store(#[from] StoreError),
}

impl ConversionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CurrencyNotFound(_) => "CURRENCY_NOT_FOUND",
            Self::InvalidExchangeRate { .. } => "INVALID_EXCHANGE_RATE",
            Self::Overflow { .. } => "CONVERSION_OVERFLOW",
            Self::Timeout { .. } => "RATE_LOOKUP_TIMEOUT",
            Self::Store(_) => "RATE_STORE_ERROR",
        }
    }

    /// Returns true if a later attempt may succeed without a data fix.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Store(_))
    }
}
