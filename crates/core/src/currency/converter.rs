//! Cross-rate resolution and amount conversion.

use std::sync::Arc;
use std::time::Duration;

use remit_shared::config::ConversionConfig;
use remit_shared::types::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ConversionError;
use crate::store::ExchangeRateStore;

/// Significant digits kept in a cross rate unless configured otherwise.
pub const DEFAULT_CROSS_RATE_PRECISION: u32 = 10;

/// Bound on a single rate lookup unless configured otherwise.
const DEFAULT_RATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Divides two reference rates and rounds the quotient half-up to
/// `precision` significant digits.
///
/// Returns `None` if the division overflows or `to_rate` is zero.
///
/// # Example
///
/// ```
/// use remit_core::currency::cross_rate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(cross_rate(dec!(1.02), dec!(0.0073), 10), Some(dec!(139.7260274)));
/// ```
#[must_use]
pub fn cross_rate(from_rate: Decimal, to_rate: Decimal, precision: u32) -> Option<Decimal> {
    from_rate
        .checked_div(to_rate)?
        .round_sf_with_strategy(precision.max(1), RoundingStrategy::MidpointAwayFromZero)
}

/// Resolves conversion factors from an [`ExchangeRateStore`].
///
/// Results are never rounded to money scale here. Callers decide how the
/// converted amount is rounded.
pub struct CurrencyConverter<R> {
    rates: Arc<R>,
    precision: u32,
    timeout: Duration,
}

impl<R> Clone for CurrencyConverter<R> {
    fn clone(&self) -> Self {
        Self {
            rates: Arc::clone(&self.rates),
            precision: self.precision,
            timeout: self.timeout,
        }
    }
}

impl<R: ExchangeRateStore> CurrencyConverter<R> {
    /// Creates a converter with default precision and timeout.
    #[must_use]
    pub const fn new(rates: Arc<R>) -> Self {
        Self {
            rates,
            precision: DEFAULT_CROSS_RATE_PRECISION,
            timeout: DEFAULT_RATE_TIMEOUT,
        }
    }

    /// Creates a converter from application configuration.
    #[must_use]
    pub const fn from_config(rates: Arc<R>, config: &ConversionConfig) -> Self {
        Self {
            rates,
            precision: config.cross_rate_precision,
            timeout: config.rate_timeout(),
        }
    }

    /// Sets the number of significant digits kept in a cross rate.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the bound on a single rate lookup.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured cross-rate precision.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Returns the factor `f` such that `amount_in_to = amount_in_from * f`.
    ///
    /// Same-currency pairs return exactly one without touching the store.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::CurrencyNotFound`] if either rate is missing
    /// - [`ConversionError::InvalidExchangeRate`] if either rate is not positive
    /// - [`ConversionError::Timeout`] if a lookup exceeds the configured bound
    pub async fn get_rate(&self, from: Currency, to: Currency) -> Result<Decimal, ConversionError> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        let from_rate = self.rate_to_reference(from).await?;
        let to_rate = self.rate_to_reference(to).await?;

        let factor = cross_rate(from_rate, to_rate, self.precision)
            .ok_or(ConversionError::Overflow { from, to })?;

        tracing::debug!(%from, %to, %from_rate, %to_rate, %factor, "resolved cross rate");
        Ok(factor)
    }

    /// Converts `amount` from one currency to another without rounding.
    ///
    /// # Errors
    ///
    /// Same as [`CurrencyConverter::get_rate`], plus
    /// [`ConversionError::Overflow`] if the product does not fit.
    pub async fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> Result<Decimal, ConversionError> {
        let factor = self.get_rate(from, to).await?;
        amount
            .checked_mul(factor)
            .ok_or(ConversionError::Overflow { from, to })
    }

    async fn rate_to_reference(&self, currency: Currency) -> Result<Decimal, ConversionError> {
        let stored = tokio::time::timeout(self.timeout, self.rates.get(currency))
            .await
            .map_err(|_| ConversionError::Timeout {
                currency,
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })??
            .ok_or(ConversionError::CurrencyNotFound(currency))?;

        if !stored.is_usable() {
            return Err(ConversionError::InvalidExchangeRate {
                currency,
                rate: stored.rate_to_reference,
            });
        }

        Ok(stored.rate_to_reference)
    }
}
