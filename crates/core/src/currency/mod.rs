//! Multi-currency handling and exchange rates.
//!
//! Every stored rate is expressed against [`Currency::REFERENCE`]. The factor
//! between two arbitrary currencies is derived by dividing their reference
//! rates, so N currencies need only N stored rates.
//!
//! [`Currency::REFERENCE`]: remit_shared::types::Currency::REFERENCE

pub mod converter;
pub mod error;
pub mod exchange;

#[cfg(test)]
mod props;

pub use converter::{CurrencyConverter, DEFAULT_CROSS_RATE_PRECISION, cross_rate};
pub use error::ConversionError;
pub use exchange::ExchangeRate;
