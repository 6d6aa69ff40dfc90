//! Currency codes supported by the system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 currency codes an account can be denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    Eur,
    /// Pound Sterling
    Gbp,
    /// US Dollar
    Usd,
    /// Canadian Dollar
    Cad,
    /// Australian Dollar
    Aud,
    /// Chinese Yuan
    Cny,
    /// Japanese Yen
    Jpy,
    /// Polish Zloty
    Pln,
}

/// Error returned when parsing a code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

impl Currency {
    /// Currency every exchange rate is expressed against.
    pub const REFERENCE: Self = Self::Usd;

    /// Every supported currency.
    pub const ALL: [Self; 8] = [
        Self::Eur,
        Self::Gbp,
        Self::Usd,
        Self::Cad,
        Self::Aud,
        Self::Cny,
        Self::Jpy,
        Self::Pln,
    ];

    /// Returns the three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Usd => "USD",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Cny => "CNY",
            Self::Jpy => "JPY",
            Self::Pln => "PLN",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_reference_currency_is_usd() {
        assert_eq!(Currency::REFERENCE, Currency::Usd);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(Currency::Jpy.to_string(), "JPY");
        assert_eq!(Currency::Pln.to_string(), "PLN");
    }

    #[test]
    fn test_currency_from_str() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_str(currency.code()).unwrap(), currency);
        }
        assert_eq!(Currency::from_str("gbp").unwrap(), Currency::Gbp);

        assert_eq!(
            Currency::from_str("XXX").unwrap_err(),
            UnknownCurrency("XXX".to_string())
        );
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_currency_serde_uses_iso_code() {
        assert_eq!(serde_json::to_string(&Currency::Cny).unwrap(), "\"CNY\"");
        let parsed: Currency = serde_json::from_str("\"AUD\"").unwrap();
        assert_eq!(parsed, Currency::Aud);
    }
}
