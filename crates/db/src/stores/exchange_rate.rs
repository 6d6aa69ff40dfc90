//! In-memory exchange rate store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use remit_core::{ExchangeRate, ExchangeRateStore, StoreError};
use remit_shared::types::Currency;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

/// Rates against the reference currency, keyed by currency.
///
/// Values are stored as given. Zero or negative rates are kept so that the
/// converter can reject them at read time.
#[derive(Debug, Clone, Default)]
pub struct MemoryExchangeRateStore {
    rates: Arc<RwLock<BTreeMap<Currency, ExchangeRate>>>,
}

impl MemoryExchangeRateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given rates. Later duplicates win.
    #[must_use]
    pub fn from_rates(rates: impl IntoIterator<Item = ExchangeRate>) -> Self {
        let rates = rates
            .into_iter()
            .map(|rate| (rate.currency, rate))
            .collect();
        Self {
            rates: Arc::new(RwLock::new(rates)),
        }
    }

    /// Records a new rate for `currency`, bumping its version.
    ///
    /// Called by the rate ingestion process. Returns the stored entry.
    pub async fn upsert(&self, currency: Currency, rate_to_reference: Decimal) -> ExchangeRate {
        let mut rates = self.rates.write().await;
        let version = rates.get(&currency).map_or(0, |existing| existing.version + 1);
        let entry = ExchangeRate {
            currency,
            rate_to_reference,
            version,
        };
        rates.insert(currency, entry.clone());
        tracing::debug!(%currency, %rate_to_reference, version, "exchange rate updated");
        entry
    }

    /// Returns every stored rate ordered by currency.
    pub async fn snapshot(&self) -> Vec<ExchangeRate> {
        self.rates.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl ExchangeRateStore for MemoryExchangeRateStore {
    async fn get(&self, currency: Currency) -> Result<Option<ExchangeRate>, StoreError> {
        Ok(self.rates.read().await.get(&currency).cloned())
    }
}
