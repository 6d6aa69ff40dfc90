//! JSON ledger snapshots.
//!
//! A snapshot is the full committed state of both stores:
//!
//! ```json
//! {
//!   "accounts": [{ "id": 123, "currency": "GBP", "balance": "47.21", "version": 0 }],
//!   "rates": [{ "currency": "GBP", "rate_to_reference": "1.02", "version": 0 }]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use remit_core::{Account, ExchangeRate};
use remit_shared::types::{AccountId, Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stores::{MemoryAccountStore, MemoryExchangeRateStore};

/// Errors raised while loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The file could not be read or written.
    #[error("Cannot access snapshot {}: {source}", .path.display())]
    Io {
        /// The snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid snapshot.
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Two accounts share an ID.
    #[error("Duplicate account {0} in snapshot")]
    DuplicateAccount(AccountId),

    /// Two rates share a currency.
    #[error("Duplicate exchange rate for {0} in snapshot")]
    DuplicateRate(Currency),
}

/// Committed state of the account and exchange rate stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Accounts ordered by id.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Rates against the reference currency.
    #[serde(default)]
    pub rates: Vec<ExchangeRate>,
}

impl LedgerSnapshot {
    /// Reads a snapshot from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot: Self = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            accounts = snapshot.accounts.len(),
            rates = snapshot.rates.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty-printed JSON, replacing the file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Captures the committed state of both stores.
    pub async fn capture(accounts: &MemoryAccountStore, rates: &MemoryExchangeRateStore) -> Self {
        Self {
            accounts: accounts.snapshot().await,
            rates: rates.snapshot().await,
        }
    }

    /// Builds stores holding this snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if an account ID or a rate currency appears twice.
    pub fn into_stores(self) -> Result<(MemoryAccountStore, MemoryExchangeRateStore), SnapshotError> {
        let mut ids = HashSet::new();
        if let Some(dup) = self.accounts.iter().find(|a| !ids.insert(a.id)) {
            return Err(SnapshotError::DuplicateAccount(dup.id));
        }
        let mut currencies = HashSet::new();
        if let Some(dup) = self.rates.iter().find(|r| !currencies.insert(r.currency)) {
            return Err(SnapshotError::DuplicateRate(dup.currency));
        }

        Ok((
            MemoryAccountStore::from_accounts(self.accounts),
            MemoryExchangeRateStore::from_rates(self.rates),
        ))
    }
}
