//! Persistence ports for accounts and exchange rates.
//!
//! The engine only talks to storage through these traits. Adapters live in
//! `remit-db`.
//!
//! ```text
//! AccountStore::begin() ──► AccountTransaction
//!                             ├─ get(id)        -> Option<Account> (with version)
//!                             ├─ update(account) -> Account (version + 1, staged)
//!                             ├─ commit()       -> all staged writes or none
//!                             └─ rollback()     -> discard staged writes
//! ```

mod error;

use async_trait::async_trait;
use remit_shared::types::{AccountId, Currency, PageRequest, PageResponse};

use crate::account::Account;
use crate::currency::ExchangeRate;

pub use error::StoreError;

/// Durable mapping from account id to account state.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Unit of work returned by [`AccountStore::begin`].
    type Transaction: AccountTransaction;

    /// Opens a transaction. Nothing written through it is visible to other
    /// readers until it commits.
    async fn begin(&self) -> Result<Self::Transaction, StoreError>;

    /// Reads the committed state of one account.
    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Lists committed accounts ordered by id.
    async fn list(&self, page: PageRequest) -> Result<PageResponse<Account>, StoreError>;
}

/// A transaction over the account store with optimistic concurrency.
#[async_trait]
pub trait AccountTransaction: Send {
    /// Reads an account, including writes already staged in this transaction.
    async fn get(&mut self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Stages a write. `account.version` must equal the version currently
    /// stored, otherwise the write fails with
    /// [`StoreError::ConcurrentModification`]. Returns the staged account
    /// carrying its new version.
    async fn update(&mut self, account: &Account) -> Result<Account, StoreError>;

    /// Applies every staged write atomically.
    async fn commit(self) -> Result<(), StoreError>;

    /// Discards every staged write.
    async fn rollback(self) -> Result<(), StoreError>;
}

/// Mapping from currency to its rate against the reference currency.
#[async_trait]
pub trait ExchangeRateStore: Send + Sync {
    /// Returns the stored rate for `currency`, if any. The rate is returned
    /// as stored, including non-positive (poisoned) values.
    async fn get(&self, currency: Currency) -> Result<Option<ExchangeRate>, StoreError>;
}
