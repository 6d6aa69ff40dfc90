//! In-process store doubles for unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use remit_shared::types::{AccountId, Currency, PageRequest, PageResponse};
use rust_decimal::Decimal;

use crate::account::Account;
use crate::currency::ExchangeRate;
use crate::store::{AccountStore, AccountTransaction, ExchangeRateStore, StoreError};

#[derive(Debug, Default)]
struct State {
    accounts: BTreeMap<AccountId, Account>,
    writes: usize,
    commits: usize,
    rollbacks: usize,
    fail_update_for: Option<AccountId>,
    interleave: Option<(AccountId, AccountId)>,
}

/// Account store that records every commit and rollback.
#[derive(Debug, Default, Clone)]
pub struct RecordingAccountStore {
    state: Arc<Mutex<State>>,
}

impl RecordingAccountStore {
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            for account in accounts {
                state.accounts.insert(account.id, account);
            }
        }
        store
    }

    /// Makes every staged write to `id` fail with a backend error.
    pub fn fail_updates_for(&self, id: AccountId) {
        self.state.lock().unwrap().fail_update_for = Some(id);
    }

    /// After a write to `on` is staged, another writer commits to `target`.
    pub fn interleave_write(&self, on: AccountId, target: AccountId) {
        self.state.lock().unwrap().interleave = Some((on, target));
    }

    /// Overwrites committed state directly, bumping the version.
    pub fn bump(&self, id: AccountId) {
        let mut state = self.state.lock().unwrap();
        if let Some(account) = state.accounts.get_mut(&id) {
            account.version += 1;
        }
    }

    pub fn account(&self, id: AccountId) -> Account {
        self.state.lock().unwrap().accounts[&id].clone()
    }

    /// Number of account writes that reached committed state.
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn commits(&self) -> usize {
        self.state.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.state.lock().unwrap().rollbacks
    }
}

#[async_trait]
impl AccountStore for RecordingAccountStore {
    type Transaction = RecordingTransaction;

    async fn begin(&self) -> Result<Self::Transaction, StoreError> {
        Ok(RecordingTransaction {
            state: Arc::clone(&self.state),
            staged: BTreeMap::new(),
        })
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.state.lock().unwrap().accounts.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<PageResponse<Account>, StoreError> {
        let state = self.state.lock().unwrap();
        let data = state
            .accounts
            .values()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect();
        Ok(PageResponse::new(data, page, state.accounts.len() as u64))
    }
}

/// Transaction over [`RecordingAccountStore`].
pub struct RecordingTransaction {
    state: Arc<Mutex<State>>,
    staged: BTreeMap<AccountId, (u64, Account)>,
}

#[async_trait]
impl AccountTransaction for RecordingTransaction {
    async fn get(&mut self, id: AccountId) -> Result<Option<Account>, StoreError> {
        if let Some((_, account)) = self.staged.get(&id) {
            return Ok(Some(account.clone()));
        }
        Ok(self.state.lock().unwrap().accounts.get(&id).cloned())
    }

    async fn update(&mut self, account: &Account) -> Result<Account, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_update_for == Some(account.id) {
            return Err(StoreError::backend("injected update failure"));
        }
        let (read_version, current) = match self.staged.get(&account.id) {
            Some((read_version, staged)) => (*read_version, staged.version),
            None => {
                let stored = state
                    .accounts
                    .get(&account.id)
                    .ok_or(StoreError::AccountNotFound(account.id))?;
                (stored.version, stored.version)
            }
        };
        if current != account.version {
            return Err(StoreError::conflict(account.id, account.version, current));
        }
        if let Some((on, target)) = state.interleave
            && on == account.id
            && let Some(other) = state.accounts.get_mut(&target)
        {
            other.version += 1;
        }
        drop(state);

        let staged = Account {
            version: account.version + 1,
            ..account.clone()
        };
        self.staged.insert(staged.id, (read_version, staged.clone()));
        Ok(staged)
    }

    async fn commit(self) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        for (id, (read_version, _)) in &self.staged {
            let stored = state.accounts[id].version;
            if stored != *read_version {
                return Err(StoreError::conflict(*id, *read_version, stored));
            }
        }
        state.writes += self.staged.len();
        state.commits += 1;
        state
            .accounts
            .extend(self.staged.into_iter().map(|(id, (_, account))| (id, account)));
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.state.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

/// Fixed exchange rates that count lookups.
#[derive(Debug, Default)]
pub struct StaticRates {
    rates: HashMap<Currency, Decimal>,
    lookups: AtomicUsize,
}

impl StaticRates {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl<const N: usize> From<[(Currency, Decimal); N]> for StaticRates {
    fn from(rates: [(Currency, Decimal); N]) -> Self {
        Self {
            rates: rates.into_iter().collect(),
            lookups: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ExchangeRateStore for StaticRates {
    async fn get(&self, currency: Currency) -> Result<Option<ExchangeRate>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rates
            .get(&currency)
            .map(|rate| ExchangeRate::new(currency, *rate)))
    }
}

/// Rate store that never answers within a reasonable bound.
pub struct SlowRates {
    delay: Duration,
}

impl SlowRates {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ExchangeRateStore for SlowRates {
    async fn get(&self, currency: Currency) -> Result<Option<ExchangeRate>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(ExchangeRate::new(currency, Decimal::ONE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remit_shared::types::Money;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_restaged_account_commits() {
        let id = AccountId::new(1);
        let store = RecordingAccountStore::with_accounts([Account::new(
            id,
            Currency::Usd,
            Money::new(dec!(10)),
        )]);

        let mut tx = store.begin().await.unwrap();
        let account = tx.get(id).await.unwrap().unwrap();
        let staged = tx
            .update(&account.with_balance(Money::new(dec!(9))))
            .await
            .unwrap();
        tx.update(&staged.with_balance(Money::new(dec!(8))))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.account(id).balance, Money::new(dec!(8)));
        assert_eq!(store.account(id).version, 2);
        assert_eq!(store.commits(), 1);
    }
}
