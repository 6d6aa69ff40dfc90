//! In-memory account store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use remit_core::{Account, AccountStore, AccountTransaction, StoreError};
use remit_shared::types::{AccountId, PageRequest, PageResponse};
use tokio::sync::RwLock;

type Accounts = Arc<RwLock<BTreeMap<AccountId, Account>>>;

/// Account store backed by an ordered map.
///
/// Transactions stage writes privately and apply them under one write lock
/// at commit, after checking that no staged account changed since it was
/// read. A transaction dropped without commit is rolled back.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Accounts,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given accounts. Later duplicates win.
    #[must_use]
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.id, account))
            .collect();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    /// Inserts or replaces an account outside of any transaction.
    ///
    /// Used by seeding and admin flows. Returns the previous state, if any.
    pub async fn insert(&self, account: Account) -> Option<Account> {
        self.accounts.write().await.insert(account.id, account)
    }

    /// Returns every committed account ordered by id.
    pub async fn snapshot(&self) -> Vec<Account> {
        self.accounts.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    type Transaction = MemoryAccountTransaction;

    async fn begin(&self) -> Result<Self::Transaction, StoreError> {
        Ok(MemoryAccountTransaction {
            accounts: Arc::clone(&self.accounts),
            staged: BTreeMap::new(),
        })
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<PageResponse<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        let data = accounts
            .values()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect();
        Ok(PageResponse::new(data, page, accounts.len() as u64))
    }
}

/// Unit of work over [`MemoryAccountStore`].
#[derive(Debug)]
pub struct MemoryAccountTransaction {
    accounts: Accounts,
    /// Staged writes keyed by id, with the committed version each was read at.
    staged: BTreeMap<AccountId, (u64, Account)>,
}

#[async_trait]
impl AccountTransaction for MemoryAccountTransaction {
    async fn get(&mut self, id: AccountId) -> Result<Option<Account>, StoreError> {
        if let Some((_, account)) = self.staged.get(&id) {
            return Ok(Some(account.clone()));
        }
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn update(&mut self, account: &Account) -> Result<Account, StoreError> {
        let (read_version, current) = match self.staged.get(&account.id) {
            Some((read_version, staged)) => (*read_version, staged.version),
            None => {
                let stored = self
                    .accounts
                    .read()
                    .await
                    .get(&account.id)
                    .map(|stored| stored.version)
                    .ok_or(StoreError::AccountNotFound(account.id))?;
                (stored, stored)
            }
        };

        if current != account.version {
            return Err(StoreError::conflict(account.id, account.version, current));
        }

        let staged = Account {
            version: account.version + 1,
            ..account.clone()
        };
        self.staged.insert(staged.id, (read_version, staged.clone()));
        tracing::trace!(account_id = %staged.id, version = staged.version, "staged account write");
        Ok(staged)
    }

    async fn commit(self) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;

        for (id, (read_version, _)) in &self.staged {
            let stored = accounts.get(id).ok_or(StoreError::AccountNotFound(*id))?;
            if stored.version != *read_version {
                return Err(StoreError::conflict(*id, *read_version, stored.version));
            }
        }

        let writes = self.staged.len();
        accounts.extend(
            self.staged
                .into_iter()
                .map(|(id, (_, account))| (id, account)),
        );
        tracing::trace!(writes, "committed account transaction");
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        tracing::trace!(discarded = self.staged.len(), "rolled back account transaction");
        Ok(())
    }
}
