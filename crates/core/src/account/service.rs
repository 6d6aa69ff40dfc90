//! Account query service.

use std::sync::Arc;

use remit_shared::types::{AccountId, PageRequest, PageResponse};

use super::Account;
use crate::store::{AccountStore, StoreError};

/// Read-only access to committed accounts.
pub struct AccountService<A> {
    accounts: Arc<A>,
}

impl<A: AccountStore> AccountService<A> {
    /// Creates a service over the given store.
    #[must_use]
    pub const fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    /// Lists accounts ordered by id. Out-of-range paging values are clamped.
    pub async fn list(&self, page: PageRequest) -> Result<PageResponse<Account>, StoreError> {
        let page = PageRequest::new(page.page, page.per_page);
        tracing::trace!(page = page.page, per_page = page.per_page, "listing accounts");
        self.accounts.list(page).await
    }

    /// Returns one account, if it exists.
    pub async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        tracing::trace!(account_id = %id, "getting account");
        self.accounts.get(id).await
    }
}
