//! Bank accounts and read-only account queries.

mod service;

use remit_shared::types::{AccountId, Currency, Money};
use serde::{Deserialize, Serialize};

pub use service::AccountService;

/// A bank account as seen by the transfer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The unique identifier of the account.
    pub id: AccountId,
    /// The currency the account is denominated in.
    pub currency: Currency,
    /// The balance, never negative in a committed state.
    pub balance: Money,
    /// Optimistic concurrency token, bumped on every committed write.
    #[serde(default)]
    pub version: u64,
}

impl Account {
    /// Creates an account at version 0.
    #[must_use]
    pub const fn new(id: AccountId, currency: Currency, balance: Money) -> Self {
        Self {
            id,
            currency,
            balance,
            version: 0,
        }
    }

    /// Returns a copy with a new balance, keeping the version that was read.
    #[must_use]
    pub fn with_balance(&self, balance: Money) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }
}
