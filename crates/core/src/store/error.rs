//! Store error types.

use remit_shared::types::AccountId;
use thiserror::Error;

/// Errors raised by account and exchange rate stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The stored version advanced since the account was read.
    #[error(
        "concurrent modification of account {account_id}: expected version {expected}, found {actual}"
    )]
    ConcurrentModification {
        /// The account ID.
        account_id: AccountId,
        /// Version supplied by the writer.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// An update targeted an account that does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// The underlying storage failed.
    #[error("storage operation failed: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a concurrent modification error.
    #[must_use]
    pub const fn conflict(account_id: AccountId, expected: u64, actual: u64) -> Self {
        Self::ConcurrentModification {
            account_id,
            expected,
            actual,
        }
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Backend(_) => "STORAGE_ERROR",
        }
    }

    /// Returns true if repeating the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}
