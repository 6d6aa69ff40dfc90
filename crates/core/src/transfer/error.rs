//! Transfer error taxonomy.
//!
//! [`IllegalTransfer`] is the caller's fault and is always raised before any
//! write. [`TransferFailure`] is the system's fault: the request was legal
//! but could not be completed, and nothing was committed.

use remit_shared::AppError;
use remit_shared::types::{AccountId, Currency, Money};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::currency::ConversionError;
use crate::store::StoreError;

/// A transfer the caller should not have asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalTransfer {
    /// Amount is zero or negative.
    #[error("Invalid transfer amount: {0}, the amount must be positive")]
    NonPositiveAmount(Decimal),

    /// No account with this ID.
    #[error("No account found with the identifier {0}")]
    AccountNotFound(AccountId),

    /// Debit account cannot cover the amount.
    #[error(
        "Invalid transfer amount: {requested} {currency}, the amount exceeds the balance {available} of account {account_id}"
    )]
    InsufficientBalance {
        /// The debit account.
        account_id: AccountId,
        /// Currency of the debit account.
        currency: Currency,
        /// Requested amount.
        requested: Money,
        /// Balance at the time of the check.
        available: Money,
    },

    /// Debit and credit are the same account.
    #[error("The same account {0} was chosen as a debit and credit account")]
    SameAccount(AccountId),
}

/// A legal transfer that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferFailure {
    /// The conversion factor could not be resolved.
    #[error("Unsupported currency conversion from {from} to {to}: {source}")]
    Conversion {
        /// Debit currency.
        from: Currency,
        /// Credit currency.
        to: Currency,
        /// Underlying converter error.
        #[source]
        source: ConversionError,
    },

    /// A write conflicted or the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A new balance does not fit in a decimal.
    #[error("Balance of account {0} is out of range")]
    BalanceOverflow(AccountId),
}

/// Error returned by [`TransferEngine::transfer`](super::TransferEngine::transfer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Caller fault.
    #[error(transparent)]
    Illegal(#[from] IllegalTransfer),

    /// System fault.
    #[error(transparent)]
    Failure(#[from] TransferFailure),
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        Self::Failure(TransferFailure::Store(err))
    }
}

impl TransferError {
    /// Returns true for caller-fault errors.
    #[must_use]
    pub const fn is_illegal(&self) -> bool {
        matches!(self, Self::Illegal(_))
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Illegal(IllegalTransfer::NonPositiveAmount(_)) => "INVALID_AMOUNT",
            Self::Illegal(IllegalTransfer::AccountNotFound(_)) => "ACCOUNT_NOT_FOUND",
            Self::Illegal(IllegalTransfer::InsufficientBalance { .. }) => "INSUFFICIENT_BALANCE",
            Self::Illegal(IllegalTransfer::SameAccount(_)) => "SAME_ACCOUNT",
            Self::Failure(TransferFailure::Conversion { source, .. }) => source.error_code(),
            Self::Failure(TransferFailure::Store(err)) => err.error_code(),
            Self::Failure(TransferFailure::BalanceOverflow(_)) => "BALANCE_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Illegal(_) => 400,
            Self::Failure(_) => 500,
        }
    }

    /// Returns true if retrying the whole transfer from scratch is safe.
    ///
    /// Every failure leaves committed state untouched, so all system faults
    /// qualify. Caller faults never succeed on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::Illegal(e) => Self::Validation(e.to_string()),
            TransferError::Failure(e @ TransferFailure::Conversion { .. }) => {
                Self::ExternalService(e.to_string())
            }
            TransferError::Failure(e) => Self::Internal(e.to_string()),
        }
    }
}
