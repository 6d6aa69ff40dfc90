//! Transfer request and receipt types.

use chrono::{DateTime, Utc};
use remit_shared::types::{AccountId, Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request to move money between two accounts. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Account to debit.
    pub from_account_id: AccountId,
    /// Account to credit.
    pub to_account_id: AccountId,
    /// Amount in the debit account's currency.
    pub amount: Money,
}

impl TransferRequest {
    /// Creates a new transfer request.
    #[must_use]
    pub const fn new(from_account_id: AccountId, to_account_id: AccountId, amount: Money) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }
}

/// Outcome of a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    /// Time-ordered identifier of this transfer.
    pub transfer_id: Uuid,
    /// The debited account.
    pub debit_account_id: AccountId,
    /// The credited account.
    pub credit_account_id: AccountId,
    /// Amount taken from the debit account.
    pub debited: Money,
    /// Currency of the debit account.
    pub debit_currency: Currency,
    /// Amount added to the credit account, floored after conversion.
    pub credited: Money,
    /// Currency of the credit account.
    pub credit_currency: Currency,
    /// Factor applied to the debited amount. One for same-currency transfers.
    pub exchange_rate: Decimal,
    /// Debit account balance after the transfer.
    pub debit_balance: Money,
    /// Credit account balance after the transfer.
    pub credit_balance: Money,
    /// When the transfer was executed.
    pub executed_at: DateTime<Utc>,
}
