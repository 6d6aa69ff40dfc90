//! The transfer engine.

use std::sync::Arc;

use chrono::Utc;
use remit_shared::types::Money;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::{IllegalTransfer, TransferError, TransferFailure};
use super::types::{TransferReceipt, TransferRequest};
use crate::currency::{ConversionError, CurrencyConverter};
use crate::store::{AccountStore, AccountTransaction, ExchangeRateStore};

/// Moves money between two accounts, converting across currencies.
///
/// The engine holds no mutable state. Concurrent calls are safe; conflicting
/// writes to the same account surface as
/// [`StoreError::ConcurrentModification`](crate::store::StoreError::ConcurrentModification)
/// and are never retried here.
pub struct TransferEngine<A, R> {
    accounts: Arc<A>,
    converter: CurrencyConverter<R>,
}

impl<A, R> TransferEngine<A, R>
where
    A: AccountStore,
    R: ExchangeRateStore,
{
    /// Creates an engine over an account store and a converter.
    #[must_use]
    pub const fn new(accounts: Arc<A>, converter: CurrencyConverter<R>) -> Self {
        Self {
            accounts,
            converter,
        }
    }

    /// Executes a transfer as one atomic unit.
    ///
    /// Either both balances change or neither does. On success exactly two
    /// account writes are committed.
    ///
    /// # Errors
    ///
    /// - [`IllegalTransfer`] for a non-positive amount, an unknown account,
    ///   an insufficient balance or a self-transfer. No write happens.
    /// - [`TransferFailure`] if conversion fails, a write conflicts or the
    ///   store fails. Nothing is committed.
    pub async fn transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, TransferError> {
        if !request.amount.is_positive() {
            return Err(IllegalTransfer::NonPositiveAmount(request.amount.amount()).into());
        }

        let mut tx = self.accounts.begin().await?;
        match self.execute(&mut tx, request).await {
            Ok(receipt) => {
                tx.commit().await?;
                debug!(transfer_id = %receipt.transfer_id, "transfer committed");
                Ok(receipt)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback after failed transfer did not complete");
                }
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        tx: &mut A::Transaction,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, TransferError> {
        let amount = request.amount;

        let debit = tx
            .get(request.from_account_id)
            .await?
            .ok_or(IllegalTransfer::AccountNotFound(request.from_account_id))?;
        debug!(account_id = %debit.id, balance = %debit.balance, "loaded debit account");

        if amount > debit.balance {
            return Err(IllegalTransfer::InsufficientBalance {
                account_id: debit.id,
                currency: debit.currency,
                requested: amount,
                available: debit.balance,
            }
            .into());
        }

        let credit = tx
            .get(request.to_account_id)
            .await?
            .ok_or(IllegalTransfer::AccountNotFound(request.to_account_id))?;
        debug!(account_id = %credit.id, balance = %credit.balance, "loaded credit account");

        if debit.id == credit.id {
            return Err(IllegalTransfer::SameAccount(debit.id).into());
        }

        let (from, to) = (debit.currency, credit.currency);
        let (exchange_rate, credited) = if from == to {
            (Decimal::ONE, amount)
        } else {
            let conversion_failure = |source: ConversionError| TransferFailure::Conversion {
                from,
                to,
                source,
            };
            let factor = self
                .converter
                .get_rate(from, to)
                .await
                .map_err(conversion_failure)?;
            let raw = amount
                .amount()
                .checked_mul(factor)
                .ok_or_else(|| conversion_failure(ConversionError::Overflow { from, to }))?;
            debug!(%from, %to, %factor, %raw, "converted credit amount");
            (factor, Money::floor(raw))
        };

        let debit_balance = debit
            .balance
            .checked_sub(amount)
            .ok_or(TransferFailure::BalanceOverflow(debit.id))?;
        tx.update(&debit.with_balance(debit_balance)).await?;

        let credit_balance = credit
            .balance
            .checked_add(credited)
            .ok_or(TransferFailure::BalanceOverflow(credit.id))?;
        tx.update(&credit.with_balance(credit_balance)).await?;

        Ok(TransferReceipt {
            transfer_id: Uuid::now_v7(),
            debit_account_id: debit.id,
            credit_account_id: credit.id,
            debited: amount,
            debit_currency: from,
            credited,
            credit_currency: to,
            exchange_rate,
            debit_balance,
            credit_balance,
            executed_at: Utc::now(),
        })
    }
}
