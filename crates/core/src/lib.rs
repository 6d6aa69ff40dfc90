//! Core transfer logic for Remit.
//!
//! This crate contains pure business logic with ZERO persistence dependencies.
//! Storage is reached only through the traits in [`store`].
//!
//! # Modules
//!
//! - `account` - Accounts and read-only account queries
//! - `currency` - Exchange rates and cross-rate conversion
//! - `store` - Persistence ports with optimistic concurrency
//! - `transfer` - The atomic transfer engine

pub mod account;
pub mod currency;
pub mod store;
pub mod transfer;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{Account, AccountService};
pub use currency::{ConversionError, CurrencyConverter, ExchangeRate};
pub use store::{AccountStore, AccountTransaction, ExchangeRateStore, StoreError};
pub use transfer::{
    IllegalTransfer, TransferEngine, TransferError, TransferFailure, TransferReceipt,
    TransferRequest,
};
