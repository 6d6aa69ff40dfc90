//! Store adapters implementing the `remit-core` persistence ports.

pub mod account;
pub mod exchange_rate;

pub use account::{MemoryAccountStore, MemoryAccountTransaction};
pub use exchange_rate::MemoryExchangeRateStore;
