//! In-memory persistence for Remit.
//!
//! This crate provides:
//! - `MemoryAccountStore` with optimistic, all-or-nothing transactions
//! - `MemoryExchangeRateStore` fed by rate ingestion
//! - `LedgerSnapshot` to load and save both stores as JSON

pub mod snapshot;
pub mod stores;

pub use snapshot::{LedgerSnapshot, SnapshotError};
pub use stores::{MemoryAccountStore, MemoryAccountTransaction, MemoryExchangeRateStore};
