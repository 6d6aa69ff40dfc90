//! Common types used across the application.

pub mod currency;
pub mod id;
pub mod money;
pub mod pagination;

pub use currency::{Currency, UnknownCurrency};
pub use id::AccountId;
pub use money::{MONEY_SCALE, Money};
pub use pagination::{PageMeta, PageRequest, PageResponse};
