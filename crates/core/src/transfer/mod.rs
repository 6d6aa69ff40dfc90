//! Fund transfers between accounts.
//!
//! ```text
//! validate amount
//!   └─ begin
//!        ├─ load debit ─ check balance ─ load credit ─ reject self-transfer
//!        ├─ convert (cross-currency only, credit floored to 2 dp)
//!        ├─ stage debit, stage credit
//!        └─ commit (or rollback on any error)
//! ```

mod engine;
mod error;
mod types;

pub use engine::TransferEngine;
pub use error::{IllegalTransfer, TransferError, TransferFailure};
pub use types::{TransferReceipt, TransferRequest};
