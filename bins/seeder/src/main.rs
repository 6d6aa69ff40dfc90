//! Ledger seeder for Remit development and testing.
//!
//! Writes a snapshot with a handful of accounts and reference rates so the
//! `remit` CLI has something to work on.
//!
//! Usage: cargo run --bin seeder [path]   (default: ledger.json, or `REMIT_STATE`)

use std::path::PathBuf;

use remit_core::{Account, ExchangeRate};
use remit_db::{LedgerSnapshot, MemoryAccountStore, MemoryExchangeRateStore};
use remit_shared::types::{AccountId, Currency, Money};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("REMIT_STATE").ok())
        .map_or_else(|| PathBuf::from("ledger.json"), PathBuf::from);

    println!("Seeding accounts...");
    let accounts = MemoryAccountStore::new();
    for account in dev_accounts() {
        println!("  {} {} {}", account.id, account.currency, account.balance);
        accounts.insert(account).await;
    }

    println!("Seeding exchange rates...");
    let rates = MemoryExchangeRateStore::new();
    for rate in dev_rates() {
        println!("  {} = {} {}", rate.currency, rate.rate_to_reference, Currency::REFERENCE);
        rates.upsert(rate.currency, rate.rate_to_reference).await;
    }

    LedgerSnapshot::capture(&accounts, &rates)
        .await
        .save(&path)
        .await?;

    println!("Seeding complete! Wrote {}", path.display());
    Ok(())
}

fn dev_accounts() -> [Account; 4] {
    [
        Account::new(AccountId::new(123), Currency::Eur, Money::from_minor(123_456)),
        Account::new(AccountId::new(456), Currency::Aud, Money::from_minor(45_000_178)),
        Account::new(AccountId::new(789), Currency::Jpy, Money::from_minor(100_000_000)),
        Account::new(AccountId::new(101), Currency::Usd, Money::from_minor(4_120_000)),
    ]
}

/// Reference rates for every supported currency.
fn dev_rates() -> [ExchangeRate; 8] {
    [
        ExchangeRate::new(Currency::Usd, Decimal::ONE),
        ExchangeRate::new(Currency::Eur, Decimal::new(108, 2)),
        ExchangeRate::new(Currency::Gbp, Decimal::new(123, 2)),
        ExchangeRate::new(Currency::Cad, Decimal::new(73, 2)),
        ExchangeRate::new(Currency::Aud, Decimal::new(65, 2)),
        ExchangeRate::new(Currency::Cny, Decimal::new(138, 3)),
        ExchangeRate::new(Currency::Jpy, Decimal::new(67, 4)),
        ExchangeRate::new(Currency::Pln, Decimal::new(25, 2)),
    ]
}
