//! Remit command-line interface.
//!
//! Runs transfers and account queries against a JSON ledger snapshot.
//! Results go to stdout as JSON, logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use remit_core::{AccountService, CurrencyConverter, TransferEngine, TransferError, TransferRequest};
use remit_db::LedgerSnapshot;
use remit_shared::config::LoggingConfig;
use remit_shared::types::{AccountId, Currency, Money, PageRequest};
use remit_shared::{AppConfig, AppError};

#[derive(Parser, Debug)]
#[command(name = "remit", about = "Remit - multi-currency fund transfers")]
struct Cli {
    /// Ledger snapshot file
    #[arg(short, long, global = true, default_value = "ledger.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move money between two accounts and save the new state
    Transfer {
        /// Account to debit
        #[arg(long)]
        from: i64,
        /// Account to credit
        #[arg(long)]
        to: i64,
        /// Amount in the debit account's currency
        #[arg(long, allow_hyphen_values = true)]
        amount: Money,
    },
    /// List accounts ordered by id
    Accounts {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
    /// Show one account
    Account {
        /// Account identifier
        id: i64,
    },
    /// Record a rate against the reference currency
    SetRate {
        /// Currency code, e.g. GBP
        currency: Currency,
        /// Value of one unit in the reference currency
        #[arg(allow_hyphen_values = true)]
        rate: Decimal,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error[CONFIG]: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let (accounts, rates) = LedgerSnapshot::load(&cli.state).await?.into_stores()?;
    let accounts = Arc::new(accounts);
    let rates = Arc::new(rates);

    match cli.command {
        Command::Transfer { from, to, amount } => {
            let converter = CurrencyConverter::from_config(Arc::clone(&rates), &config.conversion);
            let engine = TransferEngine::new(Arc::clone(&accounts), converter);

            let request = TransferRequest::new(AccountId::new(from), AccountId::new(to), amount);
            let receipt = engine.transfer(&request).await?;

            LedgerSnapshot::capture(&accounts, &rates)
                .await
                .save(&cli.state)
                .await?;
            info!(transfer_id = %receipt.transfer_id, state = %cli.state.display(), "transfer saved");
            print_json(&receipt)
        }
        Command::Accounts { page, per_page } => {
            let service = AccountService::new(accounts);
            let page = service.list(PageRequest::new(page, per_page)).await?;
            print_json(&page)
        }
        Command::Account { id } => {
            let service = AccountService::new(accounts);
            let account = service
                .get(AccountId::new(id))
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No account found with the identifier {id}")))?;
            print_json(&account)
        }
        Command::SetRate { currency, rate } => {
            let entry = rates.upsert(currency, rate).await;
            LedgerSnapshot::capture(&accounts, &rates)
                .await
                .save(&cli.state)
                .await?;
            print_json(&entry)
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the error with its code. Caller faults exit with 2, everything
/// else with 1.
fn report(err: &anyhow::Error) -> ExitCode {
    if let Some(err) = err.downcast_ref::<TransferError>() {
        eprintln!("error[{}]: {err}", err.error_code());
        return if err.is_illegal() {
            ExitCode::from(2)
        } else {
            ExitCode::FAILURE
        };
    }
    if let Some(err) = err.downcast_ref::<AppError>() {
        eprintln!("error[{}]: {err}", err.error_code());
        return if err.is_client_error() {
            ExitCode::from(2)
        } else {
            ExitCode::FAILURE
        };
    }
    eprintln!("error: {err:#}");
    ExitCode::FAILURE
}
