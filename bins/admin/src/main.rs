//! Admin utilities for Carteira.
//!
//! Usage:
//! - `carteira-admin hash-password <password>`
//! - `carteira-admin seed`
//! - `carteira-admin summarize --balances saldo.json --expenses contas.json`

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal_macros::dec;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carteira_core::aggregation::{AggregationEngine, Summary};
use carteira_core::auth::hash_password;
use carteira_core::currency::Brl;
use carteira_core::records::{BalanceDraft, BalanceRecord, ExpenseDraft, ExpenseRecord, Installments};
use carteira_shared::AppConfig;
use carteira_store::{BalanceRepository, ExpenseRepository};

#[derive(Parser, Debug)]
#[command(name = "carteira-admin")]
#[command(about = "Admin utilities for Carteira (credentials, demo data, offline summaries)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an Argon2id hash for an `auth.users` entry.
    HashPassword(HashPasswordArgs),
    /// Insert demo balances and expenses into the configured store.
    Seed,
    /// Summarize exported balance and expense lists.
    Summarize(SummarizeArgs),
}

#[derive(Args, Debug)]
struct HashPasswordArgs {
    /// Plaintext password.
    password: String,
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// JSON file with balances.
    #[arg(long)]
    balances: PathBuf,
    /// JSON file with expenses.
    #[arg(long)]
    expenses: PathBuf,
}

/// An exported list: a bare array or the API's list response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Export<T> {
    Records(Vec<T>),
    Balances { balances: Vec<T> },
    Expenses { expenses: Vec<T> },
}

impl<T> Export<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Self::Records(records)
            | Self::Balances { balances: records }
            | Self::Expenses { expenses: records } => records,
        }
    }
}

fn parse_export<T: DeserializeOwned>(raw: &str) -> serde_json::Result<Vec<T>> {
    serde_json::from_str::<Export<T>>(raw).map(Export::into_records)
}

fn read_export<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_export(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn render_summary(summary: &Summary) -> String {
    let totals = [
        format!("Balances: {}\n", summary.formatted.balances),
        format!("Expenses: {}\n", summary.formatted.expenses),
        format!("Net:      {}\n", summary.formatted.net),
    ];
    let skipped = summary
        .skipped
        .iter()
        .map(|s| format!("Skipped {} {}: {:?}\n", s.kind, s.id, s.raw));

    totals.into_iter().chain(skipped).collect()
}

fn demo_balances() -> Vec<BalanceDraft> {
    [
        ("Conta corrente", dec!(2350.75)),
        ("Poupança", dec!(10000)),
        ("Carteira", dec!(120.5)),
    ]
    .into_iter()
    .map(|(description, amount)| BalanceDraft {
        description: description.to_string(),
        amount: Brl::new(amount),
    })
    .collect()
}

fn demo_expenses() -> anyhow::Result<Vec<ExpenseDraft>> {
    [
        ("Aluguel", dec!(1800), 1_u64),
        ("Notebook", dec!(4599.9), 10),
        ("Internet", dec!(99.9), 1),
    ]
    .into_iter()
    .map(|(description, amount, installments)| -> anyhow::Result<ExpenseDraft> {
        Ok(ExpenseDraft {
            description: description.to_string(),
            amount: Brl::new(amount),
            installments: Installments::try_from(installments)?,
        })
    })
    .collect()
}

async fn seed() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    let store = carteira_store::connect(&config.store)?;
    let balances = BalanceRepository::new(store.clone(), &config.store.balance_collection);
    let expenses = ExpenseRepository::new(store, &config.store.expense_collection);

    for draft in demo_balances() {
        let record = balances.create(&draft).await?;
        info!(record_id = %record.id, amount = %record.amount, "Seeded balance");
    }
    for draft in demo_expenses()? {
        let record = expenses.create(&draft).await?;
        info!(record_id = %record.id, amount = %record.amount, "Seeded expense");
    }

    println!("Seeding complete!");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carteira=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::HashPassword(args) => {
            println!("{}", hash_password(&args.password)?);
        }
        Command::Seed => seed().await?,
        Command::Summarize(args) => {
            let balances: Vec<BalanceRecord> = read_export(&args.balances)?;
            let expenses: Vec<ExpenseRecord> = read_export(&args.expenses)?;
            let summary = AggregationEngine::summarize(&balances, &expenses);
            print!("{}", render_summary(&summary));
        }
    }

    Ok(())
}
