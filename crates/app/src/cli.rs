use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Currency, TransactionType};

#[derive(Parser, Debug)]
#[command(name = "sacco_teller")]
#[command(about = "Smart Teller: post balanced multi-leg SACCO transactions")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override API base URL (e.g. http://127.0.0.1:8000/api).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override log level.
    #[arg(long, global = true)]
    pub level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate and post a transaction.
    Post(TransactionArgs),
    /// Validate a transaction and print its totals without posting it.
    Check(TransactionArgs),
    /// Search member and GL accounts.
    Accounts(AccountsArgs),
    /// Search saccos.
    Saccos(SaccosArgs),
}

#[derive(Args, Debug, Default)]
pub struct TransactionArgs {
    /// Sacco reference (defaults to `sacco_ref` from the config).
    #[arg(long)]
    pub sacco: Option<String>,
    #[arg(long = "type", default_value = "journal")]
    pub transaction_type: TransactionType,
    #[arg(long)]
    pub remarks: Option<String>,
    /// Value date (YYYY-MM-DD).
    #[arg(long)]
    pub value_date: Option<NaiveDate>,
    /// Currency code (defaults to `currency` from the config).
    #[arg(long)]
    pub currency: Option<Currency>,
    /// Debit leg, repeatable.
    #[arg(long = "debit", value_name = "ACCOUNT=AMOUNT")]
    pub debits: Vec<String>,
    /// Credit leg, repeatable.
    #[arg(long = "credit", value_name = "ACCOUNT=AMOUNT")]
    pub credits: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AccountsArgs {
    #[arg(long)]
    pub query: String,
    /// Restrict to a sacco (defaults to `sacco_ref` from the config).
    #[arg(long)]
    pub sacco: Option<String>,
}

#[derive(Args, Debug)]
pub struct SaccosArgs {
    #[arg(long)]
    pub query: String,
}
