use client::{ApiClient, AuthSession};
use engine::{Currency, Direction, TellerSession};

use crate::{
    cli::{AccountsArgs, Command, SaccosArgs, TransactionArgs},
    error::{AppError, Result},
    legs,
    settings::Settings,
};

pub async fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Post(args) => post(&args, settings).await,
        Command::Check(args) => check(&args, settings),
        Command::Accounts(args) => accounts(&args, settings).await,
        Command::Saccos(args) => saccos(&args, settings).await,
    }
}

fn api(settings: &Settings) -> Result<ApiClient> {
    let token = settings.token.trim();
    if token.is_empty() {
        return Err(AppError::MissingToken);
    }
    Ok(ApiClient::new(&settings.base_url, AuthSession::bearer(token))?)
}

/// Fills a fresh teller session from command-line arguments.
pub fn build_session(args: &TransactionArgs, settings: &Settings) -> Result<TellerSession> {
    let currency = match args.currency {
        Some(currency) => currency,
        None => Currency::try_from(settings.currency.as_str())?,
    };

    let mut session = TellerSession::new(currency, args.transaction_type);
    let header = session.header_mut();
    if let Some(sacco) = args.sacco.as_deref().or(settings.sacco_ref.as_deref()) {
        header.set_sacco(sacco, None);
    }
    if let Some(remarks) = &args.remarks {
        header.remarks = remarks.clone();
    }
    header.value_date = args.value_date;

    for raw in &args.debits {
        legs::apply(&mut session, Direction::Debit, raw)?;
    }
    for raw in &args.credits {
        legs::apply(&mut session, Direction::Credit, raw)?;
    }
    Ok(session)
}

fn print_entries(session: &TellerSession) {
    let currency = session.entries().currency();
    for entry in session.entries().entries() {
        let amount = entry
            .amount()
            .map(|amount| amount.format_major(currency))
            .unwrap_or_default();
        println!(
            "{:<6} {:<24} {:>16}",
            entry.direction(),
            entry.account_ref(),
            amount
        );
    }

    let totals = session.totals();
    println!(
        "debits {}  credits {}  difference {}",
        totals.debit_total.display(currency),
        totals.credit_total.display(currency),
        totals.difference.display(currency)
    );
}

fn check(args: &TransactionArgs, settings: &Settings) -> Result<()> {
    let session = build_session(args, settings)?;
    print_entries(&session);
    let valid = session.check()?;
    println!("balanced: {} legs ready to post", valid.entries().len());
    Ok(())
}

async fn post(args: &TransactionArgs, settings: &Settings) -> Result<()> {
    let mut session = build_session(args, settings)?;
    let api = api(settings)?;
    print_entries(&session);

    let id = session.submit(&api).await?;
    println!("posted transaction {id}");
    Ok(())
}

async fn accounts(args: &AccountsArgs, settings: &Settings) -> Result<()> {
    let api = api(settings)?;
    let sacco = args.sacco.as_deref().or(settings.sacco_ref.as_deref());
    let accounts = api.lookup_accounts(&args.query, sacco).await?;
    if accounts.is_empty() {
        println!("no accounts found");
    }
    for account in accounts {
        println!(
            "{:<16} {:<12} {}",
            account.account_ref, account.sacco_ref, account.display_name
        );
    }
    Ok(())
}

async fn saccos(args: &SaccosArgs, settings: &Settings) -> Result<()> {
    let api = api(settings)?;
    let saccos = api.lookup_saccos(&args.query).await?;
    if saccos.is_empty() {
        println!("no saccos found");
    }
    for sacco in saccos {
        println!("{:<16} {}", sacco.sacco_ref, sacco.display_name);
    }
    Ok(())
}
