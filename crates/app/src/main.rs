use clap::Parser;

use crate::error::Result;

mod cli;
mod commands;
mod error;
mod legs;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let settings = settings::load(&cli.global)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "sacco_teller={level},client={level},engine={level}",
            level = settings.level
        ))
        .init();

    commands::run(cli.command, &settings).await
}
