// rowguard/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing) on stderr, so stdout only carries the summary.
    // RUST_LOG=debug validate ... pour voir les détails
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    if let Err(err) = commands::validate::execute(&cli).await {
        tracing::debug!(?err, "Run aborted");
        eprintln!("❌ Run aborted at the {} stage. {}", err.stage(), err);
        if let Some(help) = err.help() {
            eprintln!("💡 {}", help);
        }
        std::process::exit(err.exit_code());
    }
}
