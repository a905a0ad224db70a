//! Qotore CLI - catalog seeding and operational checks.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog from a YAML file
//! qotore-cli seed -f catalog.yaml
//!
//! # Seed hidden, to review in the back office before publishing
//! qotore-cli seed -f catalog.yaml --hidden
//!
//! # Send a test order notification through the configured Gmail account
//! qotore-cli email test
//! ```
//!
//! All commands load configuration from the same environment variables as
//! the admin binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "qotore-cli")]
#[command(author, version, about = "Qotore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the fragrance catalog from a YAML file
    Seed {
        /// Path to the catalog YAML file
        #[arg(short, long)]
        file: String,

        /// Insert fragrances hidden from the storefront
        #[arg(long)]
        hidden: bool,
    },
    /// Email diagnostics
    Email {
        #[command(subcommand)]
        action: EmailAction,
    },
}

#[derive(Subcommand)]
enum EmailAction {
    /// Send a test order notification to the configured recipient
    Test,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { file, hidden } => commands::seed::catalog(&file, hidden).await?,
        Commands::Email { action } => match action {
            EmailAction::Test => commands::email::send_test().await?,
        },
    }
    Ok(())
}
