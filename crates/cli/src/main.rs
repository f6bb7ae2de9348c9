//! Customer service CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! customers-cli migrate
//!
//! # Insert customers from a JSON array (all or nothing)
//! customers-cli seed --file customers.json
//! ```
//!
//! Both commands read `CUSTOMERS_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "customers-cli")]
#[command(author, version, about = "Customer service CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert customers from a JSON file
    Seed {
        /// Path to a JSON array of customer objects
        #[arg(short, long)]
        file: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { file } => commands::seed::customers(&file).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_requires_file() {
        assert!(Cli::try_parse_from(["customers-cli", "seed"]).is_err());
        assert!(Cli::try_parse_from(["customers-cli", "seed", "--file", "c.json"]).is_ok());
    }
}
