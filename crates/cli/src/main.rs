//! SolarHub CLI - Drive the cart engine from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a plan (id derived from product, category and plan)
//! solarhub add --product "Painel Solar" --category Monitor --plan Mensal \
//!     --period "30 dias" --price "R$120"
//!
//! # Show the cart
//! solarhub list
//!
//! # Remove a plan, or empty the cart
//! solarhub remove painel-solar-monitor-mensal
//! solarhub clear
//! ```
//!
//! # Commands
//!
//! - `list` - Show items, badge and subtotal
//! - `total` - Show badge and subtotal only
//! - `add` - Add a plan
//! - `remove` - Remove a plan by id
//! - `clear` - Empty the cart
//!
//! Every invocation hydrates the cart from the slot in `SOLARHUB_CART_DIR`
//! before running the command.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use solarhub_cart::{CartConfig, CartStore, FileBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::edit::AddArgs;
use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "solarhub")]
#[command(author, version, about = "SolarHub cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show items, badge and subtotal
    List,
    /// Show badge and subtotal
    Total,
    /// Add a plan to the cart
    Add(AddArgs),
    /// Remove a plan by id
    Remove {
        /// Item id
        id: String,
    },
    /// Empty the cart
    Clear,
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "solarhub_cli=info,solarhub_cart=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = CliConfig::from_env();

    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FileBackend::in_dir(&config.cart_dir);
    tracing::debug!(path = %backend.path().display(), "Opening cart slot");

    let engine = CartConfig::default().with_toast_duration(config.toast_duration);
    let mut cart = CartStore::open(backend, engine).await;

    match cli.command {
        Commands::List => commands::show::list(&cart, config.badge_cap),
        Commands::Total => commands::show::total(&cart, config.badge_cap),
        Commands::Add(args) => {
            commands::edit::add(&mut cart, args).await?;
            commands::show::total(&cart, config.badge_cap);
        }
        Commands::Remove { id } => {
            commands::edit::remove(&mut cart, &id).await;
            commands::show::total(&cart, config.badge_cap);
        }
        Commands::Clear => {
            commands::edit::clear(&mut cart).await;
        }
    }
    Ok(())
}
