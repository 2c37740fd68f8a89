//! LK Printers CLI - catalog checks and cart quotes.
//!
//! # Usage
//!
//! ```bash
//! # Validate catalog.json and site.json
//! lk-cli catalog check
//!
//! # Search the catalog the way the listing page does
//! lk-cli catalog search --category apparel --query hood
//!
//! # Price a cart: two of product 1 and one of product 8
//! lk-cli cart quote 1:2 8:1
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Load the data files and report problems
//! - `catalog search` - Run the catalog filter
//! - `cart quote` - Build a cart and print its totals

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

use commands::cart::LineArg;

/// Default location of `catalog.json` and `site.json`, matching the
/// storefront's `STOREFRONT_DATA_DIR` default.
const DEFAULT_DATA_DIR: &str = "crates/storefront/data";

#[derive(Parser)]
#[command(name = "lk-cli")]
#[command(author, version, about = "LK Printers CLI tools")]
struct Cli {
    /// Directory holding catalog.json and site.json
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with carts
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load the data files and report problems
    Check,
    /// List products matching a category and search text
    Search {
        /// Category slug (`all` or unknown values select everything)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive text matched against product names
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add lines to an empty cart and print its totals
    Quote {
        /// Lines as `PRODUCT_ID:QUANTITY` (quantity defaults to 1)
        #[arg(required = true, value_parser = LineArg::parse)]
        lines: Vec<LineArg>,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check => commands::catalog::check(&cli.data_dir),
            CatalogAction::Search { category, query } => {
                commands::catalog::search(&cli.data_dir, &category, &query)
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Quote { lines } => commands::cart::quote(&cli.data_dir, &lines),
        },
    }
}
