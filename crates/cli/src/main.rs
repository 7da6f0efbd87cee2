//! Vitrine CLI - browse the catalog and work the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List featured products
//! vitrine featured
//!
//! # List collections
//! vitrine collections
//!
//! # Open the starter cart, set line 1 to 2 units and drop line 3
//! vitrine cart --set 1=2 --remove 3
//!
//! # Add two Gucci blazers in size G
//! vitrine add 4 --size G --quantity 2
//! ```
//!
//! Configuration comes from `VITRINE_*` environment variables (or `.env`);
//! logs go to stderr and honour `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrine_core::{CartLineId, ProductId, Size};
use vitrine_storefront::AppState;
use vitrine_storefront::config::StorefrontConfig;

mod commands;

use commands::cart::LineEdit;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine catalog and cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List featured products
    Featured,
    /// List collections
    Collections,
    /// Show the starter cart after applying edits
    ///
    /// `--set` edits run first, in the order given, then `--remove` edits.
    Cart {
        /// Set a line's quantity (`ID=QTY`); quantities below 1 are ignored
        #[arg(long = "set", value_name = "ID=QTY", value_parser = commands::cart::parse_line_edit)]
        set: Vec<LineEdit>,

        /// Remove a line
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<CartLineId>,
    },
    /// Add a product to the starter cart
    Add {
        /// Product to add
        product_id: ProductId,

        /// Size label (e.g. `M`, `GG`, `40`)
        #[arg(short, long)]
        size: Size,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vitrine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::from_config(config);

    match cli.command {
        Commands::Featured => commands::catalog::featured(&state).await?,
        Commands::Collections => commands::catalog::collections(&state).await?,
        Commands::Cart { set, remove } => commands::cart::show(&state, &set, &remove)?,
        Commands::Add {
            product_id,
            size,
            quantity,
        } => commands::cart::add(&state, product_id, size, quantity).await?,
    }
    Ok(())
}
