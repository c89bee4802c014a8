//! SIC Marketplace CLI - database and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the database tables
//! sic-cli migrate
//!
//! # Create a seller account
//! sic-cli seller create --store-name "Lab Supply" --password "..."
//!
//! # List a product for seller 1
//! sic-cli product add --seller-id 1 --name "Oscilloscope" --price 199.99 --category electronics
//!
//! # Show every product
//! sic-cli product list
//! ```
//!
//! The database file comes from `MARKETPLACE_DATABASE_PATH` (default `ecommerce.db`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use sic_marketplace_core::Category;

mod commands;

#[derive(Parser)]
#[command(name = "sic-cli")]
#[command(author, version, about = "SIC Marketplace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database tables if they do not exist
    Migrate,
    /// Manage seller accounts
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Manage the product catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum SellerAction {
    /// Create a new seller account
    Create {
        /// Store name, also used to log in
        #[arg(short, long)]
        store_name: String,

        /// Login password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List a product for a seller
    Add {
        /// Owning seller's ID
        #[arg(long)]
        seller_id: i64,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price in dollars, e.g. 19.99
        #[arg(short, long)]
        price: Decimal,

        /// Category (electronics, research_tools, books)
        #[arg(short, long)]
        category: Category,
    },
    /// Show every product
    List,
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

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seller { action } => match action {
            SellerAction::Create {
                store_name,
                password,
            } => {
                commands::seller::create(&store_name, password).await?;
            }
        },
        Commands::Product { action } => match action {
            ProductAction::Add {
                seller_id,
                name,
                price,
                category,
            } => {
                commands::product::add(seller_id, &name, price, category).await?;
            }
            ProductAction::List => commands::product::list().await?,
        },
    }
    Ok(())
}
