//! GrocerEase CLI - storefront from the terminal and mock store seeding.
//!
//! # Usage
//!
//! ```bash
//! # Write the product catalog into json-server's db.json
//! grocerease seed --db db.json
//!
//! # Browse
//! grocerease products --search dal
//! grocerease products --category "Dairy Products"
//! grocerease offers
//!
//! # Shop
//! grocerease login demo --password demo123
//! grocerease cart add 1 --quantity 2
//! grocerease cart show
//! grocerease checkout --phone 9876543210 --address "12 MG Road" \
//!     --city Pune --zip-code 411001 --payment cash
//! grocerease orders
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Log filter (default: `grocerease_storefront=info,grocerease_cli=info`)
//! - `GROCEREASE_LOG_FORMAT` - `json` for JSON logs, anything else for text
//! - Store settings are read by `grocerease_storefront::config`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use grocerease_core::PaymentMethod;
use grocerease_storefront::catalog::HOME_BEST_SELLERS;
use grocerease_storefront::config::StoreConfig;
use grocerease_storefront::{AppError, AppState};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "grocerease")]
#[command(author, version, about = "GrocerEase storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the product catalog into a json-server database file
    Seed {
        /// Database file; users, carts and orders already in it are kept
        #[arg(long, default_value = "db.json")]
        db: PathBuf,
    },
    /// List products
    Products {
        /// Only products whose name or description contains this
        #[arg(short, long)]
        search: Option<String>,

        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
    /// List products on offer
    Offers,
    /// List best sellers
    BestSellers {
        #[arg(short, long, default_value_t = HOME_BEST_SELLERS)]
        limit: usize,
    },
    /// Log in
    Login {
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out and clear the local cart
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart
    Checkout(CheckoutArgs),
    /// Show past orders
    Orders,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product
    Add {
        product_id: i64,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a product's quantity (0 or less removes it)
    Update {
        product_id: i64,

        #[arg(
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(..=i64::from(u32::MAX))
        )]
        quantity: i64,
    },
    /// Remove a product
    Remove { product_id: i64 },
    /// Empty the cart
    Clear,
}

/// Checkout form. Name and email default to the logged-in profile.
#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    full_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    zip_code: String,

    /// `card` or `cash`
    #[arg(long, default_value_t = PaymentMethod::Card)]
    payment: PaymentMethod,

    #[arg(long)]
    card_number: Option<String>,

    #[arg(long)]
    card_name: Option<String>,

    /// MM/YY
    #[arg(long)]
    expiry: Option<String>,

    #[arg(long)]
    cvv: Option<String>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        tracing::error!("{}", e.user_message());
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("grocerease_storefront=info,grocerease_cli=info"));

    let json = std::env::var("GROCEREASE_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = StoreConfig::from_env().map_err(AppError::from)?;
    let state = AppState::new(config);

    match cli.command {
        Commands::Seed { db } => commands::seed::products(&db).await?,
        Commands::Products { search, category } => {
            commands::catalog::products(&state, search.as_deref(), category.as_deref()).await?;
        }
        Commands::Categories => commands::catalog::categories(&state).await?,
        Commands::Offers => commands::catalog::offers(&state).await?,
        Commands::BestSellers { limit } => commands::catalog::best_sellers(&state, limit).await?,
        Commands::Login { username, password } => {
            commands::auth::login(&state, &username, password).await?;
        }
        Commands::Logout => commands::auth::logout(&state).await,
        Commands::Whoami => commands::auth::whoami(&state).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state).await,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&state, product_id, quantity).await?,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&state, product_id, quantity).await,
            CartAction::Remove { product_id } => commands::cart::remove(&state, product_id).await,
            CartAction::Clear => commands::cart::clear(&state).await,
        },
        Commands::Checkout(args) => commands::checkout::place_order(&state, args).await?,
        Commands::Orders => commands::orders::list(&state).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_quantity(arg: &str) -> Option<i64> {
        let cli = Cli::try_parse_from(["grocerease", "cart", "update", "1", arg]).ok()?;
        match cli.command {
            Commands::Cart {
                action: CartAction::Update { quantity, .. },
            } => Some(quantity),
            _ => None,
        }
    }

    #[test]
    fn test_update_quantity_range() {
        assert_eq!(update_quantity("-3"), Some(-3));
        assert_eq!(update_quantity("4294967295"), Some(4_294_967_295));
        assert_eq!(update_quantity("4294967296"), None);
    }
}
