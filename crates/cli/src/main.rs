//! Shopfront CLI - Order tokens, price previews and search filter tools.
//!
//! # Usage
//!
//! ```bash
//! # Mint a guest access token for an order
//! sf-cli token sign order-1042
//!
//! # Check a token from a support ticket
//! sf-cli token verify 3f1c...:9ab0...
//!
//! # Preview a price in a currency
//! sf-cli price format --amount 19.5 --currency eur.json --rate 0.92
//!
//! # Quote a shipping method for a cart
//! sf-cli shipping quote --method express.json --subtotal 48.00 --apply-free-shipping
//!
//! # Resolve a selection to a variant
//! sf-cli variant match --product hoodie.json --dimensions options.json -s size=M -s color=Red
//!
//! # Compile a storefront query into the store filter
//! sf-cli search compile --query 'brand=acme&minPrice=10&sort=price-asc'
//! ```
//!
//! # Commands
//!
//! - `token` - Sign and verify order access tokens
//! - `price` - Render prices with a currency template
//! - `shipping` - Quote shipping cost and tax
//! - `variant` - Match selections and list purchasable variants
//! - `search` - Compile query strings into filter trees
//!
//! Results go to stdout as plain text or JSON; logs go to stderr
//! (`RUST_LOG` overrides the default filter).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shopfront_core::SelectedOption;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign and verify order access tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Render prices
    Price {
        #[command(subcommand)]
        action: PriceAction,
    },
    /// Quote shipping methods
    Shipping {
        #[command(subcommand)]
        action: ShippingAction,
    },
    /// Resolve variant selections
    Variant {
        #[command(subcommand)]
        action: VariantAction,
    },
    /// Compile catalog search filters
    Search {
        #[command(subcommand)]
        action: SearchAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Sign a token for an order (uses `ORDER_TOKEN_SECRET`)
    Sign {
        /// Order identifier
        order_id: String,
    },
    /// Verify a token and print the grant it carries
    Verify {
        /// Token as issued by `sign`
        token: String,
    },
}

#[derive(Subcommand)]
enum PriceAction {
    /// Format an amount with a currency definition
    Format {
        /// Amount in the store's base currency
        #[arg(short, long)]
        amount: Decimal,

        /// Currency definition (JSON file)
        #[arg(short, long)]
        currency: PathBuf,

        /// Exchange rate from the base currency
        #[arg(short, long)]
        rate: Option<Decimal>,
    },
}

#[derive(Subcommand)]
enum ShippingAction {
    /// Quote cost, tax and total for a shipping method
    Quote {
        /// Shipping method definition (JSON file)
        #[arg(short, long)]
        method: PathBuf,

        /// Order subtotal
        #[arg(short, long)]
        subtotal: Decimal,

        /// Charge nothing when the subtotal reaches the free-shipping threshold
        #[arg(long)]
        apply_free_shipping: bool,
    },
}

#[derive(Subcommand)]
enum VariantAction {
    /// Resolve a selection to a variant
    Match {
        /// Product definition (JSON file)
        #[arg(short, long)]
        product: PathBuf,

        /// Live option dimensions (JSON array file)
        #[arg(short, long)]
        dimensions: PathBuf,

        /// Selected option as `dimension=value` (repeatable)
        #[arg(short, long = "select", value_parser = parse_selected_option)]
        select: Vec<SelectedOption>,

        /// Units the customer wants
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// List purchasable option combinations
    Available {
        /// Product definition (JSON file)
        #[arg(short, long)]
        product: PathBuf,

        /// Live option dimensions (JSON array file)
        #[arg(short, long)]
        dimensions: PathBuf,

        /// Units the customer wants
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
}

#[derive(Subcommand)]
enum SearchAction {
    /// Compile a URL query string into the store filter JSON
    Compile {
        /// Query string, e.g. `brand=acme&opt_size=M&sort=price-asc`
        #[arg(short, long)]
        query: String,

        /// Live option dimensions (JSON array file)
        #[arg(short, long)]
        dimensions: Option<PathBuf>,

        /// Ignore the `collection` parameter regardless of configuration
        #[arg(long)]
        no_collections: bool,
    },
}

fn parse_selected_option(s: &str) -> Result<SelectedOption, String> {
    match s.split_once('=') {
        Some((dimension, value)) if !dimension.is_empty() => {
            Ok(SelectedOption::new(dimension, value))
        }
        _ => Err(format!("expected dimension=value, got '{s}'")),
    }
}

fn main() {
    // Load .env before the filter so RUST_LOG can live there too
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shopfront_cli=info,shopfront_resolver=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Token { action } => match action {
            TokenAction::Sign { order_id } => commands::token::sign(&order_id),
            TokenAction::Verify { token } => commands::token::verify(&token),
        },
        Commands::Price { action } => match action {
            PriceAction::Format {
                amount,
                currency,
                rate,
            } => commands::price::format(amount, &currency, rate),
        },
        Commands::Shipping { action } => match action {
            ShippingAction::Quote {
                method,
                subtotal,
                apply_free_shipping,
            } => commands::shipping::quote(&method, subtotal, apply_free_shipping),
        },
        Commands::Variant { action } => match action {
            VariantAction::Match {
                product,
                dimensions,
                select,
                quantity,
            } => commands::variant::find(&product, &dimensions, &select, quantity),
            VariantAction::Available {
                product,
                dimensions,
                quantity,
            } => commands::variant::available(&product, &dimensions, quantity),
        },
        Commands::Search { action } => match action {
            SearchAction::Compile {
                query,
                dimensions,
                no_collections,
            } => commands::search::compile(&query, dimensions.as_deref(), no_collections),
        },
    }
}
