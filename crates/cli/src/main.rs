//! Tindi CLI - Terminal host for the storefront widget.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered
//! tindi products --search router
//!
//! # Show one product and add a unit of it to the cart
//! tindi detail 65f0c2 --add
//!
//! # Add to the cart directly
//! tindi cart add --name Router --price 1500 --image img/router.png --max-stock 5 --qty 2
//!
//! # Send a quote request
//! tindi quote -f name=Jane -f email=jane@example.com -f phone=0700000000 -f message="Hi"
//! ```
//!
//! # Environment Variables
//!
//! - `TINDI_HOSTNAME` - Hostname the widget is served from; picks the API
//! - `TINDI_API_URL` - Explicit API base URL
//! - `TINDI_CART_DIR` - Directory holding the persisted cart
//! - `SENTRY_DSN` - Sentry error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{Stdout, stdout};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tindi_core::Price;
use tindi_storefront::Storefront;
use tindi_storefront::config::WidgetConfig;
use tindi_storefront::storage::FileStore;

mod commands;
mod terminal;

use commands::{CliError, Session};
use terminal::TerminalSurface;

#[derive(Parser)]
#[command(name = "tindi")]
#[command(author, version, about = "Tindi storefront from the terminal")]
struct Cli {
    /// Print product grid HTML fragments as they are drawn
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Search query forwarded to the API
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one product
    Detail {
        /// Product id
        id: String,

        /// Add one unit to the cart
        #[arg(long)]
        add: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Send a quote request
    Quote {
        /// Form field as key=value (repeatable)
        #[arg(short, long = "field", value_parser = commands::quote::parse_field)]
        fields: Vec<(String, String)>,

        /// Submit as the contact form (no required fields)
        #[arg(long)]
        contact: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add units of a product
    Add {
        /// Product name (the cart's line key)
        #[arg(short, long)]
        name: String,

        /// Unit price in KES
        #[arg(short, long)]
        price: Decimal,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image: String,

        /// Stock ceiling for the product
        #[arg(long)]
        max_stock: Option<u32>,

        /// Quantity to add
        #[arg(short, long, default_value = "1")]
        qty: String,
    },
    /// List line items
    Show,
    /// Print the total number of units
    Count,
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &WidgetConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment().as_str().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = WidgetConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr; stdout carries command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tindi_storefront=info,tindi_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let CliError::Widget(err) = &e
                && err.is_reportable()
            {
                sentry::capture_error(err);
            }
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: WidgetConfig) -> Result<(), CliError> {
    let mut session = open_session(config, cli.html)?;

    let _cart_events = session.on_cart_change(|event| {
        tracing::info!(?event, "Cart changed");
    });

    match cli.command {
        Commands::Products { search } => commands::products::list(&mut session, &search).await?,
        Commands::Detail { id, add } => commands::detail::show(&mut session, &id, add).await?,
        Commands::Cart { action } => match action {
            CartAction::Add {
                name,
                price,
                image,
                max_stock,
                qty,
            } => {
                let request =
                    commands::cart::request(name, Price::new(price), image, max_stock, qty);
                commands::cart::add(&mut session, request)?;
            }
            CartAction::Show => commands::cart::show(&mut session),
            CartAction::Count => commands::cart::count(&mut session),
            CartAction::Clear => commands::cart::clear(&mut session)?,
        },
        Commands::Quote { fields, contact } => {
            commands::quote::submit(&mut session, fields, contact).await?;
        }
    }
    Ok(())
}

fn open_session(config: WidgetConfig, html: bool) -> Result<Session<FileStore, Stdout>, CliError> {
    let storage = FileStore::new(config.cart_dir.clone());
    let surface = TerminalSurface::new(stdout()).echo_grid(html);
    Ok(Storefront::new(config, storage, surface)?)
}
