//! Storefront CLI - Operator tool for storefront catalogs, carts and bookings.
//!
//! Commands:
//! - `storefront stock` - Stock badge data for a product record
//! - `storefront price` - Resolve the price of a colour/size selection
//! - `storefront options` - Colour and size dropdown options
//! - `storefront cart` - Manage the storefront's persisted cart
//! - `storefront booking` - Inspect and walk the booking wizard
//! - `storefront slug` - Build and resolve showcase slugs
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BookingArgs, CartArgs, ConfigArgs, LookupArgs, OptionsArgs, SlugArgs};

/// Storefront CLI - Inspect products, carts and bookings
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stock status for a product
    Stock(LookupArgs),

    /// Resolve the price of a selection
    Price(LookupArgs),

    /// List colour and size options
    Options(OptionsArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Booking wizard
    Booking(BookingArgs),

    /// Showcase slugs
    Slug(SlugArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Stock(args) => commands::catalog::stock(args, &ctx),
        Commands::Price(args) => commands::catalog::price(args, &ctx),
        Commands::Options(args) => commands::catalog::options(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Booking(args) => commands::booking::run(args, &ctx),
        Commands::Slug(args) => commands::slug::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}
