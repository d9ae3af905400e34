//! CLI command implementations.

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod slug;

use clap::{Args, Subcommand};

/// A product record on disk.
#[derive(Args)]
pub struct ProductArgs {
    /// Path to a product JSON record.
    pub product: String,
}

/// A colour/size selection.
#[derive(Args, Clone, Default)]
pub struct SelectionArgs {
    /// Selected colour.
    #[arg(long)]
    pub color: Option<String>,

    /// Selected size.
    #[arg(long)]
    pub size: Option<String>,
}

/// Arguments for the stock and price commands.
#[derive(Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub product: ProductArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the options command.
#[derive(Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub product: ProductArgs,

    /// Only list sizes offered in this colour.
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product selection.
    Add {
        /// Path to a product JSON record.
        product: String,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set an item's quantity; below 1 removes it.
    Qty {
        /// Cart item id.
        item: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Add one to an item.
    Inc {
        /// Cart item id.
        item: String,
    },
    /// Take one from an item; at zero it is removed.
    Dec {
        /// Cart item id.
        item: String,
    },
    /// Change an item's colour or size and re-price it.
    Options {
        /// Cart item id.
        item: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Remove an item.
    Remove {
        /// Cart item id.
        item: String,
    },
    /// Empty the cart.
    Clear,
    /// Print final totals and empty the cart.
    Checkout,
}

/// Arguments for the booking command.
#[derive(Args)]
pub struct BookingArgs {
    #[command(subcommand)]
    pub command: BookingCommand,

    /// Override: bookings take whole days.
    #[arg(long, global = true)]
    pub full_day: bool,

    /// Override: percentage of the price due in advance.
    #[arg(long, global = true)]
    pub advance_percent: Option<u8>,
}

#[derive(Subcommand)]
pub enum BookingCommand {
    /// List the wizard steps for the configured settings.
    Steps,
    /// Walk the wizard with the given answers.
    Plan {
        /// Service name.
        #[arg(long)]
        service: String,

        /// Service price in major units.
        #[arg(long)]
        price: f64,

        /// Service duration in minutes.
        #[arg(long, default_value = "60")]
        duration: u32,

        /// Booking day (YYYY-MM-DD).
        #[arg(long)]
        date: String,

        /// Start time (HH:MM). Ignored for full-day bookings.
        #[arg(long)]
        time: Option<String>,

        /// Customer name.
        #[arg(long)]
        name: String,

        /// Customer phone.
        #[arg(long)]
        phone: String,

        /// Advance payment reference, if already paid.
        #[arg(long)]
        payment_ref: Option<String>,
    },
}

/// Arguments for the slug command.
#[derive(Args)]
pub struct SlugArgs {
    #[command(subcommand)]
    pub command: SlugCommand,
}

#[derive(Subcommand)]
pub enum SlugCommand {
    /// Turn a name into a slug.
    Make {
        /// Display name.
        name: String,
    },
    /// Resolve a requested slug against the configured storefront.
    Resolve {
        /// Requested path segment.
        requested: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Tenant id.
        #[arg(long)]
        tenant: String,

        /// Storefront display name.
        #[arg(long, default_value = "")]
        name: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
