//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,

    /// Search term (case-insensitive, matched against names).
    #[arg(short, long, default_value = "")]
    pub term: String,

    /// Only show this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Sort order: price-asc, price-desc or name-asc.
    #[arg(short, long, default_value = "")]
    pub sort: String,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products (default).
    List,
    /// List categories.
    Categories,
    /// Show details for a product.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: String,
        /// Quantity to add.
        #[arg(short, long, default_value_t = 1)]
        qty: i64,
    },
    /// Set a line's quantity (0 removes it).
    Update {
        /// Product ID.
        id: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        qty: i64,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Postal code (CEP); the address is looked up when it has 8 digits.
    #[arg(long)]
    pub cep: Option<String>,

    /// House or building number.
    #[arg(long)]
    pub number: Option<String>,

    /// Apartment, suite, etc.
    #[arg(long)]
    pub complement: Option<String>,

    /// Street, if the lookup can't fill it.
    #[arg(long)]
    pub street: Option<String>,

    /// Neighborhood, if the lookup can't fill it.
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// City, if the lookup can't fill it.
    #[arg(long)]
    pub city: Option<String>,

    /// State code, if the lookup can't fill it.
    #[arg(long)]
    pub state: Option<String>,

    /// Place the order (otherwise only quote).
    #[arg(long)]
    pub confirm: bool,
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
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
