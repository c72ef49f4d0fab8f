//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use storefront_core::types::ProductFilter;
use storefront_core::{Money, DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront catalog admin and shop client", version)]
pub struct Cli {
    /// Path to storefront.toml (defaults to the platform config dir)
    #[arg(long, global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides the API base URL, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the resulting state as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Catalog administration
    #[command(subcommand)]
    Products(ProductsCommand),

    /// Browse visible products
    #[command(subcommand)]
    Shop(ShopCommand),

    /// Shopping cart
    #[command(subcommand)]
    Cart(CartCommand),
}

// =============================================================================
// products
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List one page of the catalog
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        /// Price, e.g. 12.50
        #[arg(long)]
        price: Money,
        /// Units in stock
        #[arg(long)]
        quantity: i64,
        /// Create the product hidden from the shop
        #[arg(long)]
        hidden: bool,
    },
    /// Update fields of a product
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Money>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        visible: Option<bool>,
    },
    /// Delete a product
    Delete { id: i64 },
    /// Show or hide a product in the shop
    Visibility { id: i64, state: Visibility },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Shown)
    }
}

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = DEFAULT_PAGE_NUM)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Name contains
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub min_price: Option<Money>,
    #[arg(long)]
    pub max_price: Option<Money>,
    #[arg(long)]
    pub visible: Option<bool>,
}

impl From<FilterArgs> for ProductFilter {
    fn from(args: FilterArgs) -> Self {
        ProductFilter {
            name: args.name,
            min_price: args.min_price,
            max_price: args.max_price,
            visible: args.visible,
        }
    }
}

// =============================================================================
// shop / cart
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum ShopCommand {
    /// One page of visible products, optionally searched by name
    Browse {
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Every visible product
    All,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart (lines are paged locally)
    Show {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Add a product to the cart
    Add {
        product_id: i64,
        /// Defaults to one unit
        #[arg(long)]
        quantity: Option<i64>,
    },
    /// Set a line's quantity (zero or less removes the line)
    Update {
        item_id: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { item_id: i64 },
    /// Empty the cart
    Clear,
}
