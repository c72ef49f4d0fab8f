//! # Storefront Console Library
//!
//! Terminal front end for the storefront: an admin catalog view and a shop
//! view with a cart, both driven through one explicitly owned [`Store`].
//!
//! ## Module Organization
//! ```text
//! storefront_console/
//! ├── lib.rs          ◄─── You are here (wiring & run)
//! ├── cli.rs          ◄─── clap command line
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   └── store.rs    ◄─── Store: RootState + async actions
//! ├── commands/
//! │   ├── mod.rs      ◄─── View exports
//! │   ├── admin.rs    ◄─── Catalog admin view
//! │   └── shop.rs     ◄─── Shop + cart view
//! ├── notify.rs       ◄─── Success/failure notices
//! ├── render.rs       ◄─── Text tables
//! └── error.rs        ◄─── ConsoleError
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod notify;
pub mod render;
pub mod state;

use std::sync::Arc;

use storefront_api::{ApiConfig, CartService, HttpClient, IdentityStore, ProductService};
use storefront_core::state::{ProductQuery, VisibleQuery};
use storefront_core::types::{ProductFormData, ProductUpdate};
use storefront_core::validation::{validate_page_num, validate_page_size};
use storefront_core::DEFAULT_PAGE_SIZE;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{CartCommand, Cli, Commands, ProductsCommand, ShopCommand};
use commands::admin::AdminView;
use commands::shop::{Listing, ShopView};
use error::{ConsoleError, ConsoleResult};
use notify::{NoticeObserver, Notifier, TerminalNotifier};
pub use state::Store;

/// Runs one console command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load ApiConfig (file → env → --base-url)                            │
/// │  2. Load or create the client identity                                  │
/// │  3. Build HttpClient with a NoticeObserver for failure notices          │
/// │  4. Build Store over ProductService + CartService                       │
/// │  5. Run the requested view, print the resulting state                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ConsoleResult<()> {
    let mut config = ApiConfig::load(cli.config.clone())?;
    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
        config.validate()?;
    }
    info!(base_url = %config.base_url(), "Configuration loaded");

    let identity = match config.identity_file() {
        Some(path) => IdentityStore::load(path)?,
        None => {
            debug!("No data directory available, identity will not persist");
            IdentityStore::generated()
        }
    };

    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let http = Arc::new(
        HttpClient::new(&config, Arc::new(identity))?
            .with_observer(Arc::new(NoticeObserver::new(Arc::clone(&notifier)))),
    );

    let store = Store::new(
        Arc::new(ProductService::new(Arc::clone(&http))),
        Arc::new(CartService::new(http)),
    );

    let result = execute(&store, notifier.as_ref(), cli.command, cli.json).await;
    store.shutdown();
    result
}

/// Runs one command against an existing store.
pub async fn execute(
    store: &Store,
    notifier: &dyn Notifier,
    command: Commands,
    json: bool,
) -> ConsoleResult<()> {
    match command {
        Commands::Products(cmd) => {
            let admin = AdminView::new(store, notifier);
            match cmd {
                ProductsCommand::List { page, filter } => {
                    validate_page_num(page.page)?;
                    validate_page_size(page.page_size)?;
                    admin
                        .load_query(ProductQuery {
                            page_num: page.page,
                            page_size: page.page_size,
                            filter: filter.into(),
                        })
                        .await?;
                }
                ProductsCommand::Create {
                    name,
                    price,
                    quantity,
                    hidden,
                } => {
                    admin
                        .create(ProductFormData {
                            name,
                            price,
                            quantity,
                            visible: !hidden,
                        })
                        .await?;
                }
                ProductsCommand::Update {
                    id,
                    name,
                    price,
                    quantity,
                    visible,
                } => {
                    admin
                        .update(
                            id,
                            ProductUpdate {
                                name,
                                price,
                                quantity,
                                visible,
                            },
                        )
                        .await?;
                }
                ProductsCommand::Delete { id } => admin.delete(id).await?,
                ProductsCommand::Visibility { id, state } => {
                    admin.set_visibility(id, state.is_visible()).await?;
                }
            }
            print_products(store, json)
        }
        Commands::Shop(cmd) => {
            let listing = match cmd {
                ShopCommand::Browse { name, page } => Listing::Search(VisibleQuery {
                    name,
                    page_num: page.page,
                    page_size: page.page_size,
                }),
                ShopCommand::All => Listing::All,
            };
            ShopView::new(store, notifier, listing)?.load().await?;
            print_shop(store, json, 1, DEFAULT_PAGE_SIZE)
        }
        Commands::Cart(cmd) => {
            // the stock check needs every visible product, not one page
            let shop = ShopView::new(store, notifier, Listing::All)?;
            let (page_num, page_size) = match cmd {
                CartCommand::Show { page } => {
                    validate_page_num(page.page)?;
                    validate_page_size(page.page_size)?;
                    shop.load().await?;
                    (page.page, page.page_size)
                }
                CartCommand::Add {
                    product_id,
                    quantity,
                } => {
                    shop.add(product_id, quantity).await?;
                    (1, DEFAULT_PAGE_SIZE)
                }
                CartCommand::Update { item_id, quantity } => {
                    shop.load().await?;
                    shop.update_quantity(item_id, quantity).await?;
                    (1, DEFAULT_PAGE_SIZE)
                }
                CartCommand::Remove { item_id } => {
                    shop.remove(item_id).await?;
                    (1, DEFAULT_PAGE_SIZE)
                }
                CartCommand::Clear => {
                    shop.clear().await?;
                    (1, DEFAULT_PAGE_SIZE)
                }
            };
            print_cart(store, json, page_num, page_size)
        }
    }
}

// =============================================================================
// Output
// =============================================================================

fn print_products(store: &Store, json: bool) -> ConsoleResult<()> {
    let state = store.products();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render::admin_products(&state));
    }
    Ok(())
}

fn print_shop(store: &Store, json: bool, cart_page: u32, cart_page_size: u32) -> ConsoleResult<()> {
    let state = store.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }
    print!("{}", render::shop_products(&state.products.products));
    println!();
    print!("{}", render::cart(&state.cart, cart_page, cart_page_size));
    Ok(())
}

fn print_cart(store: &Store, json: bool, page_num: u32, page_size: u32) -> ConsoleResult<()> {
    let state = store.cart();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render::cart(&state, page_num, page_size));
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_api=trace` - Trace the transport only
/// - Default: WARN, or `info,storefront=debug` with `--verbose`
///
/// Logs go to stderr so stdout stays clean for tables and `--json`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "info,storefront=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl From<ConsoleError> for std::process::ExitCode {
    fn from(err: ConsoleError) -> Self {
        std::process::ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
    }
}
