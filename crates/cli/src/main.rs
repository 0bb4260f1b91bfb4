//! Bazaar CLI - drive the marketplace store from the command line.
//!
//! State lives in a data directory of JSON files (one per collection), so
//! every invocation picks up where the last one left off, exactly like a
//! browser session would. `--ephemeral` swaps in an in-memory backend for
//! throwaway runs.
//!
//! # Usage
//!
//! ```bash
//! # Reset every collection to its seed data
//! bazaar seed
//!
//! # Browse the catalog
//! bazaar catalog --category Shoes --sort price_asc
//!
//! # Shop
//! bazaar cart add p-1 --qty 2
//! bazaar checkout --name "Anna Ivanova" --email anna@mail.ru \
//!     --city Moscow --address "ul. Lenina 10" --promo FASHION20
//!
//! # Run a store
//! bazaar admin login admin1 admin1
//! bazaar admin stats
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use bazaar_core::{DeliveryMethod, OrderStatus, PaymentMethod, Tier};
use bazaar_store::storage::FileBackend;
use bazaar_store::Store;
use bazaar_storefront::CatalogSort;

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar marketplace CLI")]
struct Cli {
    /// Keep state in memory instead of the data directory.
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Data directory override (default: $BAZAAR_DATA_DIR, then the
    /// platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset every collection to its seed data
    Seed,
    /// Summarize the current store state
    State,
    /// Browse the product catalog
    Catalog {
        /// Search term over title and brand
        #[arg(long, default_value = "")]
        term: String,
        /// Category name filter
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        #[arg(long)]
        min_rating: Option<Decimal>,
        /// Only fast-delivery products
        #[arg(long)]
        fast: bool,
        /// Only in-stock products
        #[arg(long)]
        in_stock: bool,
        /// Sort order (`default`, `price_asc`, `price_desc`, `rating_desc`)
        #[arg(long, default_value = "default")]
        sort: CatalogSort,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Quote and place an order for the current cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        comment: String,
        /// Payment method (`card`, `sbp`, `cash`)
        #[arg(long, default_value = "card")]
        payment: PaymentMethod,
        /// Delivery method (`standard`, `express`)
        #[arg(long, default_value = "standard")]
        delivery: DeliveryMethod,
        /// Promo code to apply
        #[arg(long)]
        promo: Option<String>,
    },
    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Admin panel operations
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product; omit the id to grab a random in-stock pick
    Add {
        product_id: Option<String>,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product's line
    Rm { product_id: String },
    /// Set a line's quantity (0 removes it)
    Qty { product_id: String, quantity: u32 },
    /// Show the cart with line totals
    Show,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders through the admin workbench
    List {
        /// Tab (`pending`, `completed`, `cancelled`, `refunded`)
        #[arg(long)]
        bucket: Option<bazaar_admin::OrderBucket>,
        /// Search over id, name, email, phone
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Set an order's status
    Status {
        order_id: String,
        /// New status (`created`, `accepted`, `delivered`, `cancelled`,
        /// `refunded`)
        status: OrderStatus,
    },
    /// Delete one order
    Delete { order_id: String },
    /// Delete every order
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log into the admin panel
    Login { username: String, password: String },
    /// Clear the admin session
    Logout,
    /// Show the current session
    Whoami,
    /// Dashboard stats for the current session's scope
    Stats,
    /// Per-store platform overview (superadmin view)
    Platform,
    /// Manage store-owner accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Buy a tier for the logged-in store owner
    Tier {
        /// Target tier (`free`, `bronze`, `silver`, `gold`)
        tier: Tier,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Create a store-owner account
    Create {
        username: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        store_name: Option<String>,
        #[arg(long)]
        tier: Option<Tier>,
    },
    /// List the roster
    List,
    /// Delete an account
    Delete { user_id: String },
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn open_store(cli: &Cli) -> Result<Store, Box<dyn std::error::Error>> {
    if cli.ephemeral {
        return Ok(Store::in_memory());
    }
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => Config::from_env()?.data_dir,
    };
    Ok(Store::open(FileBackend::new(data_dir)?))
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&cli)?;
    match cli.command {
        Commands::Seed => commands::seed::run(&store)?,
        Commands::State => commands::state::run(&store),
        Commands::Catalog {
            term,
            category,
            min_price,
            max_price,
            min_rating,
            fast,
            in_stock,
            sort,
            page,
        } => commands::catalog::run(
            &store,
            bazaar_storefront::CatalogQuery {
                term,
                category,
                min_price,
                max_price,
                min_rating,
                fast_delivery_only: fast,
                in_stock_only: in_stock,
                sort,
                page,
            },
        ),
        Commands::Cart { action } => match action {
            CartAction::Add { product_id, qty } => {
                commands::cart::add(&store, product_id.as_deref(), qty)?;
            }
            CartAction::Rm { product_id } => commands::cart::remove(&store, &product_id)?,
            CartAction::Qty {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&store, &product_id, quantity)?,
            CartAction::Show => commands::cart::show(&store),
            CartAction::Clear => commands::cart::clear(&store)?,
        },
        Commands::Checkout {
            name,
            phone,
            email,
            city,
            address,
            comment,
            payment,
            delivery,
            promo,
        } => commands::checkout::run(
            &store,
            bazaar_storefront::CheckoutForm {
                customer: bazaar_core::Customer { name, phone, email },
                delivery_info: bazaar_core::DeliveryInfo {
                    city,
                    address,
                    comment,
                },
                delivery_method: delivery,
                payment_method: payment,
            },
            promo.as_deref(),
        )?,
        Commands::Orders { action } => match action {
            OrdersAction::List {
                bucket,
                query,
                page,
            } => commands::orders::list(&store, bucket, &query, page),
            OrdersAction::Status { order_id, status } => {
                commands::orders::set_status(&store, &order_id, status)?;
            }
            OrdersAction::Delete { order_id } => commands::orders::delete(&store, &order_id)?,
            OrdersAction::Clear => commands::orders::clear(&store)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Login { username, password } => {
                commands::admin::login(&store, &username, &password)?;
            }
            AdminAction::Logout => commands::admin::logout(&store)?,
            AdminAction::Whoami => commands::admin::whoami(&store),
            AdminAction::Stats => commands::admin::stats(&store),
            AdminAction::Platform => commands::admin::platform(&store),
            AdminAction::Users { action } => match action {
                UsersAction::Create {
                    username,
                    password,
                    name,
                    store_name,
                    tier,
                } => commands::admin::create_user(
                    &store,
                    bazaar_store::AdminUserForm {
                        username,
                        password,
                        name,
                        store_name,
                        tier,
                    },
                )?,
                UsersAction::List => commands::admin::list_users(&store),
                UsersAction::Delete { user_id } => commands::admin::delete_user(&store, &user_id)?,
            },
            AdminAction::Tier { tier } => commands::admin::buy_tier(&store, tier)?,
        },
    }
    Ok(())
}
