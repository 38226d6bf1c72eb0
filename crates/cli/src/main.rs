//! Deportes Elite CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Log in and browse
//! deportes-cli login -e ana@example.com -p 'contraseña'
//! deportes-cli products --page 0 --size 20
//! deportes-cli products --category Fútbol
//!
//! # Shop
//! deportes-cli cart add 3 --quantity 2
//! deportes-cli cart list
//! deportes-cli checkout
//! deportes-cli last-order
//!
//! # Account
//! deportes-cli profile show
//! deportes-cli orders
//! deportes-cli logout
//! ```
//!
//! # Environment Variables
//!
//! - `DEPORTES_API_URL` - Backend base URL (default: `http://localhost:8000`)
//! - `DEPORTES_SESSION_DIR` - Where the credential and last-order record
//!   live (default: `~/.deportes-elite`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use deportes_elite_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "deportes-cli")]
#[command(author, version, about = "Deportes Elite terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session credential
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,

        /// Birth date (YYYY-MM-DD, must be 18 or older)
        #[arg(short, long)]
        birth_date: String,
    },
    /// Drop the stored session credential
    Logout,
    /// Browse the product catalog
    Products {
        /// Page number (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 20)]
        size: u32,

        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a single product
    Product {
        /// Product ID
        id: i64,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Turn the cart into an order
    Checkout,
    /// Show the most recent order confirmation
    LastOrder,
    /// View or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Order history
    Orders {
        /// Page number (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List the cart lines with subtotals and total
    List,
    /// Add a product
    Add {
        /// Product ID
        id: i64,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: i64,
    },
    /// Set the quantity of a product already in the cart
    SetQuantity {
        /// Product ID
        id: i64,

        /// New quantity
        quantity: u32,
    },
    /// Remove every line
    Empty,
    /// Number of items in the cart
    Count,
    /// Total amount of the cart
    Total,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile
    Show,
    /// Update the profile
    Update {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        commands::report_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&ctx, &email, &password).await?;
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
            address,
            birth_date,
        } => {
            commands::account::register(
                &ctx,
                commands::account::RegisterArgs {
                    first_name,
                    last_name,
                    email,
                    password,
                    address,
                    birth_date,
                },
            )
            .await?;
        }
        Commands::Logout => commands::account::logout(&ctx)?,
        Commands::Products {
            page,
            size,
            category,
        } => {
            commands::catalog::products(&ctx, page, size, category.as_deref()).await?;
        }
        Commands::Product { id } => {
            commands::catalog::product(&ctx, ProductId::new(id)).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&ctx).await?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(&ctx, ProductId::new(id), quantity).await?;
            }
            CartAction::Remove { id } => {
                commands::cart::remove(&ctx, ProductId::new(id)).await?;
            }
            CartAction::SetQuantity { id, quantity } => {
                commands::cart::set_quantity(&ctx, ProductId::new(id), quantity).await?;
            }
            CartAction::Empty => commands::cart::empty(&ctx).await?,
            CartAction::Count => commands::cart::count(&ctx).await?,
            CartAction::Total => commands::cart::total(&ctx).await?,
        },
        Commands::Checkout => commands::cart::checkout(&ctx).await?,
        Commands::LastOrder => commands::cart::last_order(&ctx)?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::account::profile(&ctx).await?,
            ProfileAction::Update {
                first_name,
                last_name,
                email,
                address,
            } => {
                commands::account::update_profile(&ctx, first_name, last_name, email, address)
                    .await?;
            }
        },
        Commands::Orders { page, size } => {
            commands::account::orders(&ctx, page, size).await?;
        }
    }
    Ok(())
}
