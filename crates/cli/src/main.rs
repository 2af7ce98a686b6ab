//! Roastline CLI - drive the loyalty client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and look around
//! roastline login -e ada@example.com -p hunter42
//! roastline menu --search latte
//! roastline rewards --watch
//!
//! # Favorites and coupons
//! roastline favorites toggle 12
//! roastline coupons list
//!
//! # Account management
//! roastline account show
//! roastline reset-password
//! ```
//!
//! # Commands
//!
//! - `login` / `register` / `logout` - session lifecycle
//! - `reset-password` - interactive three-step forgot-password flow
//! - `menu` / `featured` / `campaigns` / `most-reviewed` - catalog
//! - `favorites` - list, toggle, and sync favorites
//! - `coupons` - list and redeem coupons
//! - `rewards` - loyalty progress, optionally refreshed live
//! - `account` - profile, star history, QR export, deletion
//! - `comment` - post a product review

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "roastline")]
#[command(author, version, about = "Roastline loyalty CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Walk through the forgot-password flow interactively
    ResetPassword,
    /// Browse the menu, grouped by category
    Menu {
        /// Case-insensitive search over name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Show only one category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show the featured products
    Featured,
    /// Show the active campaigns
    Campaigns,
    /// Show the most-reviewed products
    MostReviewed,
    /// Manage favorite products
    Favorites {
        #[command(subcommand)]
        action: commands::favorites::FavoritesAction,
    },
    /// Manage coupons
    Coupons {
        #[command(subcommand)]
        action: commands::coupons::CouponsAction,
    },
    /// Show loyalty progress
    Rewards {
        /// Keep refreshing on the loyalty cadence until interrupted
        #[arg(short, long)]
        watch: bool,
    },
    /// Manage the account
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Post a review for a product
    Comment {
        /// Product ID
        product_id: i64,

        /// Star rating, 1-5
        #[arg(short, long)]
        rating: u8,

        /// Review text
        #[arg(short, long)]
        text: String,
    },
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        // Screens surface one message string per failure; do the same here.
        if let Some(app) = e.downcast_ref::<roastline_client::AppError>() {
            eprintln!("{}", app.user_message());
        }
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::load()?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, password).await?,
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => commands::auth::register(&ctx, &first_name, &last_name, &email, password).await?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::ResetPassword => commands::auth::reset_password(&ctx).await?,
        Commands::Menu { search, category } => {
            commands::catalog::menu(&ctx, &search, category).await?;
        }
        Commands::Featured => commands::catalog::featured(&ctx).await?,
        Commands::Campaigns => commands::catalog::campaigns(&ctx).await?,
        Commands::MostReviewed => commands::catalog::most_reviewed(&ctx).await?,
        Commands::Favorites { action } => commands::favorites::run(&ctx, action).await?,
        Commands::Coupons { action } => commands::coupons::run(&ctx, action).await?,
        Commands::Rewards { watch } => commands::rewards::run(&ctx, watch).await?,
        Commands::Account { action } => commands::account::run(&ctx, action).await?,
        Commands::Comment {
            product_id,
            rating,
            text,
        } => commands::catalog::comment(&ctx, product_id, rating, &text).await?,
    }
    Ok(())
}
