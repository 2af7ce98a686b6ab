//! Favorites commands.

use clap::Subcommand;

use roastline_client::menu::{CategoryFilter, SortKey, filter_by_category, sort_products};
use roastline_core::ProductId;

use super::Context;

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List the server-side favorites, sorted and filtered
    List {
        /// Sort key: rating, price, or name
        #[arg(short, long, default_value = "rating")]
        sort: String,

        /// Show only one category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Toggle a product's favorite state
    Toggle {
        /// Product ID
        product_id: i64,
    },
    /// Replace the local favorite cache with the server's list
    Sync,
}

/// Dispatch a favorites subcommand.
///
/// # Errors
///
/// Returns the client error when not signed in or a call fails.
pub async fn run(ctx: &Context, action: FavoritesAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FavoritesAction::List { sort, category } => list(ctx, &sort, category).await,
        FavoritesAction::Toggle { product_id } => toggle(ctx, product_id).await,
        FavoritesAction::Sync => sync(ctx).await,
    }
}

#[allow(clippy::print_stdout)]
async fn list(
    ctx: &Context,
    sort: &str,
    category: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let favorites = ctx.favorites().fetch_remote(session.user_id).await?;

    let filter = category.map_or(CategoryFilter::All, CategoryFilter::Only);
    let mut items = filter_by_category(&favorites, &filter);
    sort_products(&mut items, parse_sort_key(sort)?);

    if items.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }
    for item in items {
        println!(
            "[{}] {}  {}  ({:.1} stars)",
            item.id, item.name, item.price, item.rating
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn toggle(ctx: &Context, product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let outcome = ctx
        .favorites()
        .toggle(session.user_id, ProductId::new(product_id))
        .await?;

    if outcome.is_favorite {
        println!("Added to favorites.");
    } else {
        println!("Removed from favorites.");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn sync(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let ids = ctx.favorites().reconcile(session.user_id).await?;
    println!("Local cache now tracks {} favorite(s).", ids.len());
    Ok(())
}

fn parse_sort_key(raw: &str) -> Result<SortKey, Box<dyn std::error::Error>> {
    match raw {
        "rating" => Ok(SortKey::Rating),
        "price" => Ok(SortKey::Price),
        "name" => Ok(SortKey::Name),
        other => Err(format!("unknown sort key: {other} (use rating, price, or name)").into()),
    }
}
