//! Catalog commands: menu browsing, rails, campaigns, reviews.

use roastline_client::api::Product;
use roastline_client::menu::{CategoryFilter, filter_groups, group_by_category};
use roastline_core::ProductId;

use super::Context;

/// Print the menu grouped by category, with optional search and category
/// selection. Favorited products (per the local cache) carry a marker.
///
/// # Errors
///
/// Returns the client error when the menu fetch fails.
#[allow(clippy::print_stdout)]
pub async fn menu(
    ctx: &Context,
    search: &str,
    category: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let products = ctx.api.menu().await?;
    let local_favorites = ctx.favorites().local_ids()?;

    let filter = category.map_or(CategoryFilter::All, CategoryFilter::Only);
    let groups = filter_groups(&group_by_category(products), &filter, search);

    if groups.is_empty() {
        println!("Nothing on the menu matches.");
        return Ok(());
    }

    for group in groups {
        println!("\n== {} ==", group.category);
        for item in group.items {
            let marker = if local_favorites.contains(&item.id) {
                " *"
            } else {
                ""
            };
            println!("  [{}] {}{marker}  {}", item.id, item.name, item.price);
            if !item.description.is_empty() {
                println!("       {}", item.description);
            }
        }
    }
    Ok(())
}

/// Print the featured products.
///
/// # Errors
///
/// Returns the client error when the fetch fails.
pub async fn featured(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    print_products(&ctx.api.featured_menu().await?);
    Ok(())
}

/// Print the most-reviewed products.
///
/// # Errors
///
/// Returns the client error when the fetch fails.
pub async fn most_reviewed(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    print_products(&ctx.api.most_reviewed().await?);
    Ok(())
}

/// Print the active campaigns.
///
/// # Errors
///
/// Returns the client error when the fetch fails.
#[allow(clippy::print_stdout)]
pub async fn campaigns(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    for campaign in ctx.api.campaigns().await? {
        println!("[{}] {}", campaign.id, campaign.title);
        if !campaign.teaser.is_empty() {
            println!("     {}", campaign.teaser);
        }
    }
    Ok(())
}

/// Post a review for a product.
///
/// # Errors
///
/// Returns the client error when not signed in or the call fails.
#[allow(clippy::print_stdout)]
pub async fn comment(
    ctx: &Context,
    product_id: i64,
    rating: u8,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let payload = ctx
        .api
        .add_comment(session.user_id, ProductId::new(product_id), text, rating)
        .await?;

    println!(
        "{}",
        payload
            .message
            .unwrap_or_else(|| "Thanks for your review!".to_owned())
    );
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_products(products: &[Product]) {
    for product in products {
        println!(
            "[{}] {}  {}  ({:.1} stars)",
            product.id, product.name, product.price, product.rating
        );
    }
}
