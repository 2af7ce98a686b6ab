//! Coupon commands.

use clap::Subcommand;

use roastline_core::CouponId;

use super::Context;

#[derive(Subcommand)]
pub enum CouponsAction {
    /// List the account's coupons
    List,
    /// Redeem a coupon
    Use {
        /// Coupon ID
        coupon_id: i64,
    },
}

/// Dispatch a coupons subcommand.
///
/// # Errors
///
/// Returns the client error when not signed in or a call fails.
pub async fn run(ctx: &Context, action: CouponsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CouponsAction::List => list(ctx).await,
        CouponsAction::Use { coupon_id } => redeem(ctx, coupon_id).await,
    }
}

#[allow(clippy::print_stdout)]
async fn list(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let coupons = ctx.api.coupons(session.user_id).await?;

    if coupons.is_empty() {
        println!("No coupons yet. Keep collecting stars!");
        return Ok(());
    }
    for coupon in coupons {
        let status = if coupon.used { "used" } else { "available" };
        println!(
            "[{}] {} stars  {}  ({status})",
            coupon.id, coupon.star_cost, coupon.code
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn redeem(ctx: &Context, coupon_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let message = ctx
        .api
        .use_coupon(session.user_id, CouponId::new(coupon_id))
        .await?;

    println!(
        "{}",
        message.unwrap_or_else(|| "Coupon redeemed.".to_owned())
    );
    Ok(())
}
