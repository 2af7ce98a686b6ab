//! Account commands: profile, history, QR export, deletion.

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::Subcommand;
use tracing::info;

use roastline_client::api::MovementKind;

use super::{Context, prompt};

#[derive(Subcommand)]
pub enum AccountAction {
    /// Show the stored profile
    Show,
    /// Update email and phone number
    Edit {
        /// New email address
        #[arg(short, long)]
        email: String,

        /// New phone number
        #[arg(short, long)]
        phone: String,
    },
    /// Show the star-ledger history
    History,
    /// Write the loyalty QR code to a PNG file
    Qr {
        /// Output path
        #[arg(short, long, default_value = "roastline-qr.png")]
        out: PathBuf,
    },
    /// Delete the account permanently
    Delete {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Dispatch an account subcommand.
///
/// # Errors
///
/// Returns the client error when not signed in or a call fails.
pub async fn run(ctx: &Context, action: AccountAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AccountAction::Show => show(ctx),
        AccountAction::Edit { email, phone } => edit(ctx, &email, &phone).await,
        AccountAction::History => history(ctx).await,
        AccountAction::Qr { out } => qr(ctx, &out),
        AccountAction::Delete { yes } => delete(ctx, yes).await,
    }
}

#[allow(clippy::print_stdout)]
fn show(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    println!("{} <{}>", session.full_name, session.email);
    if let Some(phone) = &session.phone {
        println!("Phone: {phone}");
    }
    println!(
        "Stars: {}  Reviews: {}",
        session.star_count, session.review_count
    );
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn edit(ctx: &Context, email: &str, phone: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.accounts().edit_profile(email, phone).await?;
    println!("Profile updated for {}.", session.full_name);
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn history(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let movements = ctx.api.account_movements(session.user_id).await?;

    if movements.is_empty() {
        println!("No account activity yet.");
        return Ok(());
    }
    for movement in movements {
        let sign = match movement.kind {
            MovementKind::Earn => '+',
            MovementKind::Redeem => '-',
        };
        println!(
            "{}  {sign}{} star(s)  {}",
            movement.created_at.format("%Y-%m-%d %H:%M"),
            movement.stars,
            movement.description.unwrap_or_default()
        );
    }
    Ok(())
}

/// Decode the session's `data:image/png;base64,` QR payload to a file.
#[allow(clippy::print_stdout)]
fn qr(ctx: &Context, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require_session()?;
    let encoded = session
        .qr_code
        .rsplit_once(',')
        .map_or(session.qr_code.as_str(), |(_, data)| data);

    let bytes = STANDARD.decode(encoded)?;
    let mut file = std::fs::File::create(out)?;
    file.write_all(&bytes)?;

    println!("QR code written to {}.", out.display());
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn delete(ctx: &Context, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        let answer = prompt("This cannot be undone. Type 'delete' to confirm")?;
        if answer != "delete" {
            println!("Aborted.");
            return Ok(());
        }
    }

    let message = ctx.accounts().delete_account().await?;
    info!("account deleted");
    println!(
        "{}",
        message.unwrap_or_else(|| "Your account has been deleted.".to_owned())
    );
    Ok(())
}
