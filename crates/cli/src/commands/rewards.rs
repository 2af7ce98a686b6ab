//! Loyalty progress display, with an optional live-refresh mode.

use roastline_client::loyalty::{self, CelebrationTracker, LoyaltyWatcher, REFRESH_INTERVAL};
use roastline_core::LoyaltyProgress;

use super::Context;

/// Show the loyalty progress; with `watch`, keep it fresh on the loyalty
/// cadence until interrupted.
///
/// # Errors
///
/// Returns the client error when not signed in or the watch loop fails.
#[allow(clippy::print_stdout)]
pub async fn run(ctx: &Context, watch: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.accounts().refresh().await?;
    print_progress(&session.full_name, session.star_count);
    println!(
        "Scan payload: {}",
        loyalty::qr_payload(session.user_id, &session.full_name, session.star_count)
    );

    if !watch {
        return Ok(());
    }

    println!(
        "\nRefreshing every {} seconds. Press Ctrl-C to stop.",
        REFRESH_INTERVAL.as_secs()
    );

    let progress = LoyaltyProgress::from_stars(session.star_count);
    let mut tracker = CelebrationTracker::with_earned(progress.free_coffees);

    let watcher = LoyaltyWatcher::spawn(ctx.api.clone(), session.user_id);
    let mut updates = watcher.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(user) = updates.borrow_and_update().clone() else {
                    continue;
                };
                print_progress(&user.full_name, user.star_count);
                if let Some(earned) = tracker.observe(user.star_count) {
                    println!("*** Free coffee number {earned} earned! ***");
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_progress(name: &str, stars: u32) {
    let progress = LoyaltyProgress::from_stars(stars);
    println!(
        "{name}: {stars} star(s) | {} free coffee(s) earned | {} to the next (cycle {:.0}% full)",
        progress.free_coffees,
        progress.remaining_to_next,
        progress.progress * 100.0
    );
}
