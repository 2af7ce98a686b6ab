//! Loyalty refresh and celebration tracking.
//!
//! The rewards screen derives its numbers from the cumulative star count
//! (see [`LoyaltyProgress`]) and keeps them fresh two ways: an immediate
//! fetch when the screen gains focus, and a fixed 20-second interval while
//! it stays active. Refreshes are fire-and-forget - overlapping calls are
//! not coalesced and there is no backoff, matching the screen's simple
//! contract with the server.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use roastline_core::{LoyaltyProgress, UserId};

use crate::api::{ApiClient, UserRecord};

/// Fixed refresh cadence while the rewards screen is active.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(20);

/// Build the scannable loyalty payload for the QR screen.
///
/// JSON of the user's identity and star count plus the render time, so the
/// cashier's scanner can reject stale codes. Regenerated on every render
/// rather than stored.
#[must_use]
pub fn qr_payload(user_id: UserId, full_name: &str, stars: u32) -> String {
    serde_json::json!({
        "user_id": user_id,
        "full_name": full_name,
        "star_count": stars,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
    .to_string()
}

/// Emits a celebration exactly once per earned-reward crossing.
///
/// One tracker lives per screen instance; it starts at zero earned, so the
/// first observation of an account with rewards celebrates once, and later
/// refreshes stay quiet until the count actually increases.
#[derive(Debug, Clone, Default)]
pub struct CelebrationTracker {
    earned: u32,
}

impl CelebrationTracker {
    /// Tracker that has seen no rewards yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { earned: 0 }
    }

    /// Tracker primed with an already-known earned count, for callers that
    /// do not want the initial celebration.
    #[must_use]
    pub const fn with_earned(earned: u32) -> Self {
        Self { earned }
    }

    /// Observe a refreshed star count.
    ///
    /// Returns the new earned count when it increased since the last
    /// observation; `None` otherwise. The same count never fires twice.
    pub fn observe(&mut self, stars: u32) -> Option<u32> {
        let earned = LoyaltyProgress::from_stars(stars).free_coffees;
        if earned > self.earned {
            self.earned = earned;
            Some(earned)
        } else {
            None
        }
    }
}

/// Periodic re-fetcher of the user record for the rewards screen.
///
/// Spawning performs the focus fetch immediately and starts the interval
/// timer. Each tick fires an independent fetch task; a slow response does
/// not delay the next tick. Dropping the watcher clears the timer, but an
/// in-flight fetch is not cancelled - its result may still land in the
/// channel afterwards, exactly like a stale response arriving after
/// navigating away.
pub struct LoyaltyWatcher {
    api: ApiClient,
    user_id: UserId,
    tx: watch::Sender<Option<UserRecord>>,
    rx: watch::Receiver<Option<UserRecord>>,
    timer: JoinHandle<()>,
}

impl LoyaltyWatcher {
    /// Start watching a user's record.
    #[must_use]
    pub fn spawn(api: ApiClient, user_id: UserId) -> Self {
        let (tx, rx) = watch::channel(None);

        let timer = {
            let api = api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
                // The first tick completes immediately; the spawn-time
                // focus fetch already covers it.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    spawn_refresh(api.clone(), user_id, tx.clone());
                }
            })
        };

        let watcher = Self {
            api,
            user_id,
            tx,
            rx,
            timer,
        };
        watcher.refresh_now();
        watcher
    }

    /// Fire an immediate refresh (screen focus, pull-to-refresh).
    pub fn refresh_now(&self) {
        spawn_refresh(self.api.clone(), self.user_id, self.tx.clone());
    }

    /// Subscribe to refreshed user records.
    ///
    /// The receiver holds `None` until the first fetch lands.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<UserRecord>> {
        self.rx.clone()
    }
}

impl Drop for LoyaltyWatcher {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

fn spawn_refresh(api: ApiClient, user_id: UserId, tx: watch::Sender<Option<UserRecord>>) {
    tokio::spawn(async move {
        match api.user(user_id).await {
            Ok(user) => {
                let _ = tx.send(Some(user));
            }
            Err(err) => {
                tracing::warn!(error = %err, %user_id, "loyalty refresh failed");
            }
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_payload_carries_identity_and_timestamp() {
        let payload = qr_payload(UserId::new(7), "Ada Bean", 23);
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(value["user_id"], 7);
        assert_eq!(value["full_name"], "Ada Bean");
        assert_eq!(value["star_count"], 23);
        let timestamp = value["timestamp"].as_str().unwrap();
        assert!(timestamp.parse::<chrono::DateTime<chrono::Utc>>().is_ok());
    }

    #[test]
    fn test_celebration_fires_once_per_crossing() {
        let mut tracker = CelebrationTracker::new();

        assert_eq!(tracker.observe(9), None);
        assert_eq!(tracker.observe(10), Some(1));
        // Same earned count again: quiet.
        assert_eq!(tracker.observe(12), None);
        assert_eq!(tracker.observe(19), None);
        assert_eq!(tracker.observe(20), Some(2));
        assert_eq!(tracker.observe(20), None);
    }

    #[test]
    fn test_celebration_handles_multi_batch_jump() {
        let mut tracker = CelebrationTracker::new();
        assert_eq!(tracker.observe(35), Some(3));
        assert_eq!(tracker.observe(35), None);
    }

    #[test]
    fn test_primed_tracker_skips_initial_celebration() {
        let mut tracker = CelebrationTracker::with_earned(2);
        assert_eq!(tracker.observe(25), None);
        assert_eq!(tracker.observe(30), Some(3));
    }

    #[test]
    fn test_celebration_never_fires_on_decrease() {
        let mut tracker = CelebrationTracker::new();
        assert_eq!(tracker.observe(20), Some(2));
        // Counter reset server-side (e.g., redemption model change).
        assert_eq!(tracker.observe(5), None);
    }

    #[tokio::test]
    async fn test_watcher_starts_empty_and_stops_on_drop() {
        let config = crate::config::ClientConfig::new(
            "http://127.0.0.1:9/loyalty",
            std::env::temp_dir(),
        )
        .unwrap();
        let api = ApiClient::new(&config);

        let watcher = LoyaltyWatcher::spawn(api, UserId::new(1));
        let rx = watcher.subscribe();
        assert!(rx.borrow().is_none());
        drop(watcher);
    }
}
