//! Loyalty star arithmetic.
//!
//! Stars accumulate one per purchase and are redeemable in batches of
//! [`STARS_PER_REWARD`] for a free drink. Progress is derived, never stored.

use serde::{Deserialize, Serialize};

/// Stars needed to earn one free drink.
pub const STARS_PER_REWARD: u32 = 10;

/// Derived loyalty state for a cumulative star count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgress {
    /// Cumulative star count the progress was derived from.
    pub stars: u32,
    /// Free drinks earned so far.
    pub free_coffees: u32,
    /// Stars still needed for the next free drink (1..=10).
    pub remaining_to_next: u32,
    /// Fraction of the current batch completed, in `[0.0, 1.0)`.
    pub progress: f64,
}

impl LoyaltyProgress {
    /// Derive progress from a cumulative star count.
    ///
    /// ```
    /// use roastline_core::LoyaltyProgress;
    ///
    /// let p = LoyaltyProgress::from_stars(23);
    /// assert_eq!(p.free_coffees, 2);
    /// assert_eq!(p.remaining_to_next, 7);
    /// assert!((p.progress - 0.3).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn from_stars(stars: u32) -> Self {
        let in_cycle = stars % STARS_PER_REWARD;
        Self {
            stars,
            free_coffees: stars / STARS_PER_REWARD,
            remaining_to_next: STARS_PER_REWARD - in_cycle,
            progress: f64::from(in_cycle) / f64::from(STARS_PER_REWARD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stars() {
        let p = LoyaltyProgress::from_stars(0);
        assert_eq!(p.free_coffees, 0);
        assert_eq!(p.remaining_to_next, 10);
        assert!(p.progress.abs() < f64::EPSILON);
    }

    #[test]
    fn test_exact_batch_boundary() {
        let p = LoyaltyProgress::from_stars(10);
        assert_eq!(p.free_coffees, 1);
        assert_eq!(p.remaining_to_next, 10);
        assert!(p.progress.abs() < f64::EPSILON);
    }

    #[test]
    fn test_mid_batch() {
        let p = LoyaltyProgress::from_stars(37);
        assert_eq!(p.free_coffees, 3);
        assert_eq!(p.remaining_to_next, 3);
        assert!((p.progress - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_derivation_holds_over_range() {
        for stars in 0..=200 {
            let p = LoyaltyProgress::from_stars(stars);
            assert_eq!(p.free_coffees, stars / 10);
            assert!(p.remaining_to_next >= 1 && p.remaining_to_next <= 10);
            assert!(p.progress >= 0.0 && p.progress < 1.0);
        }
    }
}
