//! Core types for Roastline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod stars;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use stars::{LoyaltyProgress, STARS_PER_REWARD};
