//! Roastline Core - Shared types library.
//!
//! This crate provides common types used across all Roastline components:
//! - `client` - API client, on-device store, and presentation logic
//! - `cli` - Command-line front-end exercising the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no file
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, and
//!   loyalty-star arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
