//! Roastline client - the device-side core of the loyalty app.
//!
//! Everything a screen needs sits behind this crate: a typed client for the
//! remote loyalty API, an on-device store for the session snapshot and the
//! favorite-product list, and the derivation logic the screens render
//! (loyalty progress, menu grouping and filtering, the forgot-password
//! flow). Screens call an operation, persist or read local state, derive
//! presentation values, and render - there is no other control flow.
//!
//! # Modules
//!
//! - [`api`] - HTTP client for the remote loyalty endpoints
//! - [`store`] - on-device key-value persistence (session, favorites)
//! - [`account`] - login/registration/profile lifecycle
//! - [`favorites`] - favorite toggling and reconciliation
//! - [`loyalty`] - star-count derivation and periodic refresh
//! - [`menu`] - grouping, filtering, and sorting of product lists
//! - [`password_reset`] - the three-step forgot-password flow
//!
//! # Example
//!
//! ```rust,ignore
//! use roastline_client::account::AccountService;
//! use roastline_client::api::ApiClient;
//! use roastline_client::config::ClientConfig;
//! use roastline_client::store::SessionStore;
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config);
//! let accounts = AccountService::new(api, SessionStore::new(&config.data_dir));
//! let session = accounts.login("user@example.com", "hunter42".into()).await?;
//! println!("signed in as {}", session.full_name);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod api;
pub mod config;
pub mod error;
pub mod favorites;
pub mod loyalty;
pub mod menu;
pub mod models;
pub mod password_reset;
pub mod store;

pub use error::{AppError, Result};
