//! Command implementations.

pub mod account;
pub mod auth;
pub mod catalog;
pub mod coupons;
pub mod favorites;
pub mod rewards;

use std::io::{self, Write};

use roastline_client::account::AccountService;
use roastline_client::api::ApiClient;
use roastline_client::config::ClientConfig;
use roastline_client::error::AppError;
use roastline_client::favorites::FavoritesService;
use roastline_client::models::Session;
use roastline_client::store::{FavoriteStore, SessionStore};

/// Shared handles every command builds on.
pub struct Context {
    pub config: ClientConfig,
    pub api: ApiClient,
}

impl Context {
    /// Load configuration from the environment and build the client.
    ///
    /// # Errors
    ///
    /// Returns the configuration error when required variables are missing.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config = ClientConfig::from_env()?;
        let api = ApiClient::new(&config);
        Ok(Self { config, api })
    }

    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(&self.config.data_dir)
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.api.clone(), self.sessions())
    }

    pub fn favorites(&self) -> FavoritesService {
        FavoritesService::new(self.api.clone(), FavoriteStore::new(&self.config.data_dir))
    }

    /// The stored session, or the sign-in-first error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotSignedIn`] when no session record exists.
    pub fn require_session(&self) -> Result<Session, AppError> {
        self.sessions().load()?.ok_or(AppError::NotSignedIn)
    }
}

/// Prompt on stdout and read one trimmed line from stdin.
#[allow(clippy::print_stdout)]
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}
