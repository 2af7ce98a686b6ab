//! Persisted session repository.

use std::path::Path;

use crate::models::Session;

use super::{KeyValueStore, StoreError};

/// Fixed storage key for the session record.
const SESSION_KEY: &str = "userData";

/// Repository for the persisted session record.
///
/// One record per device, overwritten whole on every save. Screens load it
/// fresh on mount rather than holding a shared in-memory copy.
#[derive(Debug, Clone)]
pub struct SessionStore {
    kv: KeyValueStore,
}

impl SessionStore {
    /// Open the session store rooted at the data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            kv: KeyValueStore::new(data_dir),
        }
    }

    /// Persist the session, overwriting any previous record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the record cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.kv.write(SESSION_KEY, session)
    }

    /// Load the session; `None` when the user never signed in.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if a record exists but cannot be
    /// parsed.
    pub fn load(&self) -> Result<Option<Session>, StoreError> {
        self.kv.read(SESSION_KEY)
    }

    /// Delete the session record (logout, account deletion).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the record exists but cannot be removed.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(SESSION_KEY)
    }
}
