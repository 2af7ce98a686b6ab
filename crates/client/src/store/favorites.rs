//! Persisted favorite-ID repository.

use std::path::Path;

use roastline_core::ProductId;

use super::{KeyValueStore, StoreError};

/// Fixed storage key for the favorite-ID list.
const FAVORITES_KEY: &str = "favorites";

/// Repository for the locally cached favorite-product ID list.
///
/// Mirrors the server per add/remove round trip, with no transactional
/// guarantee: a call that fails midway can leave the two sets diverged.
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    kv: KeyValueStore,
}

impl FavoriteStore {
    /// Open the favorites store rooted at the data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            kv: KeyValueStore::new(data_dir),
        }
    }

    /// Load the cached ID list; empty when never written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if a record exists but cannot be
    /// parsed.
    pub fn load(&self) -> Result<Vec<ProductId>, StoreError> {
        Ok(self.kv.read(FAVORITES_KEY)?.unwrap_or_default())
    }

    /// Overwrite the cached ID list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the record cannot be written.
    pub fn save(&self, ids: &[ProductId]) -> Result<(), StoreError> {
        self.kv.write(FAVORITES_KEY, &ids)
    }

    /// Whether a product is in the cached list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the record cannot be parsed.
    pub fn contains(&self, product_id: ProductId) -> Result<bool, StoreError> {
        Ok(self.load()?.contains(&product_id))
    }

    /// Drop the cached list entirely.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the record exists but cannot be removed.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(FAVORITES_KEY)
    }
}
