//! Favorite toggling and reconciliation.
//!
//! Each product is either favorited or not; a single toggle flips it. The
//! direction of the remote call is chosen from the *locally cached* ID
//! list, the remote call runs first, and the cache is updated only with
//! the state the server confirms - a failed call leaves the cache
//! untouched and surfaces the error.
//!
//! Two sources of truth exist by design and can diverge: the menu path
//! trusts the local cached list, while the favorites screen renders the
//! server's `favorites.php` response. [`FavoritesService::reconcile`]
//! overwrites the local list with the server's for callers that want to
//! converge. Toggles are not serialized against each other; two rapid
//! toggles of the same product race on the read-modify-write of the list.

use tracing::instrument;

use roastline_core::{ProductId, UserId};

use crate::api::{ApiClient, Product};
use crate::error::Result;
use crate::store::FavoriteStore;

/// Result of a confirmed favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub product_id: ProductId,
    /// Membership after the toggle, as confirmed by the server.
    pub is_favorite: bool,
}

/// Service pairing the API client with the local favorite-ID cache.
#[derive(Clone)]
pub struct FavoritesService {
    api: ApiClient,
    store: FavoriteStore,
}

impl FavoritesService {
    /// Create the service from an API client and the favorites repository.
    #[must_use]
    pub const fn new(api: ApiClient, store: FavoriteStore) -> Self {
        Self { api, store }
    }

    /// The locally cached favorite IDs (the menu screen's source of truth).
    ///
    /// # Errors
    ///
    /// Returns an error if the cached record cannot be read.
    pub fn local_ids(&self) -> Result<Vec<ProductId>> {
        Ok(self.store.load()?)
    }

    /// Whether a product is favorited according to the local cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the cached record cannot be read.
    pub fn is_favorite(&self, product_id: ProductId) -> Result<bool> {
        Ok(self.store.contains(product_id)?)
    }

    /// Toggle a product's favorite state.
    ///
    /// Reads the local list to pick add or remove, performs the remote
    /// call, and only then folds the server-confirmed state back into the
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns the API error when the remote call fails; the local cache
    /// is left unchanged in that case.
    #[instrument(skip(self))]
    pub async fn toggle(&self, user_id: UserId, product_id: ProductId) -> Result<ToggleOutcome> {
        let mut ids = self.store.load()?;
        let currently_favorite = ids.contains(&product_id);

        let payload = if currently_favorite {
            self.api.remove_favorite(user_id, product_id).await?
        } else {
            self.api.add_favorite(user_id, product_id).await?
        };

        apply_confirmed(&mut ids, product_id, payload.is_favorite);
        self.store.save(&ids)?;

        Ok(ToggleOutcome {
            product_id,
            is_favorite: payload.is_favorite,
        })
    }

    /// The server-side favorite products (the favorites screen's truth).
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails.
    #[instrument(skip(self))]
    pub async fn fetch_remote(&self, user_id: UserId) -> Result<Vec<Product>> {
        Ok(self.api.favorites(user_id).await?)
    }

    /// Replace the local ID cache with the server's favorite set.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails or the cache cannot be
    /// written.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, user_id: UserId) -> Result<Vec<ProductId>> {
        let products = self.api.favorites(user_id).await?;
        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        self.store.save(&ids)?;
        Ok(ids)
    }
}

/// Fold a server-confirmed membership state into the cached list.
fn apply_confirmed(ids: &mut Vec<ProductId>, product_id: ProductId, is_favorite: bool) {
    ids.retain(|id| *id != product_id);
    if is_favorite {
        ids.push(product_id);
    }
}
