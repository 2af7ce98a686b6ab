//! HTTP client for the remote loyalty API.
//!
//! # Architecture
//!
//! - A fixed set of JSON endpoints under one base URL; POST bodies in,
//!   `{ "success": bool, ...payload | "error": string }` envelopes out
//! - Every response is parsed against an explicit schema in [`types`];
//!   a 2xx body that does not match yields [`ApiError::Malformed`]
//! - Required arguments are validated on the device first, so bad input
//!   never costs a network round trip
//! - One attempt per call - no retries, no backoff. Favorites, comments,
//!   coupons, and user-lookup calls carry a short per-request timeout;
//!   everything else inherits the client default
//!
//! # Example
//!
//! ```rust,ignore
//! use roastline_client::api::ApiClient;
//!
//! let client = ApiClient::new(&config);
//! let products = client.menu().await?;
//! let favorites = client.favorites(user_id).await?;
//! ```

pub mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::instrument;

use roastline_core::{CouponId, Email, ProductId, UserId};

use crate::config::ClientConfig;

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Endpoint paths under the configured base URL.
mod endpoints {
    pub const SEND_CODE: &str = "send-code.php";
    pub const SEND_RESET_CODE: &str = "send-reset-code.php";
    pub const REGISTER: &str = "register.php";
    pub const LOGIN: &str = "login.php";
    pub const EDIT_PROFILE: &str = "edit-profile.php";
    pub const DELETE_ACCOUNT: &str = "delete-account.php";
    pub const RESET_PASSWORD: &str = "reset-password.php";
    pub const MENU: &str = "menu.php";
    pub const FEATURED_MENU: &str = "featured-menu.php";
    pub const CAMPAIGNS: &str = "campaigns.php";
    pub const MOST_REVIEWED: &str = "most-reviewed.php";
    pub const FAVORITE_ADD: &str = "favorite-add.php";
    pub const FAVORITE_REMOVE: &str = "favorite-remove.php";
    pub const COMMENT_ADD: &str = "comment-add.php";
    pub const FAVORITES: &str = "favorites.php";
    pub const COUPONS: &str = "coupons.php";
    pub const COUPON_USE: &str = "coupon-use.php";
    pub const USER: &str = "user.php";
    pub const ACCOUNT_MOVEMENTS: &str = "account-movements.php";
}

/// Errors that can occur when calling the loyalty API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected on the device; no network call was made.
    #[error("{0}")]
    Validation(String),

    /// HTTP request failed (timeout, connection failure).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status with no parseable error envelope.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// Server responded `success=false` with a message.
    #[error("server error: {0}")]
    Api(String),

    /// A 2xx body that does not match the declared response schema.
    #[error("malformed response from {endpoint}: {detail}")]
    Malformed {
        endpoint: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// The user-facing message string for this failure.
    ///
    /// Transport-class faults collapse to a generic connection message;
    /// validation and server messages pass through verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Api(msg) => msg.clone(),
            Self::Transport(err) if err.is_timeout() => {
                "The request timed out. Please try again.".to_owned()
            }
            Self::Transport(_) | Self::Status(_) => {
                "Connection error. Please check your internet connection.".to_owned()
            }
            Self::Malformed { .. } => {
                "The server sent an unexpected response. Please try again.".to_owned()
            }
        }
    }
}

/// Client for the loyalty API.
///
/// Cheaply cloneable; all clones share one HTTP connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    short_call_timeout: Duration,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                short_call_timeout: config.short_call_timeout,
            }),
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.inner.base_url, endpoint)
    }

    /// POST a JSON body and parse the response envelope.
    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: serde_json::Value,
        timeout: Option<Duration>,
    ) -> Result<T, ApiError> {
        let mut request = self
            .inner
            .client
            .post(self.endpoint_url(endpoint))
            .json(&body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        self.execute(endpoint, request).await
    }

    /// GET an endpoint and parse the response envelope.
    async fn get<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, ApiError> {
        self.execute(endpoint, self.inner.client.get(self.endpoint_url(endpoint)))
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        parse_envelope(endpoint, status, &text)
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Send a verification code to an email address.
    ///
    /// The server reports success even for unregistered addresses, so this
    /// call leaks nothing about account existence.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn send_code(&self, email: &Email) -> Result<SendCodePayload, ApiError> {
        self.post(endpoints::SEND_CODE, json!({ "email": email }), None)
            .await
    }

    /// Send a password-reset verification code.
    ///
    /// Same contract as [`send_code`](Self::send_code); used by the
    /// forgot-password flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn send_reset_code(&self, email: &Email) -> Result<SendCodePayload, ApiError> {
        self.post(endpoints::SEND_RESET_CODE, json!({ "email": email }), None)
            .await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without a network call when a name
    /// is blank or the password is shorter than six characters.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthPayload, ApiError> {
        require_filled(&[first_name, last_name])?;
        if password.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::Validation(
                "The password must be at least 6 characters.".to_owned(),
            ));
        }

        self.post(
            endpoints::REGISTER,
            json!({
                "first_name": first_name,
                "last_name": last_name,
                "email": email,
                "password": password.expose_secret(),
            }),
            None,
        )
        .await
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without a network call when the
    /// password is empty.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthPayload, ApiError> {
        require_filled(&[password.expose_secret()])?;

        self.post(
            endpoints::LOGIN,
            json!({
                "email": email,
                "password": password.expose_secret(),
            }),
            None,
        )
        .await
    }

    /// Update the signed-in user's contact details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without a network call when the
    /// phone number is blank.
    #[instrument(skip(self))]
    pub async fn edit_profile(
        &self,
        user_id: UserId,
        email: &Email,
        phone: &str,
    ) -> Result<ProfilePayload, ApiError> {
        require_filled(&[phone])?;

        self.post(
            endpoints::EDIT_PROFILE,
            json!({
                "user_id": user_id,
                "email": email,
                "phone": phone,
            }),
            None,
        )
        .await
    }

    /// Delete the user's account. Irreversible server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: UserId) -> Result<Option<String>, ApiError> {
        let payload: MessagePayload = self
            .post(endpoints::DELETE_ACCOUNT, json!({ "user_id": user_id }), None)
            .await?;
        Ok(payload.message)
    }

    /// Set a new password for a user identified by the reset flow.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without a network call when the new
    /// password is empty.
    #[instrument(skip(self, new_password))]
    pub async fn reset_password(
        &self,
        user_id: UserId,
        new_password: &SecretString,
    ) -> Result<Option<String>, ApiError> {
        require_filled(&[new_password.expose_secret()])?;

        let payload: MessagePayload = self
            .post(
                endpoints::RESET_PASSWORD,
                json!({
                    "user_id": user_id,
                    "new_password": new_password.expose_secret(),
                }),
                None,
            )
            .await?;
        Ok(payload.message)
    }

    /// Fetch the current user record (name, counters).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails within the short timeout.
    #[instrument(skip(self))]
    pub async fn user(&self, user_id: UserId) -> Result<UserRecord, ApiError> {
        let payload: UserPayload = self
            .post(
                endpoints::USER,
                json!({ "user_id": user_id }),
                Some(self.inner.short_call_timeout),
            )
            .await?;
        Ok(payload.user)
    }

    /// Fetch the star-ledger history for the account screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails within the short timeout.
    #[instrument(skip(self))]
    pub async fn account_movements(&self, user_id: UserId) -> Result<Vec<Movement>, ApiError> {
        let payload: MovementsPayload = self
            .post(
                endpoints::ACCOUNT_MOVEMENTS,
                json!({ "user_id": user_id }),
                Some(self.inner.short_call_timeout),
            )
            .await?;
        Ok(payload.movements)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full menu. Never cached; each load hits the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn menu(&self) -> Result<Vec<Product>, ApiError> {
        let payload: ProductListPayload = self.get(endpoints::MENU).await?;
        Ok(payload.data)
    }

    /// Fetch the featured products for the dashboard rail.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn featured_menu(&self) -> Result<Vec<Product>, ApiError> {
        let payload: ProductListPayload = self.get(endpoints::FEATURED_MENU).await?;
        Ok(payload.data)
    }

    /// Fetch the active promotional campaigns.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        let payload: CampaignListPayload = self.get(endpoints::CAMPAIGNS).await?;
        Ok(payload.data)
    }

    /// Fetch the most-reviewed products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn most_reviewed(&self) -> Result<Vec<Product>, ApiError> {
        let payload: ProductListPayload = self.get(endpoints::MOST_REVIEWED).await?;
        Ok(payload.data)
    }

    // =========================================================================
    // Favorites & reviews
    // =========================================================================

    /// Mark a product as a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails within the short timeout.
    #[instrument(skip(self))]
    pub async fn add_favorite(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<FavoriteTogglePayload, ApiError> {
        self.post(
            endpoints::FAVORITE_ADD,
            json!({ "user_id": user_id, "product_id": product_id }),
            Some(self.inner.short_call_timeout),
        )
        .await
    }

    /// Remove a product from the favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails within the short timeout.
    #[instrument(skip(self))]
    pub async fn remove_favorite(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<FavoriteTogglePayload, ApiError> {
        self.post(
            endpoints::FAVORITE_REMOVE,
            json!({ "user_id": user_id, "product_id": product_id }),
            Some(self.inner.short_call_timeout),
        )
        .await
    }

    /// Fetch the server-side favorite products.
    ///
    /// This is the server's truth for the favorites screen; the menu screen
    /// works from the locally cached ID list instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails within the short timeout.
    #[instrument(skip(self))]
    pub async fn favorites(&self, user_id: UserId) -> Result<Vec<Product>, ApiError> {
        let payload: FavoritesPayload = self
            .post(
                endpoints::FAVORITES,
                json!({ "user_id": user_id }),
                Some(self.inner.short_call_timeout),
            )
            .await?;
        Ok(payload.favorites)
    }

    /// Post a review for a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without a network call when the
    /// review text is blank.
    #[instrument(skip(self, text))]
    pub async fn add_comment(
        &self,
        user_id: UserId,
        product_id: ProductId,
        text: &str,
        rating: u8,
    ) -> Result<CommentPayload, ApiError> {
        require_filled(&[text])?;

        self.post(
            endpoints::COMMENT_ADD,
            json!({
                "user_id": user_id,
                "product_id": product_id,
                "text": text,
                "rating": rating,
            }),
            Some(self.inner.short_call_timeout),
        )
        .await
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Fetch the user's coupons.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails within the short timeout.
    #[instrument(skip(self))]
    pub async fn coupons(&self, user_id: UserId) -> Result<Vec<Coupon>, ApiError> {
        let payload: CouponsPayload = self
            .post(
                endpoints::COUPONS,
                json!({ "user_id": user_id }),
                Some(self.inner.short_call_timeout),
            )
            .await?;
        Ok(payload.coupons)
    }

    /// Redeem a coupon; the server flips its used flag.
    ///
    /// Callers re-fetch the coupon list afterwards - nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails within the short timeout.
    #[instrument(skip(self))]
    pub async fn use_coupon(
        &self,
        user_id: UserId,
        coupon_id: CouponId,
    ) -> Result<Option<String>, ApiError> {
        let payload: MessagePayload = self
            .post(
                endpoints::COUPON_USE,
                json!({ "user_id": user_id, "coupon_id": coupon_id }),
                Some(self.inner.short_call_timeout),
            )
            .await?;
        Ok(payload.message)
    }
}

/// Reject blank required fields before any network call.
fn require_filled(fields: &[&str]) -> Result<(), ApiError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ApiError::Validation(
            "Please fill in every field.".to_owned(),
        ));
    }
    Ok(())
}

/// Classify a raw response into a typed payload or an [`ApiError`].
///
/// Order matters: a non-2xx status with a parseable `error` field is a
/// server message, not a transport fault; an unparseable non-2xx body is.
fn parse_envelope<T: DeserializeOwned>(
    endpoint: &'static str,
    status: reqwest::StatusCode,
    text: &str,
) -> Result<T, ApiError> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) if status.is_success() => {
            tracing::error!(
                endpoint,
                error = %e,
                body = %truncate(text),
                "failed to parse API response"
            );
            return Err(ApiError::Malformed {
                endpoint,
                detail: e.to_string(),
            });
        }
        Err(_) => {
            tracing::error!(
                endpoint,
                status = %status,
                body = %truncate(text),
                "API returned non-success status"
            );
            return Err(ApiError::Status(status));
        }
    };

    let success = value
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    if !success {
        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return Err(ApiError::Api(message.to_owned()));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        return Err(ApiError::Api(
            "The operation could not be completed.".to_owned(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::error!(
            endpoint,
            error = %e,
            body = %truncate(text),
            "API response did not match the declared schema"
        );
        ApiError::Malformed {
            endpoint,
            detail: e.to_string(),
        }
    })
}

fn truncate(text: &str) -> String {
    text.chars().take(500).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_parse_envelope_success_payload() {
        let payload: MessagePayload = parse_envelope(
            "coupon-use.php",
            StatusCode::OK,
            r#"{"success": true, "message": "Coupon redeemed"}"#,
        )
        .unwrap();
        assert_eq!(payload.message.as_deref(), Some("Coupon redeemed"));
    }

    #[test]
    fn test_parse_envelope_server_error_message() {
        let result: Result<MessagePayload, ApiError> = parse_envelope(
            "coupon-use.php",
            StatusCode::OK,
            r#"{"success": false, "error": "Not enough stars"}"#,
        );
        match result {
            Err(ApiError::Api(message)) => assert_eq!(message, "Not enough stars"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_envelope_error_message_wins_over_status() {
        // A 4xx with a parseable envelope is a server message, not transport.
        let result: Result<MessagePayload, ApiError> = parse_envelope(
            "login.php",
            StatusCode::UNAUTHORIZED,
            r#"{"success": false, "error": "Wrong email or password"}"#,
        );
        assert!(matches!(result, Err(ApiError::Api(m)) if m == "Wrong email or password"));
    }

    #[test]
    fn test_parse_envelope_unparseable_non_2xx_is_status() {
        let result: Result<MessagePayload, ApiError> = parse_envelope(
            "menu.php",
            StatusCode::BAD_GATEWAY,
            "<html>502 Bad Gateway</html>",
        );
        assert!(matches!(result, Err(ApiError::Status(s)) if s == StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_parse_envelope_malformed_2xx_body() {
        let result: Result<UserPayload, ApiError> = parse_envelope(
            "user.php",
            StatusCode::OK,
            r#"{"success": true, "user": "not an object"}"#,
        );
        assert!(matches!(result, Err(ApiError::Malformed { endpoint, .. }) if endpoint == "user.php"));
    }

    #[test]
    fn test_parse_envelope_non_json_2xx_is_malformed() {
        let result: Result<MessagePayload, ApiError> =
            parse_envelope("user.php", StatusCode::OK, "not json at all");
        assert!(matches!(result, Err(ApiError::Malformed { .. })));
    }

    #[test]
    fn test_parse_envelope_missing_success_flag() {
        let result: Result<MessagePayload, ApiError> =
            parse_envelope("user.php", StatusCode::OK, r"{}");
        assert!(matches!(result, Err(ApiError::Api(_))));
    }

    #[test]
    fn test_require_filled_rejects_blank() {
        assert!(require_filled(&["ok", "  "]).is_err());
        assert!(require_filled(&["ok", "fine"]).is_ok());
    }

    #[test]
    fn test_user_messages_are_generic_for_transport_class() {
        let err = ApiError::Status(StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.user_message(),
            "Connection error. Please check your internet connection."
        );

        let err = ApiError::Malformed {
            endpoint: "menu.php",
            detail: "x".to_owned(),
        };
        assert!(err.user_message().contains("unexpected response"));
    }
}
