//! Wire types for the loyalty API.
//!
//! Every endpoint response is declared here as an explicit schema and
//! parsed at the boundary. A field the server fails to send is either
//! defaulted (where the screens tolerate it) or rejected as a malformed
//! response - fields are never assumed present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roastline_core::{CampaignId, CommentId, CouponId, MovementId, ProductId, UserId};

// =============================================================================
// Catalog
// =============================================================================

/// A menu product.
///
/// Sourced fresh from the API on each menu load; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Empty when the server has not categorized the product yet; grouping
    /// folds these into the placeholder category.
    #[serde(default)]
    pub category: String,
    /// String-encoded price, parsed numerically only when sorting.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Average review rating, 0.0 when unreviewed.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// A customer review embedded in a product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: CommentId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
    pub rating: u8,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A promotional campaign shown on the campaigns screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    #[serde(default)]
    pub teaser: String,
    #[serde(default)]
    pub image: Option<String>,
}

// =============================================================================
// Account
// =============================================================================

/// The user record returned by the user-lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub star_count: u32,
    #[serde(default)]
    pub review_count: u32,
}

/// A star-ledger entry on the account-history screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub kind: MovementKind,
    pub stars: u32,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Direction of a star-ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Earn,
    Redeem,
}

/// A redeemable coupon. Fetched per request, never cached on the device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    #[serde(default)]
    pub code: String,
    pub star_cost: u32,
    #[serde(default)]
    pub used: bool,
}

// =============================================================================
// Response payloads
// =============================================================================

/// Payload of a successful login or registration.
///
/// `qr_code` is the base64-encoded PNG the cashier scans; registration
/// responses omit the phone number.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub star_count: u32,
    #[serde(default)]
    pub review_count: u32,
    pub qr_code: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of a successful profile edit: the server-confirmed fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePayload {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payload of a send-code call.
///
/// The server echoes the verification code it mailed; the forgot-password
/// flow compares against it client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct SendCodePayload {
    pub user_id: UserId,
    pub verification_code: String,
}

/// Payload of a favorite add/remove call.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteTogglePayload {
    pub action: FavoriteAction,
    pub is_favorite: bool,
}

/// What the server did with the favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteAction {
    Added,
    Removed,
}

/// Payload carrying only an optional status message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// Product-list payloads (`menu`, `featured-menu`, `most-reviewed`).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductListPayload {
    pub data: Vec<Product>,
}

/// Campaign-list payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignListPayload {
    pub data: Vec<Campaign>,
}

/// Favorites payload: the server-side favorite products for a user.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoritesPayload {
    pub favorites: Vec<Product>,
}

/// Coupons payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponsPayload {
    pub coupons: Vec<Coupon>,
}

/// User-lookup payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub user: UserRecord,
}

/// Account-movement payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MovementsPayload {
    pub movements: Vec<Movement>,
}

/// Comment-add payload; the created review when the server echoes it.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentPayload {
    #[serde(default)]
    pub comment: Option<Review>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_defaults_missing_fields() {
        let product: Product = serde_json::from_str(r#"{"id": 3, "name": "Latte"}"#).unwrap();
        assert_eq!(product.name, "Latte");
        assert!(product.category.is_empty());
        assert!(product.reviews.is_empty());
        assert!(product.rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_rejects_missing_id() {
        assert!(serde_json::from_str::<Product>(r#"{"name": "Latte"}"#).is_err());
    }

    #[test]
    fn test_favorite_action_wire_names() {
        let action: FavoriteAction = serde_json::from_str(r#""added""#).unwrap();
        assert_eq!(action, FavoriteAction::Added);
        let action: FavoriteAction = serde_json::from_str(r#""removed""#).unwrap();
        assert_eq!(action, FavoriteAction::Removed);
    }

    #[test]
    fn test_movement_kind_wire_names() {
        let kind: MovementKind = serde_json::from_str(r#""earn""#).unwrap();
        assert_eq!(kind, MovementKind::Earn);
    }

    #[test]
    fn test_auth_payload_tolerates_missing_phone() {
        let payload: AuthPayload = serde_json::from_str(
            r#"{
                "user_id": 12,
                "full_name": "Ada Bean",
                "email": "ada@example.com",
                "star_count": 23,
                "review_count": 4,
                "qr_code": "aGVsbG8="
            }"#,
        )
        .unwrap();
        assert!(payload.phone.is_none());
        assert_eq!(payload.star_count, 23);
    }
}
