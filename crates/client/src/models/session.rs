//! The persisted session record.

use serde::{Deserialize, Serialize};

use roastline_core::UserId;

use crate::api::AuthPayload;

/// Snapshot of the signed-in user, persisted on the device.
///
/// Created on login or registration, overwritten on profile edit, deleted
/// on logout or account deletion. The device owns this record; it mirrors
/// server state but is not authoritative, and a record written by an older
/// build is trusted as-is (no schema version tag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub star_count: u32,
    #[serde(default)]
    pub review_count: u32,
    /// QR code as a `data:image/png;base64,...` URI, ready to render.
    pub qr_code: String,
}

impl From<AuthPayload> for Session {
    fn from(payload: AuthPayload) -> Self {
        Self {
            user_id: payload.user_id,
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            star_count: payload.star_count,
            review_count: payload.review_count,
            qr_code: format!("data:image/png;base64,{}", payload.qr_code),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_auth_payload_wraps_qr() {
        let payload: AuthPayload = serde_json::from_str(
            r#"{
                "user_id": 5,
                "full_name": "Ada Bean",
                "email": "ada@example.com",
                "star_count": 12,
                "review_count": 3,
                "qr_code": "aGVsbG8="
            }"#,
        )
        .unwrap();

        let session = Session::from(payload);
        assert_eq!(session.qr_code, "data:image/png;base64,aGVsbG8=");
        assert_eq!(session.user_id, UserId::new(5));
    }

    #[test]
    fn test_session_tolerates_old_records() {
        // A record from a previous build without the counters still loads.
        let session: Session = serde_json::from_str(
            r#"{
                "user_id": 5,
                "full_name": "Ada Bean",
                "email": "ada@example.com",
                "qr_code": "data:image/png;base64,aGVsbG8="
            }"#,
        )
        .unwrap();
        assert_eq!(session.star_count, 0);
        assert!(session.phone.is_none());
    }
}
