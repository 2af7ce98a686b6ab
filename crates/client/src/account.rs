//! Account lifecycle: sign-in, registration, profile, sign-out.
//!
//! The service pairs the API client with the session repository: every
//! operation that the server confirms is mirrored into the persisted
//! session record, and screens read that record fresh on mount.

use secrecy::SecretString;
use tracing::instrument;

use roastline_core::Email;

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::models::Session;
use crate::store::SessionStore;

/// Service for the signed-in-user lifecycle.
#[derive(Clone)]
pub struct AccountService {
    api: ApiClient,
    sessions: SessionStore,
}

impl AccountService {
    /// Create the service from an API client and a session repository.
    #[must_use]
    pub const fn new(api: ApiClient, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    /// The currently persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    pub fn current(&self) -> Result<Option<Session>> {
        Ok(self.sessions.load()?)
    }

    /// Sign in and persist the returned session snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for a malformed email before any
    /// network call, or the API/store error otherwise.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: SecretString) -> Result<Session> {
        let email = parse_email(email)?;
        let payload = self.api.login(&email, &password).await?;
        let session = Session::from(payload);
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Register a new account and persist the returned session snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for a malformed email before any
    /// network call, or the API/store error otherwise.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: SecretString,
    ) -> Result<Session> {
        let email = parse_email(email)?;
        let payload = self
            .api
            .register(first_name, last_name, &email, &password)
            .await?;
        let session = Session::from(payload);
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Update contact details and merge the server-confirmed fields into
    /// the persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotSignedIn`] when no session exists.
    #[instrument(skip(self))]
    pub async fn edit_profile(&self, email: &str, phone: &str) -> Result<Session> {
        let mut session = self.require_session()?;
        let email = parse_email(email)?;

        let payload = self
            .api
            .edit_profile(session.user_id, &email, phone)
            .await?;

        session.full_name = payload.full_name;
        session.email = payload.email;
        session.phone = payload.phone;
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Re-fetch the user record and refresh the persisted counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotSignedIn`] when no session exists.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Session> {
        let mut session = self.require_session()?;
        let user = self.api.user(session.user_id).await?;

        session.full_name = user.full_name;
        session.email = user.email;
        session.phone = user.phone;
        session.star_count = user.star_count;
        session.review_count = user.review_count;
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Delete the account server-side, then clear the local session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotSignedIn`] when no session exists. The local
    /// record is only cleared after the server confirms the deletion.
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<Option<String>> {
        let session = self.require_session()?;
        let message = self.api.delete_account(session.user_id).await?;
        self.sessions.clear()?;
        Ok(message)
    }

    /// Sign out: clear the persisted session. No network call.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be removed.
    pub fn logout(&self) -> Result<()> {
        Ok(self.sessions.clear()?)
    }

    fn require_session(&self) -> Result<Session> {
        self.sessions.load()?.ok_or(AppError::NotSignedIn)
    }
}

/// Parse an email, mapping failure to the user-facing validation message.
fn parse_email(email: &str) -> Result<Email> {
    Email::parse(email)
        .map_err(|_| AppError::InvalidInput("Please enter a valid email address.".to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_rejects_garbage() {
        let err = parse_email("not-an-email").unwrap_err();
        assert_eq!(err.user_message(), "Please enter a valid email address.");
    }

    #[test]
    fn test_parse_email_accepts_valid() {
        assert!(parse_email("ada@example.com").is_ok());
    }
}
