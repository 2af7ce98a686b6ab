//! The three-step forgot-password flow.
//!
//! `CollectEmail -> CollectCode -> CollectNewPassword -> Done`, with no
//! backward transitions: abandoning the flow means dropping it, and
//! nothing persists across restarts mid-flow.
//!
//! Contract caveat, flagged for the API owners: the send-reset-code
//! endpoint echoes the verification code in its own response, and the
//! comparison at the code step happens entirely client-side - the code is
//! visible to the very caller it is meant to verify, and the server never
//! re-checks it at the reset step. This module follows that contract; it
//! does not pretend to fix it.

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use roastline_core::{Email, UserId};

use crate::api::ApiClient;
use crate::error::{AppError, Result};

/// Public view of the flow position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStage {
    CollectEmail,
    CollectCode,
    CollectNewPassword,
    Done,
}

enum State {
    CollectEmail,
    CollectCode {
        user_id: UserId,
        expected_code: String,
    },
    CollectNewPassword {
        user_id: UserId,
    },
    Done,
}

/// One in-progress forgot-password flow.
pub struct PasswordResetFlow {
    api: ApiClient,
    state: State,
}

impl PasswordResetFlow {
    /// Start a fresh flow at the email step.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: State::CollectEmail,
        }
    }

    /// Where the flow currently stands.
    #[must_use]
    pub const fn stage(&self) -> ResetStage {
        match self.state {
            State::CollectEmail => ResetStage::CollectEmail,
            State::CollectCode { .. } => ResetStage::CollectCode,
            State::CollectNewPassword { .. } => ResetStage::CollectNewPassword,
            State::Done => ResetStage::Done,
        }
    }

    /// Submit the account email and request a verification code.
    ///
    /// The server reports success even for unregistered addresses, so this
    /// step leaks nothing about account existence. On success the flow
    /// advances to the code step.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for a malformed email or when the
    /// flow is past this step; API errors keep the flow at the email step.
    #[instrument(skip(self))]
    pub async fn submit_email(&mut self, email: &str) -> Result<()> {
        if !matches!(self.state, State::CollectEmail) {
            return Err(flow_out_of_step());
        }
        let email = Email::parse(email).map_err(|_| {
            AppError::InvalidInput("Please enter a valid email address.".to_owned())
        })?;

        let payload = self.api.send_reset_code(&email).await?;
        self.state = State::CollectCode {
            user_id: payload.user_id,
            expected_code: payload.verification_code,
        };
        Ok(())
    }

    /// Compare the user-entered code against the server-echoed one.
    ///
    /// Purely client-side. A match advances to the new-password step; a
    /// mismatch keeps the flow here and returns an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for an empty or wrong code, or
    /// when the flow is not at this step.
    pub fn submit_code(&mut self, entered: &str) -> Result<()> {
        let State::CollectCode {
            user_id,
            expected_code,
        } = &self.state
        else {
            return Err(flow_out_of_step());
        };
        let user_id = *user_id;

        if entered.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Please enter the verification code.".to_owned(),
            ));
        }
        if entered != expected_code {
            return Err(AppError::InvalidInput(
                "The verification code is wrong.".to_owned(),
            ));
        }

        self.state = State::CollectNewPassword { user_id };
        Ok(())
    }

    /// Submit the new password and its confirmation, completing the flow.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] when the two entries differ or
    /// the flow is not at this step; API errors keep the flow here so the
    /// user can retry.
    #[instrument(skip(self, new_password, confirmation))]
    pub async fn submit_new_password(
        &mut self,
        new_password: SecretString,
        confirmation: SecretString,
    ) -> Result<Option<String>> {
        let State::CollectNewPassword { user_id } = &self.state else {
            return Err(flow_out_of_step());
        };
        let user_id = *user_id;

        if new_password.expose_secret() != confirmation.expose_secret() {
            return Err(AppError::InvalidInput(
                "The passwords do not match.".to_owned(),
            ));
        }

        let message = self.api.reset_password(user_id, &new_password).await?;
        self.state = State::Done;
        Ok(message)
    }
}

fn flow_out_of_step() -> AppError {
    AppError::InvalidInput("This step is not available right now.".to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn flow_at_code_step(expected_code: &str) -> PasswordResetFlow {
        let config =
            ClientConfig::new("http://127.0.0.1:9/loyalty", std::env::temp_dir()).unwrap();
        PasswordResetFlow {
            api: ApiClient::new(&config),
            state: State::CollectCode {
                user_id: UserId::new(42),
                expected_code: expected_code.to_owned(),
            },
        }
    }

    #[test]
    fn test_matching_code_advances() {
        let mut flow = flow_at_code_step("123456");
        flow.submit_code("123456").unwrap();
        assert_eq!(flow.stage(), ResetStage::CollectNewPassword);
    }

    #[test]
    fn test_wrong_code_stays_and_errors() {
        let mut flow = flow_at_code_step("123456");
        let err = flow.submit_code("654321").unwrap_err();
        assert_eq!(err.user_message(), "The verification code is wrong.");
        assert_eq!(flow.stage(), ResetStage::CollectCode);
    }

    #[test]
    fn test_empty_code_stays_and_errors() {
        let mut flow = flow_at_code_step("123456");
        assert!(flow.submit_code("  ").is_err());
        assert_eq!(flow.stage(), ResetStage::CollectCode);
    }

    #[test]
    fn test_code_step_rejected_before_email_step() {
        let config =
            ClientConfig::new("http://127.0.0.1:9/loyalty", std::env::temp_dir()).unwrap();
        let mut flow = PasswordResetFlow::new(ApiClient::new(&config));
        assert!(flow.submit_code("123456").is_err());
        assert_eq!(flow.stage(), ResetStage::CollectEmail);
    }

    #[tokio::test]
    async fn test_mismatched_passwords_stay_at_password_step() {
        let mut flow = flow_at_code_step("123456");
        flow.submit_code("123456").unwrap();

        let err = flow
            .submit_new_password(
                SecretString::from("new-password".to_owned()),
                SecretString::from("other-password".to_owned()),
            )
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "The passwords do not match.");
        assert_eq!(flow.stage(), ResetStage::CollectNewPassword);
    }

    #[tokio::test]
    async fn test_malformed_email_rejected_without_advancing() {
        let config =
            ClientConfig::new("http://127.0.0.1:9/loyalty", std::env::temp_dir()).unwrap();
        let mut flow = PasswordResetFlow::new(ApiClient::new(&config));
        assert!(flow.submit_email("not-an-email").await.is_err());
        assert_eq!(flow.stage(), ResetStage::CollectEmail);
    }
}
