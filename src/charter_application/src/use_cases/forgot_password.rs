use charter_core::{
    Email, EmailClient, TokenPurpose, UserStore, UserStoreError, VerificationTokenStore,
    VerificationTokenStoreError,
};

use super::resend_verification::ResendOutcome;

/// Error types for the forgot-password use case
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Verification token store error: {0}")]
    TokenStoreError(#[from] VerificationTokenStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Forgot-password use case - issues a one-hour reset token and emails it.
///
/// Unknown addresses are skipped silently; the HTTP layer responds
/// identically either way so the endpoint never reveals whether an email is
/// registered.
pub struct ForgotPasswordUseCase<'a, U, V, E>
where
    U: UserStore,
    V: VerificationTokenStore,
    E: EmailClient,
{
    user_store: &'a U,
    token_store: &'a V,
    email_client: &'a E,
    portal_base_url: &'a str,
}

impl<'a, U, V, E> ForgotPasswordUseCase<'a, U, V, E>
where
    U: UserStore,
    V: VerificationTokenStore,
    E: EmailClient,
{
    pub fn new(
        user_store: &'a U,
        token_store: &'a V,
        email_client: &'a E,
        portal_base_url: &'a str,
    ) -> Self {
        Self {
            user_store,
            token_store,
            email_client,
            portal_base_url,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<ResendOutcome, ForgotPasswordError> {
        let identity = match self.user_store.get_user_by_email(&email).await {
            Ok(identity) => identity,
            Err(UserStoreError::UserNotFound) => return Ok(ResendOutcome::Skipped),
            Err(error) => return Err(ForgotPasswordError::UserStoreError(error)),
        };

        let token = self
            .token_store
            .issue(identity.email.clone(), TokenPurpose::PasswordReset)
            .await?;

        let content = format!(
            "Hello {},\n\nReset your password within the next hour:\n\
             {}/reset-password?token={}\n\nIf you did not request this, you \
             can ignore this email.",
            identity.display_name(),
            self.portal_base_url,
            token
        );

        self.email_client
            .send_email(&identity.email, "Reset your password", &content)
            .await
            .map_err(ForgotPasswordError::EmailError)?;

        Ok(ResendOutcome::Sent)
    }
}
