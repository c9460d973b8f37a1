use charter_core::{
    Email, EmailClient, TokenPurpose, UserStore, UserStoreError, VerificationTokenStore,
    VerificationTokenStoreError,
};

/// Whether a verification email actually went out.
///
/// Callers must not surface the difference to the requester - the HTTP
/// layer reports uniform success either way so the endpoint cannot be used
/// to probe which addresses are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    Sent,
    Skipped,
}

/// Error types for the resend-verification use case
#[derive(Debug, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Verification token store error: {0}")]
    TokenStoreError(#[from] VerificationTokenStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Resend-verification use case - re-issues the verification email for an
/// unverified account. Unknown and already-verified addresses are skipped
/// silently.
pub struct ResendVerificationUseCase<'a, U, V, E>
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

impl<'a, U, V, E> ResendVerificationUseCase<'a, U, V, E>
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

    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<ResendOutcome, ResendVerificationError> {
        let identity = match self.user_store.get_user_by_email(&email).await {
            Ok(identity) => identity,
            Err(UserStoreError::UserNotFound) => return Ok(ResendOutcome::Skipped),
            Err(error) => return Err(ResendVerificationError::UserStoreError(error)),
        };

        if identity.email_verified {
            return Ok(ResendOutcome::Skipped);
        }

        let token = self
            .token_store
            .issue(identity.email.clone(), TokenPurpose::VerifyEmail)
            .await?;

        let content = format!(
            "Hello {},\n\nVerify your email address to continue:\n\
             {}/verify-email?token={}\n",
            identity.display_name(),
            self.portal_base_url,
            token
        );

        self.email_client
            .send_email(&identity.email, "Verify your email address", &content)
            .await
            .map_err(ResendVerificationError::EmailError)?;

        Ok(ResendOutcome::Sent)
    }
}
