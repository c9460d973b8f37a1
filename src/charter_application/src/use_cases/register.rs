use charter_core::{
    EmailClient, Identity, TokenPurpose, User, UserStore, UserStoreError, VerificationTokenStore,
    VerificationTokenStoreError,
};

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Verification token store error: {0}")]
    TokenStoreError(#[from] VerificationTokenStoreError),
}

/// Register use case - creates an inactive identity and sends the
/// verification email.
///
/// No session is established: a registrant has to verify their email and
/// be approved by an administrator before the first login can succeed.
pub struct RegisterUseCase<'a, U, V, E>
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

impl<'a, U, V, E> RegisterUseCase<'a, U, V, E>
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

    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, user: User) -> Result<Identity, RegisterError> {
        let identity = self.user_store.add_user(user).await?;

        let token = self
            .token_store
            .issue(identity.email.clone(), TokenPurpose::VerifyEmail)
            .await?;

        let content = format!(
            "Hello {},\n\nWelcome to the network. Verify your email address to \
             continue:\n{}/verify-email?token={}\n",
            identity.display_name(),
            self.portal_base_url,
            token
        );

        // A failed delivery does not undo the registration; the user can
        // request a fresh verification email at any time.
        if let Err(error) = self
            .email_client
            .send_email(&identity.email, "Verify your email address", &content)
            .await
        {
            tracing::warn!(%error, "failed to send verification email");
        }

        Ok(identity)
    }
}
