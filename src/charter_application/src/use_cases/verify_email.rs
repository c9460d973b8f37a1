use charter_core::{
    TokenPurpose, UserStore, UserStoreError, VerificationTokenStore, VerificationTokenStoreError,
};

/// Error types for the verify-email use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Verification token store error: {0}")]
    TokenStoreError(#[from] VerificationTokenStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Verify-email use case - consumes a single-use token and marks the bound
/// identity as verified. Verification never establishes a session; the user
/// logs in afterwards.
pub struct VerifyEmailUseCase<'a, U, V>
where
    U: UserStore,
    V: VerificationTokenStore,
{
    user_store: &'a U,
    token_store: &'a V,
}

impl<'a, U, V> VerifyEmailUseCase<'a, U, V>
where
    U: UserStore,
    V: VerificationTokenStore,
{
    pub fn new(user_store: &'a U, token_store: &'a V) -> Self {
        Self {
            user_store,
            token_store,
        }
    }

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<(), VerifyEmailError> {
        let email = self
            .token_store
            .consume(token, TokenPurpose::VerifyEmail)
            .await?;

        self.user_store.mark_email_verified(&email).await?;
        Ok(())
    }
}
