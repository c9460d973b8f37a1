use charter_core::{
    Password, TokenPurpose, UserStore, UserStoreError, VerificationTokenStore,
    VerificationTokenStoreError,
};

/// Error types for the reset-password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Verification token store error: {0}")]
    TokenStoreError(#[from] VerificationTokenStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Reset-password use case - consumes a single-use reset token and stores
/// the new password. A rejected token is terminal for that token; the user
/// has to request a fresh one.
pub struct ResetPasswordUseCase<'a, U, V>
where
    U: UserStore,
    V: VerificationTokenStore,
{
    user_store: &'a U,
    token_store: &'a V,
}

impl<'a, U, V> ResetPasswordUseCase<'a, U, V>
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

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &str,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let email = self
            .token_store
            .consume(token, TokenPurpose::PasswordReset)
            .await?;

        self.user_store.set_new_password(&email, new_password).await?;
        Ok(())
    }
}
