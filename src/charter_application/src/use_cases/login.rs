use charter_core::{Email, Identity, Password, UserStore, UserStoreError};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email or wrong password. Callers cannot tell which.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Correct password but the email was never verified. Carries the
    /// submitted email so callers can offer "resend verification" without
    /// asking the user to retype it.
    #[error("Email address has not been verified")]
    EmailNotVerified(Email),
    /// Verified email, correct password, but no administrator approval yet.
    #[error("Account is pending approval")]
    AccountPending,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for LoginError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                LoginError::InvalidCredentials
            }
            other => LoginError::UserStoreError(other),
        }
    }
}

/// Login use case - authenticates credentials and gates on account state.
///
/// The gates run in a fixed order: password first, then email verification,
/// then activation. A correct password against an unverified account must
/// report `EmailNotVerified`, never `InvalidCredentials`.
pub struct LoginUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> LoginUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<Identity, LoginError> {
        let identity = self.user_store.authenticate_user(&email, &password).await?;

        if !identity.email_verified {
            return Err(LoginError::EmailNotVerified(identity.email));
        }

        if !identity.is_active {
            return Err(LoginError::AccountPending);
        }

        Ok(identity)
    }
}
