use uuid::Uuid;

use charter_core::{ActivationOutcome, UserStore, UserStoreError};

/// Error types for the approve-user use case
#[derive(Debug, thiserror::Error)]
pub enum ApproveUserError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Approve-user use case - activates a pending registration.
///
/// Activation is terminal; approving an already-active identity reports
/// `AlreadyActive` so a double-submitted approval stays harmless.
pub struct ApproveUserUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> ApproveUserUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ApproveUserUseCase::execute", skip(self))]
    pub async fn execute(&self, id: Uuid) -> Result<ActivationOutcome, ApproveUserError> {
        Ok(self.user_store.activate_user(id).await?)
    }
}
