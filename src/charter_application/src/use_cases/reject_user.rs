use uuid::Uuid;

use charter_core::{UserStore, UserStoreError};

/// Error types for the reject-user use case
#[derive(Debug, thiserror::Error)]
pub enum RejectUserError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Reject-user use case - deletes a registration permanently.
///
/// Irreversible. The confirmation step lives in the calling UI; by the time
/// this runs, the decision is final.
pub struct RejectUserUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> RejectUserUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "RejectUserUseCase::execute", skip(self))]
    pub async fn execute(&self, id: Uuid) -> Result<(), RejectUserError> {
        Ok(self.user_store.delete_user(id).await?)
    }
}
