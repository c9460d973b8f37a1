use charter_core::{Identity, Page, PendingQuery, UserStore, UserStoreError};

/// Error types for the list-pending use case
#[derive(Debug, thiserror::Error)]
pub enum ListPendingError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// List-pending use case - pages through registrations awaiting approval.
pub struct ListPendingUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> ListPendingUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListPendingUseCase::execute", skip(self))]
    pub async fn execute(&self, query: PendingQuery) -> Result<Page<Identity>, ListPendingError> {
        Ok(self.user_store.list_pending(&query).await?)
    }
}
