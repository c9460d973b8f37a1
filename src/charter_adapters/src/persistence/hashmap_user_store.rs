use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use charter_core::{
    ActivationOutcome, Email, Identity, Page, Password, PendingQuery, SortKey, User, UserStore,
    UserStoreError,
};

#[derive(Clone)]
struct StoredUser {
    identity: Identity,
    password: Password,
}

/// In-memory user store. Passwords are compared in plaintext, so this is
/// only suitable for local runs and the API test suite.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Uuid, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Flip an approved identity back to inactive. Not part of the
    /// `UserStore` port; mirrors an operator changing the flag directly
    /// in the database.
    pub async fn deactivate_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.identity.is_active = false;
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<Identity, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|stored| &stored.identity.email == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let identity = Identity::from_new_user(&user, Utc::now());
        users.insert(
            user.id(),
            StoredUser {
                identity: identity.clone(),
                password: user.password().clone(),
            },
        );
        Ok(identity)
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Identity, UserStoreError> {
        let users = self.users.read().await;
        let stored = users
            .values()
            .find(|stored| &stored.identity.email == email)
            .ok_or(UserStoreError::UserNotFound)?;

        if &stored.password != password {
            return Err(UserStoreError::IncorrectPassword);
        }

        Ok(stored.identity.clone())
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<Identity, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|stored| &stored.identity.email == email)
            .map(|stored| stored.identity.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Identity, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(&id)
            .map(|stored| stored.identity.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_new_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .values_mut()
            .find(|stored| &stored.identity.email == email)
            .ok_or(UserStoreError::UserNotFound)?;

        stored.password = new_password;
        Ok(())
    }

    async fn mark_email_verified(&self, email: &Email) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .values_mut()
            .find(|stored| &stored.identity.email == email)
            .ok_or(UserStoreError::UserNotFound)?;

        stored.identity.email_verified = true;
        Ok(())
    }

    async fn activate_user(&self, id: Uuid) -> Result<ActivationOutcome, UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;

        if stored.identity.is_active {
            return Ok(ActivationOutcome::AlreadyActive);
        }
        stored.identity.is_active = true;
        Ok(ActivationOutcome::Activated)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        users.remove(&id).ok_or(UserStoreError::UserNotFound)?;
        Ok(())
    }

    async fn list_pending(&self, query: &PendingQuery) -> Result<Page<Identity>, UserStoreError> {
        let users = self.users.read().await;

        let mut pending: Vec<Identity> = users
            .values()
            .map(|stored| stored.identity.clone())
            .filter(|identity| !identity.is_active)
            .filter(|identity| match &query.search {
                Some(term) => {
                    identity.display_name().to_lowercase().contains(term)
                        || identity.email.expose().contains(term)
                        || identity
                            .company
                            .as_deref()
                            .is_some_and(|company| company.to_lowercase().contains(term))
                }
                None => true,
            })
            .collect();

        match query.sort {
            SortKey::NewestFirst => pending.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::OldestFirst => pending.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortKey::NameAsc => pending.sort_by_key(|i| i.display_name().to_lowercase()),
            SortKey::NameDesc => {
                pending.sort_by_key(|i| i.display_name().to_lowercase());
                pending.reverse();
            }
        }

        let total = pending.len() as u64;
        let items = pending
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .collect();

        Ok(Page { items, total })
    }
}
