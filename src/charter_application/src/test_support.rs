//! Shared port mocks for use-case tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use charter_core::{
    ActivationOutcome, BannedTokenStore, BannedTokenStoreError, Email, EmailClient, Identity, Page,
    Password, PendingQuery, SortKey, TokenPurpose, User, UserStore, UserStoreError,
    VerificationToken, VerificationTokenStore, VerificationTokenStoreError,
};

#[derive(Clone)]
pub struct StoredUser {
    pub identity: Identity,
    pub password: Password,
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<Uuid, StoredUser>>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with explicit flags, bypassing the registration path.
    pub async fn seed(&self, user: User, email_verified: bool, is_active: bool) -> Identity {
        self.seed_created_at(user, email_verified, is_active, Utc::now())
            .await
    }

    pub async fn seed_created_at(
        &self,
        user: User,
        email_verified: bool,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Identity {
        let mut identity = Identity::from_new_user(&user, created_at);
        identity.email_verified = email_verified;
        identity.is_active = is_active;

        self.users.write().await.insert(
            identity.id,
            StoredUser {
                identity: identity.clone(),
                password: user.password().clone(),
            },
        );
        identity
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.users.read().await.contains_key(&id)
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: User) -> Result<Identity, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|stored| &stored.identity.email == user.email())
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let identity = Identity::from_new_user(&user, Utc::now());
        users.insert(
            identity.id,
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
                None => true,
                Some(term) => {
                    identity.display_name().to_lowercase().contains(term)
                        || identity.email.expose().contains(term)
                        || identity
                            .company
                            .as_deref()
                            .is_some_and(|company| company.to_lowercase().contains(term))
                }
            })
            .collect();

        match query.sort {
            SortKey::NewestFirst => pending.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::OldestFirst => pending.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortKey::NameAsc => pending.sort_by_key(|i| i.display_name().to_lowercase()),
            SortKey::NameDesc => {
                pending.sort_by_key(|i| std::cmp::Reverse(i.display_name().to_lowercase()))
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

#[derive(Clone, Default)]
pub struct MockVerificationTokenStore {
    tokens: Arc<RwLock<HashMap<String, (Email, TokenPurpose)>>>,
}

impl MockVerificationTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for MockVerificationTokenStore {
    async fn issue(
        &self,
        email: Email,
        purpose: TokenPurpose,
    ) -> Result<VerificationToken, VerificationTokenStoreError> {
        let token = VerificationToken::new();
        self.tokens
            .write()
            .await
            .insert(token.as_str().to_string(), (email, purpose));
        Ok(token)
    }

    async fn consume(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Email, VerificationTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get(token) {
            Some((_, stored_purpose)) if *stored_purpose == purpose => {
                let (email, _) = tokens.remove(token).expect("entry present");
                Ok(email)
            }
            _ => Err(VerificationTokenStoreError::InvalidOrExpired),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockBannedTokenStore {
    banned: Arc<RwLock<HashSet<String>>>,
}

impl MockBannedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for MockBannedTokenStore {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        self.banned.write().await.insert(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        Ok(self.banned.read().await.contains(token))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client that records outgoing mail, optionally failing every send.
#[derive(Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: bool,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("delivery failed".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.expose().to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

/// Convenience builder for a registration aggregate.
pub fn sample_user(email: &str) -> User {
    use charter_core::{PersonName, Role};
    use secrecy::Secret;

    User::new(
        PersonName::parse("Jane", "Doe").unwrap(),
        Email::try_from(Secret::from(email.to_string())).unwrap(),
        Password::try_from(Secret::from("Passw0rd!".to_string())).unwrap(),
        Role::Owner,
        None,
    )
    .unwrap()
}

pub fn password(raw: &str) -> Password {
    use secrecy::Secret;
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn email(raw: &str) -> Email {
    use secrecy::Secret;
    Email::try_from(Secret::from(raw.to_string())).unwrap()
}
