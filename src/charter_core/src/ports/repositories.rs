use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    email::Email,
    listing::{Page, PendingQuery},
    password::Password,
    user::{Identity, User},
    verification::{TokenPurpose, VerificationToken},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Result of an approval. Activating an already-active identity is a no-op,
/// not an error, so double-submission from the dashboard is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated,
    AlreadyActive,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. The stored record starts inactive and unverified.
    async fn add_user(&self, user: User) -> Result<Identity, UserStoreError>;

    /// Check the password for the given email. Only the password is checked
    /// here - callers gate on the verification and activation flags of the
    /// returned snapshot.
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Identity, UserStoreError>;

    async fn get_user_by_email(&self, email: &Email) -> Result<Identity, UserStoreError>;
    async fn get_user_by_id(&self, id: Uuid) -> Result<Identity, UserStoreError>;

    async fn set_new_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), UserStoreError>;

    async fn mark_email_verified(&self, email: &Email) -> Result<(), UserStoreError>;

    /// Flip the activation flag. Terminal: there is no way back to pending.
    async fn activate_user(&self, id: Uuid) -> Result<ActivationOutcome, UserStoreError>;

    /// Remove the identity permanently.
    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError>;

    /// Page through identities with `is_active == false`, filtered by a
    /// case-insensitive substring match over name, email and company.
    async fn list_pending(&self, query: &PendingQuery) -> Result<Page<Identity>, UserStoreError>;
}

// VerificationTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationTokenStoreError {
    #[error("Token is invalid or has expired")]
    InvalidOrExpired,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for VerificationTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidOrExpired, Self::InvalidOrExpired) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait VerificationTokenStore: Send + Sync {
    /// Issue a fresh token binding `email` to `purpose`. Store-side TTLs
    /// apply; issuing again for the same email supersedes nothing - older
    /// unexpired tokens stay valid until consumed or expired.
    async fn issue(
        &self,
        email: Email,
        purpose: TokenPurpose,
    ) -> Result<VerificationToken, VerificationTokenStoreError>;

    /// Consume a token, returning the bound email. At most one consumption
    /// ever succeeds; expired, unknown or wrong-purpose tokens all report
    /// `InvalidOrExpired`.
    async fn consume(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Email, VerificationTokenStoreError>;
}

// BannedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait BannedTokenStore: Send + Sync {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError>;
    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError>;
}
