use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use charter_core::{
    Email, TokenPurpose, VerificationToken, VerificationTokenStore, VerificationTokenStoreError,
};

use crate::config::constants::{PASSWORD_RESET_TOKEN_TTL_SECONDS, VERIFY_EMAIL_TOKEN_TTL_SECONDS};

struct TokenEntry {
    email: Email,
    purpose: TokenPurpose,
    expires_at: DateTime<Utc>,
}

/// In-memory verification token store with per-purpose TTLs.
#[derive(Clone)]
pub struct HashMapVerificationTokenStore {
    tokens: Arc<RwLock<HashMap<String, TokenEntry>>>,
    verify_email_ttl: Duration,
    password_reset_ttl: Duration,
}

impl HashMapVerificationTokenStore {
    pub fn new() -> Self {
        Self::with_ttls(
            Duration::seconds(VERIFY_EMAIL_TOKEN_TTL_SECONDS),
            Duration::seconds(PASSWORD_RESET_TOKEN_TTL_SECONDS),
        )
    }

    pub fn with_ttls(verify_email_ttl: Duration, password_reset_ttl: Duration) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            verify_email_ttl,
            password_reset_ttl,
        }
    }

    fn ttl_for(&self, purpose: TokenPurpose) -> Duration {
        match purpose {
            TokenPurpose::VerifyEmail => self.verify_email_ttl,
            TokenPurpose::PasswordReset => self.password_reset_ttl,
        }
    }
}

impl Default for HashMapVerificationTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for HashMapVerificationTokenStore {
    async fn issue(
        &self,
        email: Email,
        purpose: TokenPurpose,
    ) -> Result<VerificationToken, VerificationTokenStoreError> {
        let token = VerificationToken::new();
        let entry = TokenEntry {
            email,
            purpose,
            expires_at: Utc::now() + self.ttl_for(purpose),
        };

        let mut tokens = self.tokens.write().await;
        tokens.insert(token.as_str().to_string(), entry);
        Ok(token)
    }

    async fn consume(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Email, VerificationTokenStoreError> {
        let mut tokens = self.tokens.write().await;

        // A wrong-purpose lookup must not consume the entry, so peek first.
        let entry = tokens
            .get(token)
            .ok_or(VerificationTokenStoreError::InvalidOrExpired)?;

        if entry.purpose != purpose {
            return Err(VerificationTokenStoreError::InvalidOrExpired);
        }

        let entry = tokens
            .remove(token)
            .ok_or(VerificationTokenStoreError::InvalidOrExpired)?;

        if entry.expires_at < Utc::now() {
            return Err(VerificationTokenStoreError::InvalidOrExpired);
        }

        Ok(entry.email)
    }
}
