use std::sync::Arc;

use redis::{Commands, Connection};
use secrecy::Secret;
use tokio::sync::RwLock;

use charter_core::{
    Email, TokenPurpose, VerificationToken, VerificationTokenStore, VerificationTokenStoreError,
};

use crate::config::constants::{PASSWORD_RESET_TOKEN_TTL_SECONDS, VERIFY_EMAIL_TOKEN_TTL_SECONDS};

/// Redis-backed verification token store. Expiry is delegated to Redis key
/// TTLs and consumption uses `GETDEL`, which makes the single-use guarantee
/// atomic on the server.
#[derive(Clone)]
pub struct RedisVerificationTokenStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisVerificationTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for RedisVerificationTokenStore {
    async fn issue(
        &self,
        email: Email,
        purpose: TokenPurpose,
    ) -> Result<VerificationToken, VerificationTokenStoreError> {
        let token = VerificationToken::new();
        let key = get_key(purpose, token.as_str());

        let mut conn = self.conn.write().await;
        conn.set_ex::<_, _, ()>(key, email.expose(), ttl_seconds(purpose))
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(token)
    }

    async fn consume(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Email, VerificationTokenStoreError> {
        let key = get_key(purpose, token);

        let mut conn = self.conn.write().await;
        let value: Option<String> = conn
            .get_del(&key)
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        let raw = value.ok_or(VerificationTokenStoreError::InvalidOrExpired)?;
        Email::try_from(Secret::from(raw))
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))
    }
}

// The purpose is part of the key, so a verify-email token can never be
// replayed against the password-reset flow.
const VERIFICATION_TOKEN_KEY_PREFIX: &str = "verification_token:";

fn get_key(purpose: TokenPurpose, token: &str) -> String {
    format!("{}{}:{}", VERIFICATION_TOKEN_KEY_PREFIX, purpose, token)
}

fn ttl_seconds(purpose: TokenPurpose) -> u64 {
    match purpose {
        TokenPurpose::VerifyEmail => VERIFY_EMAIL_TOKEN_TTL_SECONDS as u64,
        TokenPurpose::PasswordReset => PASSWORD_RESET_TOKEN_TTL_SECONDS as u64,
    }
}
