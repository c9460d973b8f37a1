use std::collections::HashSet;
use std::sync::Arc;

use charter_core::{BannedTokenStore, BannedTokenStoreError};
use tokio::sync::RwLock;

/// In-memory revocation list for signed-out session tokens.
#[derive(Default, Clone)]
pub struct HashSetBannedTokenStore {
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl HashSetBannedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for HashSetBannedTokenStore {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.contains(token))
    }
}
