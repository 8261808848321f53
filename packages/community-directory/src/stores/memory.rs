//! In-memory token store for testing and development.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{DirectoryError, Result};
use crate::token::AuthToken;
use crate::traits::token_store::TokenStore;

/// Keeps the token in process memory.
///
/// Nothing survives a restart, so a restored session always starts logged out
/// unless the store is seeded with [`MemoryTokenStore::with_token`].
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, as if persisted by an earlier run.
    pub fn with_token(token: impl Into<AuthToken>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Peek at the stored token without going through the async trait.
    pub fn current(&self) -> Option<AuthToken> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<AuthToken>>> {
        self.token
            .lock()
            .map_err(|_| DirectoryError::Storage("token store lock poisoned".into()))
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<AuthToken>> {
        Ok(self.slot()?.clone())
    }

    async fn save(&self, token: &AuthToken) -> Result<()> {
        *self.slot()? = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}
