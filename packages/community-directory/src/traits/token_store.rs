//! Durable storage for the bearer token.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::token::AuthToken;

/// A single durable slot holding the current bearer token.
///
/// Read once at startup, written on login/registration, removed on logout.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The persisted token, if any.
    async fn load(&self) -> Result<Option<AuthToken>>;

    /// Persist `token`, replacing any previous one.
    async fn save(&self, token: &AuthToken) -> Result<()>;

    /// Remove the persisted token. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}

#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    async fn load(&self) -> Result<Option<AuthToken>> {
        (**self).load().await
    }

    async fn save(&self, token: &AuthToken) -> Result<()> {
        (**self).save(token).await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
}
