//! The directory backend as seen by the client.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::token::AuthToken;
use crate::types::{AuthResponse, LoginRequest, MemberRecord, RegisterRequest};

/// Operations the external `/api/*` backend provides.
///
/// Credentials are passed per call. Implementations must not keep a
/// process-wide default `Authorization` header.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `POST /api/login`. Bad credentials are `DirectoryError::Authentication`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    /// `POST /api/register`. Malformed or duplicate input is
    /// `DirectoryError::Validation`.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;

    /// `GET /api/profile` for the holder of `token`.
    async fn fetch_profile(&self, token: &AuthToken) -> Result<MemberRecord>;

    /// `GET /api/members`. No authentication required.
    async fn list_members(&self) -> Result<Vec<MemberRecord>>;
}

#[async_trait]
impl<T: DirectoryApi + ?Sized> DirectoryApi for Arc<T> {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        (**self).login(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        (**self).register(request).await
    }

    async fn fetch_profile(&self, token: &AuthToken) -> Result<MemberRecord> {
        (**self).fetch_profile(token).await
    }

    async fn list_members(&self) -> Result<Vec<MemberRecord>> {
        (**self).list_members().await
    }
}
