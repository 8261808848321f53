//! HTTP implementation of [`DirectoryApi`] over reqwest.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use crate::token::AuthToken;
use crate::traits::api::DirectoryApi;
use crate::types::{AuthResponse, LoginRequest, MemberRecord, RegisterRequest};

/// Talks to the directory backend's JSON API.
#[derive(Clone)]
pub struct HttpDirectoryApi {
    http_client: Client,
    base_url: String,
}

impl HttpDirectoryApi {
    /// Create a client for the backend at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (timeouts, proxies, TLS).
    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DirectoryError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(http_client, config.api_url.as_str()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = error_for_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let url = self.endpoint("login");
        debug!(url = %url, email = %request.email, "Logging in");

        let response = self.http_client.post(&url).json(request).send().await?;
        Self::decode(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let url = self.endpoint("register");
        debug!(url = %url, email = %request.email, "Registering member");

        let response = self.http_client.post(&url).json(request).send().await?;
        Self::decode(response).await
    }

    async fn fetch_profile(&self, token: &AuthToken) -> Result<MemberRecord> {
        let url = self.endpoint("profile");
        debug!(url = %url, "Fetching profile");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_members(&self) -> Result<Vec<MemberRecord>> {
        let url = self.endpoint("members");
        debug!(url = %url, "Fetching members");

        let response = self.http_client.get(&url).send().await?;
        let members: Vec<MemberRecord> = Self::decode(response).await?;
        debug!(count = members.len(), "Fetched members");
        Ok(members)
    }
}

/// Map a non-2xx response onto the error taxonomy.
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DirectoryError::Authentication(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            DirectoryError::Validation(message)
        }
        _ => DirectoryError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Prefer a JSON `message`/`error` field, then the raw body, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
