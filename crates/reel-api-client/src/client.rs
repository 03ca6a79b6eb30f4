//! HTTP client for the Reel platform API

use crate::error::{ApiError, Result};
use crate::types::*;
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::RwLock;

/// HTTP client for the Reel platform API
///
/// # Example
///
/// ```rust,no_run
/// use reel_api_client::{ApiClient, ClientConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ClientConfig {
///     base_url: "http://localhost:8080".into(),
///     project_id: "reel".into(),
///     ..Default::default()
/// });
///
/// // Open a session
/// let identity = client.sign_in("dana@example.com", "hunter2").await?;
///
/// // Browse the feed
/// let posts = client.list_posts().await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    config: ClientConfig,
    client: Client,
    /// Bearer token of the open session, if any
    token: RwLock<Option<String>>,
}

/// Request body for account creation
#[derive(Debug, Serialize)]
struct CreateAccountRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Request body for opening a session
#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            config,
            client,
            token: RwLock::new(None),
        }
    }

    // ==================== Auth API ====================

    /// Ask the backend who the current session belongs to
    ///
    /// Returns `Ok(None)` when no session is active; only transport and
    /// server failures surface as errors.
    pub async fn probe_session(&self) -> Result<Option<Identity>> {
        let url = format!(
            "{}/auth/v1/{}/session",
            self.config.base_url, self.config.project_id
        );

        let response = self.with_auth(self.client.get(&url)).await.send().await?;

        match self.handle_response::<Identity>(response).await {
            Ok(identity) => Ok(Some(identity)),
            Err(ApiError::Unauthorized) | Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create an account and open a session for it
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity> {
        let url = format!(
            "{}/auth/v1/{}/accounts",
            self.config.base_url, self.config.project_id
        );

        let body = CreateAccountRequest {
            username,
            email,
            password,
        };

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let session: SessionResponse = self.handle_response(response).await?;
        *self.token.write().await = Some(session.token);
        Ok(session.identity)
    }

    /// Open a session with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let url = format!(
            "{}/auth/v1/{}/session",
            self.config.base_url, self.config.project_id
        );

        let body = SignInRequest { email, password };

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let session: SessionResponse = self.handle_response(response).await?;
        *self.token.write().await = Some(session.token);
        Ok(session.identity)
    }

    /// Delete the current session
    ///
    /// The locally held token is dropped only after the backend confirms
    /// the deletion, so a failed call leaves the session usable.
    pub async fn sign_out(&self) -> Result<()> {
        let url = format!(
            "{}/auth/v1/{}/session",
            self.config.base_url, self.config.project_id
        );

        let response = self.with_auth(self.client.delete(&url)).await.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Server { status, message });
        }

        *self.token.write().await = None;
        Ok(())
    }

    // ==================== Media API ====================

    /// Upload a locally picked asset to object storage
    ///
    /// Reads the file behind the asset's URI and sends the raw bytes
    /// with the picker's MIME hint as Content-Type.
    pub async fn upload_asset(&self, asset: &LocalAsset, kind: AssetKind) -> Result<FileRef> {
        let path = asset.uri.strip_prefix("file://").unwrap_or(&asset.uri);
        let data = tokio::fs::read(path).await?;

        let url = format!(
            "{}/media/v1/{}/assets?kind={}",
            self.config.base_url,
            self.config.project_id,
            kind.as_str()
        );

        let response = self
            .with_auth(self.client.post(&url))
            .await
            .header(header::CONTENT_TYPE, asset.mime_hint.as_str())
            .body(data)
            .send()
            .await?;

        self.handle_response(response).await
    }

    // ==================== Post API ====================

    /// Create a post record referencing two uploaded assets
    pub async fn create_post(&self, input: NewPostRequest) -> Result<RemotePost> {
        let url = format!(
            "{}/db/v1/{}/posts",
            self.config.base_url, self.config.project_id
        );

        let response = self
            .with_auth(self.client.post(&url))
            .await
            .header(header::CONTENT_TYPE, "application/json")
            .json(&input)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Search posts by text
    pub async fn search_posts(&self, query: &str) -> Result<Vec<RemotePost>> {
        let url = format!(
            "{}/db/v1/{}/posts?search={}",
            self.config.base_url,
            self.config.project_id,
            urlencoding::encode(query)
        );

        let response = self.with_auth(self.client.get(&url)).await.send().await?;
        let list: PostListResponse = self.handle_response(response).await?;
        Ok(list.posts)
    }

    /// List all posts
    pub async fn list_posts(&self) -> Result<Vec<RemotePost>> {
        let url = format!(
            "{}/db/v1/{}/posts",
            self.config.base_url, self.config.project_id
        );

        let response = self.with_auth(self.client.get(&url)).await.send().await?;
        let list: PostListResponse = self.handle_response(response).await?;
        Ok(list.posts)
    }

    /// List the newest posts, newest first
    pub async fn list_latest_posts(&self, limit: u32) -> Result<Vec<RemotePost>> {
        let mut url = format!(
            "{}/db/v1/{}/posts",
            self.config.base_url, self.config.project_id
        );

        let mut params = vec!["sort=latest".to_string()];
        if limit != 0 {
            params.push(format!("limit={}", limit));
        }
        url.push('?');
        url.push_str(&params.join("&"));

        let response = self.with_auth(self.client.get(&url)).await.send().await?;
        let list: PostListResponse = self.handle_response(response).await?;
        Ok(list.posts)
    }

    /// List posts published by one creator
    pub async fn list_posts_by_creator(&self, creator_id: &str) -> Result<Vec<RemotePost>> {
        let url = format!(
            "{}/db/v1/{}/posts?creator={}",
            self.config.base_url,
            self.config.project_id,
            urlencoding::encode(creator_id)
        );

        let response = self.with_auth(self.client.get(&url)).await.send().await?;
        let list: PostListResponse = self.handle_response(response).await?;
        Ok(list.posts)
    }

    // ==================== Helper Methods ====================

    /// Attach the session token, or the service API key when no session
    /// is open, as a bearer Authorization header.
    async fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = self.token.read().await.as_deref() {
            return request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(api_key) = self.config.api_key.as_deref() {
            return request.header(header::AUTHORIZATION, format!("Bearer {}", api_key));
        }
        request
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("Resource not found".to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Server { status, message });
        }

        let body = response.json().await?;
        Ok(body)
    }
}
