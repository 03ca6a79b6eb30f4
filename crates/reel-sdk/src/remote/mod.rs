//! Capability boundary to the Reel backend
//!
//! The synchronization core talks to the backend only through the
//! `RemoteBackend` trait, so screens and tests can run against any
//! implementation behind an `Arc<dyn RemoteBackend>`.

pub mod mock;

use async_trait::async_trait;
use reel_api_client::{
    ApiClient, ApiError, AssetKind, FileRef, Identity, LocalAsset, NewPostRequest, RemotePost,
};

pub use mock::MockRemote;

/// The narrow set of backend capabilities the core depends on.
///
/// All calls are request/response and non-blocking; failures carry the
/// structured [`ApiError`] of the client boundary.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Resolve the identity behind the current session, if any.
    ///
    /// An absent session is `Ok(None)`, not an error.
    async fn probe_session(&self) -> Result<Option<Identity>, ApiError>;

    /// Create an account and open a session for it.
    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, ApiError>;

    /// Open a session with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ApiError>;

    /// Delete the current session.
    async fn sign_out(&self) -> Result<(), ApiError>;

    /// Upload a locally picked asset, returning its durable reference.
    async fn upload_asset(&self, asset: &LocalAsset, kind: AssetKind) -> Result<FileRef, ApiError>;

    /// Register a post record referencing two uploaded assets.
    async fn create_post(&self, input: NewPostRequest) -> Result<RemotePost, ApiError>;

    /// Search posts by text.
    async fn search_posts(&self, query: &str) -> Result<Vec<RemotePost>, ApiError>;

    /// List all posts.
    async fn list_posts(&self) -> Result<Vec<RemotePost>, ApiError>;

    /// List the newest posts, newest first.
    async fn list_latest_posts(&self, limit: u32) -> Result<Vec<RemotePost>, ApiError>;

    /// List posts published by one creator.
    async fn list_posts_by_creator(&self, creator_id: &str) -> Result<Vec<RemotePost>, ApiError>;
}

#[async_trait]
impl RemoteBackend for ApiClient {
    async fn probe_session(&self) -> Result<Option<Identity>, ApiError> {
        ApiClient::probe_session(self).await
    }

    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, ApiError> {
        ApiClient::create_account(self, username, email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        ApiClient::sign_in(self, email, password).await
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        ApiClient::sign_out(self).await
    }

    async fn upload_asset(&self, asset: &LocalAsset, kind: AssetKind) -> Result<FileRef, ApiError> {
        ApiClient::upload_asset(self, asset, kind).await
    }

    async fn create_post(&self, input: NewPostRequest) -> Result<RemotePost, ApiError> {
        ApiClient::create_post(self, input).await
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<RemotePost>, ApiError> {
        ApiClient::search_posts(self, query).await
    }

    async fn list_posts(&self) -> Result<Vec<RemotePost>, ApiError> {
        ApiClient::list_posts(self).await
    }

    async fn list_latest_posts(&self, limit: u32) -> Result<Vec<RemotePost>, ApiError> {
        ApiClient::list_latest_posts(self, limit).await
    }

    async fn list_posts_by_creator(&self, creator_id: &str) -> Result<Vec<RemotePost>, ApiError> {
        ApiClient::list_posts_by_creator(self, creator_id).await
    }
}
