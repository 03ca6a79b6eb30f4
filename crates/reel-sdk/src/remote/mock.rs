//! Mock remote backend for testing.

use async_trait::async_trait;
use chrono::Utc;
use reel_api_client::{
    ApiError, AssetKind, FileRef, Identity, LocalAsset, NewPostRequest, RemotePost,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use super::RemoteBackend;

fn unavailable() -> ApiError {
    ApiError::Server {
        status: 500,
        message: "mock backend unavailable".to_string(),
    }
}

/// Mock backend for testing.
///
/// Configurable results, per-operation failure switches, optional
/// per-query latency, and recorded calls for assertions.
pub struct MockRemote {
    identity: RwLock<Option<Identity>>,
    posts: RwLock<Vec<RemotePost>>,
    search_results: RwLock<HashMap<String, Vec<RemotePost>>>,
    search_delays: RwLock<HashMap<String, Duration>>,

    fail_probe: AtomicBool,
    fail_auth: AtomicBool,
    fail_sign_out: AtomicBool,
    failing_upload: RwLock<Option<AssetKind>>,
    fail_create_post: AtomicBool,
    fail_search: AtomicBool,

    probe_count: AtomicU32,
    auth_count: AtomicU32,
    sign_out_count: AtomicU32,
    upload_count: AtomicU32,
    create_post_count: AtomicU32,
    search_count: AtomicU32,

    uploads: Mutex<Vec<(String, AssetKind)>>,
    created: Mutex<Vec<NewPostRequest>>,
    searches: Mutex<Vec<String>>,

    next_file: AtomicU32,
}

impl MockRemote {
    /// Create a mock with no session, no posts and nothing failing.
    pub fn new() -> Self {
        Self {
            identity: RwLock::new(None),
            posts: RwLock::new(Vec::new()),
            search_results: RwLock::new(HashMap::new()),
            search_delays: RwLock::new(HashMap::new()),
            fail_probe: AtomicBool::new(false),
            fail_auth: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
            failing_upload: RwLock::new(None),
            fail_create_post: AtomicBool::new(false),
            fail_search: AtomicBool::new(false),
            probe_count: AtomicU32::new(0),
            auth_count: AtomicU32::new(0),
            sign_out_count: AtomicU32::new(0),
            upload_count: AtomicU32::new(0),
            create_post_count: AtomicU32::new(0),
            search_count: AtomicU32::new(0),
            uploads: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
            next_file: AtomicU32::new(0),
        }
    }

    /// Set the identity behind the active session.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        *self.identity.get_mut() = Some(identity);
        self
    }

    /// Seed the post feed.
    pub fn with_posts(mut self, posts: Vec<RemotePost>) -> Self {
        *self.posts.get_mut() = posts;
        self
    }

    /// Fix the result set for one query, overriding feed filtering.
    pub fn with_search_results(mut self, query: impl Into<String>, posts: Vec<RemotePost>) -> Self {
        self.search_results.get_mut().insert(query.into(), posts);
        self
    }

    /// Delay resolution of searches for one query.
    pub fn with_search_delay(mut self, query: impl Into<String>, delay: Duration) -> Self {
        self.search_delays.get_mut().insert(query.into(), delay);
        self
    }

    /// Make the session probe fail with a server error.
    pub fn with_probe_failure(self) -> Self {
        self.fail_probe.store(true, Ordering::SeqCst);
        self
    }

    /// Make sign-in and account creation fail.
    pub fn with_auth_failure(self) -> Self {
        self.fail_auth.store(true, Ordering::SeqCst);
        self
    }

    /// Make session deletion fail with a server error.
    pub fn with_sign_out_failure(self) -> Self {
        self.fail_sign_out.store(true, Ordering::SeqCst);
        self
    }

    /// Make uploads of the given kind fail with a server error.
    pub fn with_upload_failure(mut self, kind: AssetKind) -> Self {
        *self.failing_upload.get_mut() = Some(kind);
        self
    }

    /// Make record creation fail with a server error.
    pub fn with_create_post_failure(self) -> Self {
        self.fail_create_post.store(true, Ordering::SeqCst);
        self
    }

    /// Make searches fail with a server error.
    pub fn with_search_failure(self) -> Self {
        self.fail_search.store(true, Ordering::SeqCst);
        self
    }

    /// Toggle search failure at runtime.
    pub fn set_search_failure(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    pub fn probe_count(&self) -> u32 {
        self.probe_count.load(Ordering::SeqCst)
    }

    pub fn auth_count(&self) -> u32 {
        self.auth_count.load(Ordering::SeqCst)
    }

    pub fn sign_out_count(&self) -> u32 {
        self.sign_out_count.load(Ordering::SeqCst)
    }

    pub fn upload_count(&self) -> u32 {
        self.upload_count.load(Ordering::SeqCst)
    }

    pub fn create_post_count(&self) -> u32 {
        self.create_post_count.load(Ordering::SeqCst)
    }

    pub fn search_count(&self) -> u32 {
        self.search_count.load(Ordering::SeqCst)
    }

    /// Local URIs handed to `upload_asset`, in call order.
    pub async fn uploads(&self) -> Vec<(String, AssetKind)> {
        self.uploads.lock().await.clone()
    }

    /// Records handed to `create_post`, in call order.
    pub async fn created_posts(&self) -> Vec<NewPostRequest> {
        self.created.lock().await.clone()
    }

    /// Query strings handed to `search_posts`, in call order.
    pub async fn searches(&self) -> Vec<String> {
        self.searches.lock().await.clone()
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteBackend for MockRemote {
    async fn probe_session(&self) -> Result<Option<Identity>, ApiError> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_probe.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        Ok(self.identity.read().await.clone())
    }

    async fn create_account(
        &self,
        username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<Identity, ApiError> {
        self.auth_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let identity = Identity {
            id: format!("user-{}", uuid::Uuid::new_v4()),
            username: username.to_string(),
            avatar_url: format!("https://cdn.reel.test/avatars/{}.png", username),
        };
        *self.identity.write().await = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Identity, ApiError> {
        self.auth_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(ApiError::Unauthorized);
        }

        self.identity
            .read()
            .await
            .clone()
            .ok_or(ApiError::Unauthorized)
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        self.sign_out_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        *self.identity.write().await = None;
        Ok(())
    }

    async fn upload_asset(&self, asset: &LocalAsset, kind: AssetKind) -> Result<FileRef, ApiError> {
        self.upload_count.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().await.push((asset.uri.clone(), kind));

        if *self.failing_upload.read().await == Some(kind) {
            return Err(ApiError::Server {
                status: 500,
                message: "storage rejected the upload".to_string(),
            });
        }

        let n = self.next_file.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FileRef {
            id: format!("file-{}", n),
            url: format!("https://cdn.reel.test/{}/file-{}", kind.as_str(), n),
        })
    }

    async fn create_post(&self, input: NewPostRequest) -> Result<RemotePost, ApiError> {
        self.create_post_count.fetch_add(1, Ordering::SeqCst);
        self.created.lock().await.push(input.clone());

        if self.fail_create_post.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let post = RemotePost {
            id: format!("post-{}", uuid::Uuid::new_v4()),
            title: input.title,
            prompt: input.prompt,
            video_url: input.video_url,
            thumbnail_url: input.thumbnail_url,
            creator_id: input.creator_id,
            created_at: Utc::now(),
        };
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<RemotePost>, ApiError> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        self.searches.lock().await.push(query.to_string());

        let delay = self.search_delays.read().await.get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_search.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        if let Some(results) = self.search_results.read().await.get(query) {
            return Ok(results.clone());
        }

        let needle = query.to_lowercase();
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|post| post.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn list_posts(&self) -> Result<Vec<RemotePost>, ApiError> {
        Ok(self.posts.read().await.clone())
    }

    async fn list_latest_posts(&self, limit: u32) -> Result<Vec<RemotePost>, ApiError> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_posts_by_creator(&self, creator_id: &str) -> Result<Vec<RemotePost>, ApiError> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|post| post.creator_id == creator_id)
            .cloned()
            .collect())
    }
}
