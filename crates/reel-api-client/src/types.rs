//! Types for the Reel platform API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the Reel HTTP API
    pub base_url: String,
    /// Project ID for namespacing
    pub project_id: String,
    /// Optional service API key used when no user session is open
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            project_id: "default".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Authenticated user record, owned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID
    pub id: String,
    /// Display username
    pub username: String,
    /// Avatar image URL
    pub avatar_url: String,
}

/// Descriptor of a locally selected file, not yet uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct LocalAsset {
    /// Local URI of the picked file (a `file://` prefix is tolerated)
    pub uri: String,
    /// MIME type reported by the picker
    pub mime_hint: String,
    /// File size reported by the picker
    pub size_bytes: u64,
}

/// Kind of asset being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Video,
    Image,
}

impl AssetKind {
    /// Wire value used in upload URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Video => "video",
            AssetKind::Image => "image",
        }
    }
}

/// Durable storage reference returned after a successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    /// File ID assigned by object storage
    pub id: String,
    /// Retrievable URL for the stored object
    pub url: String,
}

/// Backend-persisted post record
///
/// The client never constructs `id` or `created_at`; the backend
/// assigns both at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePost {
    /// Post ID
    pub id: String,
    /// Post title
    pub title: String,
    /// Prompt used to generate the video
    pub prompt: String,
    /// URL of the uploaded video object
    pub video_url: String,
    /// URL of the uploaded thumbnail object
    pub thumbnail_url: String,
    /// ID of the creating user
    pub creator_id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a post record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPostRequest {
    /// Post title
    pub title: String,
    /// Prompt used to generate the video
    pub prompt: String,
    /// Durable URL of the uploaded video
    pub video_url: String,
    /// Durable URL of the uploaded thumbnail
    pub thumbnail_url: String,
    /// ID of the creating user
    pub creator_id: String,
}

/// Response from post list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    /// Matching posts
    pub posts: Vec<RemotePost>,
    /// Total count (for pagination)
    pub total: u64,
}

/// Response from session-opening endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token for the opened session
    pub token: String,
    /// The authenticated identity
    pub identity: Identity,
}
