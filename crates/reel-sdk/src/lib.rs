//! Reel SDK - client-side remote state synchronization
//!
//! Keeps a consistent local view of remote state for Reel client apps.
//! Three pieces carry the real invariants:
//!
//! - [`SessionManager`]: the per-process session/auth state machine
//! - [`RemoteResource`]: the `{data, loading, error}` fetch abstraction
//!   behind every list and detail screen
//! - [`PublishPipeline`]: two sequential asset uploads followed by one
//!   metadata record referencing both
//!
//! plus [`SearchCoordinator`], which binds a navigation query string to
//! a search resource.
//!
//! Everything talks to the backend through the [`RemoteBackend`]
//! capability trait; [`ApiClient`] is the HTTP implementation and
//! [`MockRemote`] the test double.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reel_sdk::{ApiClient, ClientConfig, SessionManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let remote = Arc::new(ApiClient::new(ClientConfig {
//!     base_url: "https://api.reel.test".into(),
//!     project_id: "reel".into(),
//!     ..Default::default()
//! }));
//!
//! // Resolve the startup session probe
//! let session = SessionManager::new(remote.clone());
//! session.probe().await;
//!
//! // Sign in and read the session back
//! session.sign_in("dana@example.com", "hunter2").await?;
//! # Ok(())
//! # }
//! ```

// Error types
pub mod error;

// Multi-asset publish pipeline
pub mod publish;

// Capability boundary to the backend
pub mod remote;

// Generic {data, loading, error} fetch resource
pub mod resource;

// Query-string bound search resource
pub mod search;

// Session state and auth flows
pub mod session;

// Re-export core types
pub use error::{Result, SdkError};
pub use publish::{DraftPost, PublishError, PublishPipeline, PublishStage};
pub use remote::{MockRemote, RemoteBackend};
pub use resource::{RemoteResource, ResourceState};
pub use search::{SearchCoordinator, SearchResults};
pub use session::{AuthStatus, SessionManager, SessionSnapshot};

// Re-export from the underlying client crate
pub use reel_api_client::{
    ApiClient, ApiError, AssetKind, ClientConfig, FileRef, Identity, LocalAsset, NewPostRequest,
    RemotePost,
};
