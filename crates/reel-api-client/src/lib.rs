//! Rust client for the Reel platform HTTP API
//!
//! Thin typed façade over the backend's auth, media and document
//! primitives. Holds the bearer token of the open session and maps
//! HTTP statuses to structured errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use reel_api_client::{ApiClient, ClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ClientConfig {
//!     base_url: "http://localhost:8080".into(),
//!     project_id: "reel".into(),
//!     ..Default::default()
//! });
//!
//! // Probe for an existing session
//! let identity = client.probe_session().await?;
//!
//! // Search the feed
//! let posts = client.search_posts("cat").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export main types
pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use types::*;
