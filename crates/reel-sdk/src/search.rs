//! Search coordinator
//!
//! Binds an externally supplied query string (navigation state) to a
//! post-list resource and refetches whenever the query changes.

use crate::remote::RemoteBackend;
use crate::resource::{RemoteResource, ResourceState};
use reel_api_client::RemotePost;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// What the search screen renders
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    /// Nothing resolved yet
    Loading,
    /// The backend answered with an empty result set
    NoResults,
    /// Posts matching the query
    Results(Vec<RemotePost>),
    /// The fetch failed and there is nothing usable to show
    Error(String),
}

/// Binds a query string to a search resource
pub struct SearchCoordinator {
    query: Arc<RwLock<String>>,
    resource: RemoteResource<Vec<RemotePost>>,
    generation: Arc<AtomicU64>,
    debounce: Duration,
}

impl SearchCoordinator {
    /// Coordinator that issues a backend call for every query change.
    pub fn new(remote: Arc<dyn RemoteBackend>) -> Self {
        Self::build(remote, Duration::ZERO)
    }

    /// Coordinator that waits for the query to stay stable for `delay`
    /// before fetching; superseded changes never reach the backend.
    pub fn with_debounce(remote: Arc<dyn RemoteBackend>, delay: Duration) -> Self {
        Self::build(remote, delay)
    }

    fn build(remote: Arc<dyn RemoteBackend>, debounce: Duration) -> Self {
        let query = Arc::new(RwLock::new(String::new()));
        let producer_query = Arc::clone(&query);
        let resource = RemoteResource::suspended(move || {
            let remote = Arc::clone(&remote);
            let query = Arc::clone(&producer_query);
            async move {
                let text = query.read().await.clone();
                remote.search_posts(&text).await.map_err(Into::into)
            }
        });

        Self {
            query,
            resource,
            generation: Arc::new(AtomicU64::new(0)),
            debounce,
        }
    }

    /// Bind a new query value and trigger a fetch.
    ///
    /// The fetch is unconditional: the first value, an empty value and
    /// a value equal to the previous one all refetch. With a debounce
    /// configured, the call sleeps first and returns without fetching
    /// when a newer value arrived in the meantime.
    pub async fn set_query(&self, query: impl Into<String>) {
        *self.query.write().await = query.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if self.generation.load(Ordering::SeqCst) != generation {
                return;
            }
        }

        self.resource.refetch().await;
    }

    /// The currently bound query.
    pub async fn query(&self) -> String {
        self.query.read().await.clone()
    }

    /// Raw resource state, for screens that render it directly.
    pub async fn snapshot(&self) -> ResourceState<Vec<RemotePost>> {
        self.resource.snapshot().await
    }

    /// Resource state collapsed for rendering.
    ///
    /// Stale results beat a blank screen, so usable data wins over a
    /// newer error.
    pub async fn results(&self) -> SearchResults {
        let state = self.resource.snapshot().await;
        match (state.data, state.error) {
            (Some(posts), _) if !posts.is_empty() => SearchResults::Results(posts),
            (Some(_), None) => SearchResults::NoResults,
            (_, Some(message)) => SearchResults::Error(message),
            (None, None) => SearchResults::Loading,
        }
    }
}
