//! Generic remote query resource
//!
//! One `RemoteResource` backs one screen subscription: it owns a
//! zero-argument async producer and the `{data, loading, error}`
//! triple the screen renders. A single type backs a record, a list or
//! a search result set alike.

use crate::error::{Result, SdkError};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Observable state of one remote fetch
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    /// Most recently resolved value, kept across failed refetches
    pub data: Option<T>,
    /// True while a fetch is in flight
    pub is_loading: bool,
    /// Message of the most recent failure, cleared on the next fetch
    pub error: Option<String>,
}

/// Reusable fetch-state holder over an async producer
///
/// # Example
///
/// ```rust,ignore
/// use reel_sdk::RemoteResource;
///
/// let remote = Arc::clone(&remote);
/// let feed = RemoteResource::new(move || {
///     let remote = Arc::clone(&remote);
///     async move { remote.list_posts().await.map_err(Into::into) }
/// });
///
/// // Pull-to-refresh
/// feed.refetch().await;
/// let posts = feed.data().await;
/// ```
pub struct RemoteResource<T> {
    producer: Producer<T>,
    state: Arc<Mutex<ResourceState<T>>>,
}

impl<T> Clone for RemoteResource<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + 'static> RemoteResource<T> {
    /// Create the resource and immediately start the first fetch.
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let resource = Self::build(producer, true);
        resource.spawn_refetch();
        resource
    }

    /// Create the resource without fetching; callers refetch explicitly.
    pub fn suspended<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self::build(producer, false)
    }

    fn build<F, Fut>(producer: F, is_loading: bool) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let producer: Producer<T> = Arc::new(move || Box::pin(producer()));
        Self {
            producer,
            state: Arc::new(Mutex::new(ResourceState {
                data: None,
                is_loading,
                error: None,
            })),
        }
    }

    /// Run one fetch cycle to completion.
    ///
    /// Overlapping calls are neither queued nor cancelled; each writes
    /// the state when it resolves, so the last resolution wins.
    pub async fn refetch(&self) {
        {
            let mut state = self.state.lock().await;
            state.is_loading = true;
            state.error = None;
        }

        let result = (self.producer)().await;

        let mut state = self.state.lock().await;
        state.is_loading = false;
        match result {
            Ok(data) => {
                state.data = Some(data);
            }
            Err(e) => {
                // Stale data beats a blank screen; only the error is replaced
                state.error = Some(e.to_string());
            }
        }
    }

    /// Start a fetch without awaiting it.
    pub fn spawn_refetch(&self) -> JoinHandle<()> {
        let resource = self.clone();
        tokio::spawn(async move { resource.refetch().await })
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ResourceState<T> {
        self.state.lock().await.clone()
    }

    /// Copy of the current data, if any.
    pub async fn data(&self) -> Option<T> {
        self.state.lock().await.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_api_client::ApiError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn remote_failure() -> SdkError {
        SdkError::Remote(ApiError::Server {
            status: 500,
            message: "backend down".to_string(),
        })
    }

    #[tokio::test]
    async fn test_refetch_resolves_data() {
        let resource = RemoteResource::suspended(|| async { Ok(vec![1, 2, 3]) });

        assert!(resource.data().await.is_none());
        resource.refetch().await;

        let state = resource.snapshot().await;
        assert_eq!(state.data, Some(vec![1, 2, 3]));
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_loading_only_while_fetch_in_flight() {
        let gate = Arc::new(Semaphore::new(0));
        let producer_gate = Arc::clone(&gate);
        let resource = RemoteResource::suspended(move || {
            let gate = Arc::clone(&producer_gate);
            async move {
                let permit = gate.acquire_owned().await.expect("gate closed");
                permit.forget();
                Ok(42u32)
            }
        });

        assert!(!resource.snapshot().await.is_loading);

        let handle = resource.spawn_refetch();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(resource.snapshot().await.is_loading);

        gate.add_permits(1);
        handle.await.unwrap();

        let state = resource.snapshot().await;
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(42));
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_stale_data() {
        let calls = Arc::new(AtomicU32::new(0));
        let producer_calls = Arc::clone(&calls);
        let resource = RemoteResource::suspended(move || {
            let calls = Arc::clone(&producer_calls);
            async move {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 => Ok("fresh".to_string()),
                    1 => Err(remote_failure()),
                    _ => Ok("newer".to_string()),
                }
            }
        });

        resource.refetch().await;
        resource.refetch().await;

        let state = resource.snapshot().await;
        assert_eq!(state.data.as_deref(), Some("fresh"));
        assert!(state.error.is_some());
        assert!(!state.is_loading);

        // The next fetch clears the error again
        resource.refetch().await;
        let state = resource.snapshot().await;
        assert_eq!(state.data.as_deref(), Some("newer"));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_double_refetch_is_idempotent() {
        let resource = RemoteResource::suspended(|| async { Ok(vec!["a", "b"]) });

        resource.refetch().await;
        resource.refetch().await;

        assert_eq!(resource.data().await, Some(vec!["a", "b"]));
    }

    #[tokio::test]
    async fn test_last_resolution_wins() {
        let calls = Arc::new(AtomicU32::new(0));
        let producer_calls = Arc::clone(&calls);
        let resource = RemoteResource::suspended(move || {
            let calls = Arc::clone(&producer_calls);
            async move {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 => {
                        tokio::time::sleep(Duration::from_millis(80)).await;
                        Ok("slow first")
                    }
                    _ => {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Ok("fast second")
                    }
                }
            }
        });

        tokio::join!(resource.refetch(), resource.refetch());

        // The first call resolved last, so its value is the one kept
        assert_eq!(resource.data().await, Some("slow first"));
    }

    #[tokio::test]
    async fn test_new_fetches_immediately() {
        let resource = RemoteResource::new(|| async { Ok("ready".to_string()) });

        for _ in 0..50 {
            if resource.data().await.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(resource.data().await.as_deref(), Some("ready"));
    }
}
