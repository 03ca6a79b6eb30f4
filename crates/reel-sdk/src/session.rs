//! Session state and auth flows
//!
//! One `SessionManager` exists per running app. It is an explicitly
//! owned, cloneable handle rather than ambient global state, so tests
//! and previews can construct their own against a mock backend.

use crate::error::{Result, SdkError};
use crate::remote::RemoteBackend;
use reel_api_client::Identity;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Read-only view of the session state
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// The authenticated identity, if known
    pub identity: Option<Identity>,
    /// True until the initial session probe resolves
    pub is_loading: bool,
}

/// What a screen may conclude about the session
///
/// `Unknown` (probe still unresolved) is distinct from `SignedOut`
/// (probe resolved, no session): auth-gated UI must not render while
/// the answer is `Unknown`.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    Unknown,
    SignedIn(Identity),
    SignedOut,
}

struct SessionState {
    identity: Option<Identity>,
    is_loading: bool,
}

/// Process-wide session holder and auth entry points
#[derive(Clone)]
pub struct SessionManager {
    remote: Arc<dyn RemoteBackend>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionManager {
    /// Create a manager in the pre-probe state (`is_loading = true`).
    pub fn new(remote: Arc<dyn RemoteBackend>) -> Self {
        Self {
            remote,
            state: Arc::new(RwLock::new(SessionState {
                identity: None,
                is_loading: true,
            })),
        }
    }

    /// Resolve the initial "who am I" probe. Called once at startup.
    ///
    /// Every outcome resolves the loading flag. An absent session and a
    /// transport failure both land in the signed-out state; neither is
    /// surfaced to the user.
    pub async fn probe(&self) {
        let identity = match self.remote.probe_session().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Session probe failed, treating as signed out");
                None
            }
        };

        let mut state = self.state.write().await;
        state.identity = identity;
        state.is_loading = false;
    }

    /// Open a session with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SdkError::Validation("Please fill in all fields".to_string()));
        }

        let identity = self.remote.sign_in(email, password).await?;
        self.complete_auth(identity.clone()).await;
        Ok(identity)
    }

    /// Create an account and open a session for it.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<Identity> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(SdkError::Validation("Please fill in all fields".to_string()));
        }

        let identity = self.remote.create_account(username, email, password).await?;
        self.complete_auth(identity.clone()).await;
        Ok(identity)
    }

    /// Delete the backend session, then clear local state.
    ///
    /// Local state is untouched when the backend call fails, so the UI
    /// cannot believe the user is signed out while the backend still
    /// honors the old session.
    pub async fn sign_out(&self) -> Result<()> {
        self.remote.sign_out().await?;
        self.clear_session().await;
        Ok(())
    }

    /// Record a confirmed identity.
    ///
    /// No network round-trip happens here; callers already hold the
    /// identity the backend returned.
    pub async fn complete_auth(&self, identity: Identity) {
        debug!(user = %identity.username, "Session opened");
        let mut state = self.state.write().await;
        state.identity = Some(identity);
        state.is_loading = false;
    }

    /// Drop the local identity.
    pub async fn clear_session(&self) {
        let mut state = self.state.write().await;
        state.identity = None;
        state.is_loading = false;
    }

    /// Current session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            identity: state.identity.clone(),
            is_loading: state.is_loading,
        }
    }

    /// Current session state, collapsed for gating decisions.
    pub async fn status(&self) -> AuthStatus {
        let state = self.state.read().await;
        if state.is_loading {
            return AuthStatus::Unknown;
        }
        match &state.identity {
            Some(identity) => AuthStatus::SignedIn(identity.clone()),
            None => AuthStatus::SignedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockRemote;

    fn dana() -> Identity {
        Identity {
            id: "user-1".to_string(),
            username: "dana".to_string(),
            avatar_url: "https://cdn.reel.test/avatars/dana.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_status_is_unknown_before_probe() {
        let session = SessionManager::new(Arc::new(MockRemote::new()));

        assert_eq!(session.status().await, AuthStatus::Unknown);
        assert!(session.snapshot().await.is_loading);
    }

    #[tokio::test]
    async fn test_probe_resolves_active_session() {
        let remote = Arc::new(MockRemote::new().with_identity(dana()));
        let session = SessionManager::new(remote.clone());

        session.probe().await;

        assert_eq!(session.status().await, AuthStatus::SignedIn(dana()));
        assert_eq!(remote.probe_count(), 1);
    }

    #[tokio::test]
    async fn test_probe_without_session_is_signed_out() {
        let session = SessionManager::new(Arc::new(MockRemote::new()));

        session.probe().await;

        let snapshot = session.snapshot().await;
        assert!(snapshot.identity.is_none());
        assert!(!snapshot.is_loading);
        assert_eq!(session.status().await, AuthStatus::SignedOut);
    }

    #[tokio::test]
    async fn test_probe_failure_is_signed_out_not_an_error() {
        let session = SessionManager::new(Arc::new(MockRemote::new().with_probe_failure()));

        session.probe().await;

        assert_eq!(session.status().await, AuthStatus::SignedOut);
    }

    #[tokio::test]
    async fn test_sign_in_records_identity_synchronously() {
        let remote = Arc::new(MockRemote::new().with_identity(dana()));
        let session = SessionManager::new(remote);

        let identity = session.sign_in("dana@example.com", "hunter2").await.unwrap();

        assert_eq!(identity, dana());
        assert_eq!(session.status().await, AuthStatus::SignedIn(dana()));
    }

    #[tokio::test]
    async fn test_sign_in_validates_before_any_network_call() {
        let remote = Arc::new(MockRemote::new().with_identity(dana()));
        let session = SessionManager::new(remote.clone());

        let err = session.sign_in("", "hunter2").await.unwrap_err();

        assert!(matches!(err, SdkError::Validation(_)));
        assert_eq!(remote.auth_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_opens_session() {
        let remote = Arc::new(MockRemote::new());
        let session = SessionManager::new(remote.clone());

        let identity = session
            .sign_up("dana", "dana@example.com", "hunter2")
            .await
            .unwrap();

        assert_eq!(identity.username, "dana");
        assert_eq!(session.status().await, AuthStatus::SignedIn(identity));
        assert_eq!(remote.auth_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_sign_out_keeps_the_session() {
        let remote = Arc::new(
            MockRemote::new()
                .with_identity(dana())
                .with_sign_out_failure(),
        );
        let session = SessionManager::new(remote);
        session.probe().await;

        let result = session.sign_out().await;

        assert!(result.is_err());
        assert_eq!(session.status().await, AuthStatus::SignedIn(dana()));
    }

    #[tokio::test]
    async fn test_sign_out_clears_after_backend_confirms() {
        let remote = Arc::new(MockRemote::new().with_identity(dana()));
        let session = SessionManager::new(remote.clone());
        session.probe().await;

        session.sign_out().await.unwrap();

        assert_eq!(session.status().await, AuthStatus::SignedOut);
        assert_eq!(remote.sign_out_count(), 1);
    }
}
