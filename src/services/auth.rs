use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

use crate::api::client::ChatApi;
use crate::api::error::ApiError;
use crate::api::types::LoginResponse;
use crate::config::ClientConfig;
use crate::models::User;
use crate::services::store::CredentialStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unauthenticated,
    Verifying,
    Authenticated,
}

/// Snapshot of the authentication state, published to subscribers on every
/// transition. `token` and `user` are both set or both `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub status: AuthStatus,
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    fn unauthenticated() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            token: None,
            user: None,
        }
    }

    fn verifying(token: String, user: User) -> Self {
        Self {
            status: AuthStatus::Verifying,
            token: Some(token),
            user: Some(user),
        }
    }

    fn authenticated(token: String, user: User) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            token: Some(token),
            user: Some(user),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

/// Owns the authentication lifecycle: startup verification of a persisted
/// token, credential exchange on login, logout, and the forced logout a
/// rejected token triggers mid-session.
///
/// The session snapshot is published through a watch channel; a transition to
/// `Unauthenticated` doubles as the navigate-back-to-login signal for the UI.
pub struct AuthSession {
    api: Arc<dyn ChatApi>,
    store: CredentialStore,
    state: watch::Sender<Session>,
    login_busy: AtomicBool,
    login_timeout: Duration,
    verify_timeout: Duration,
}

impl AuthSession {
    pub async fn new(api: Arc<dyn ChatApi>, store: CredentialStore, config: &ClientConfig) -> Self {
        // A persisted pair starts the session in Verifying so the UI shows a
        // loading state instead of flashing the login screen before
        // bootstrap() has had a chance to run.
        let initial = match store.load().await {
            Ok(Some((token, user))) => Session::verifying(token, user),
            Ok(None) => Session::unauthenticated(),
            Err(e) => {
                tracing::error!("failed to read persisted credentials: {e:#}");
                Session::unauthenticated()
            }
        };
        let (state, _) = watch::channel(initial);

        Self {
            api,
            store,
            state,
            login_busy: AtomicBool::new(false),
            login_timeout: config.login_timeout,
            verify_timeout: config.verify_timeout,
        }
    }

    /// Resolve a persisted token into a live session, or clear it.
    ///
    /// Protected content must not render until this completes; subscribers
    /// see `Verifying` for the whole round-trip.
    pub async fn bootstrap(&self) {
        let (token, user) = match self.store.load().await {
            Ok(Some(pair)) => pair,
            Ok(None) => {
                self.state.send_replace(Session::unauthenticated());
                return;
            }
            Err(e) => {
                tracing::error!("failed to read persisted credentials: {e:#}");
                self.state.send_replace(Session::unauthenticated());
                return;
            }
        };

        self.state
            .send_replace(Session::verifying(token.clone(), user.clone()));

        let valid = match timeout(self.verify_timeout, self.api.verify_token(&token)).await {
            Ok(Ok(valid)) => valid,
            Ok(Err(e)) => {
                tracing::warn!("token verification failed: {e}");
                false
            }
            Err(_) => {
                tracing::warn!("token verification timed out");
                false
            }
        };

        if valid {
            self.state.send_replace(Session::authenticated(token, user));
        } else {
            self.clear_session().await;
        }
    }

    /// Exchange an identity-provider credential for a session.
    ///
    /// On success the pair is persisted and the session becomes
    /// `Authenticated`; on any failure (including the exchange deadline)
    /// nothing is persisted and the state is unchanged. A call arriving while
    /// another exchange is in flight is dropped.
    pub async fn complete_login(&self, provider: &str, credential: &str) -> Result<(), ApiError> {
        if self.login_busy.swap(true, Ordering::SeqCst) {
            tracing::warn!("login already in flight, dropping a second credential");
            return Ok(());
        }

        let result = timeout(
            self.login_timeout,
            self.api.exchange_credential(provider, credential),
        )
        .await;
        let outcome = self.apply_login_result(result).await;
        self.login_busy.store(false, Ordering::SeqCst);
        outcome
    }

    /// Exchange an OAuth authorization code for a session (the generic
    /// `/callback` form of login). Same rules as [`complete_login`].
    ///
    /// [`complete_login`]: AuthSession::complete_login
    pub async fn complete_oauth_callback(&self, provider: &str, code: &str) -> Result<(), ApiError> {
        if self.login_busy.swap(true, Ordering::SeqCst) {
            tracing::warn!("login already in flight, dropping a second authorization code");
            return Ok(());
        }

        let result = timeout(
            self.login_timeout,
            self.api.exchange_oauth_code(provider, code),
        )
        .await;
        let outcome = self.apply_login_result(result).await;
        self.login_busy.store(false, Ordering::SeqCst);
        outcome
    }

    async fn apply_login_result(
        &self,
        result: Result<Result<LoginResponse, ApiError>, tokio::time::error::Elapsed>,
    ) -> Result<(), ApiError> {
        let login = match result {
            Ok(Ok(login)) => login,
            Ok(Err(e)) => {
                tracing::warn!("login exchange failed: {e}");
                return Err(e);
            }
            Err(_) => {
                tracing::warn!("login exchange timed out");
                return Err(ApiError::Timeout);
            }
        };

        // Persistence failure only costs the next reload; the session itself
        // is valid, so it still comes up.
        if let Err(e) = self.store.save(&login.token, &login.user).await {
            tracing::error!("failed to persist credentials: {e:#}");
        }
        self.state
            .send_replace(Session::authenticated(login.token, login.user));
        Ok(())
    }

    /// Ends the session unconditionally. Safe from any state and idempotent.
    pub async fn logout(&self) {
        self.clear_session().await;
    }

    /// Forced logout after the backend rejected the session token.
    pub async fn invalidate(&self) {
        tracing::warn!("session token rejected by the backend, logging out");
        self.clear_session().await;
    }

    async fn clear_session(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::error!("failed to clear persisted credentials: {e:#}");
        }
        self.state.send_replace(Session::unauthenticated());
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().status == AuthStatus::Authenticated
    }
}
