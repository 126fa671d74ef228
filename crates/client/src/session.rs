//! Observable sign-in state.
//!
//! [`SessionState`] is the single owner of "who is signed in". Screens read
//! it through [`SessionState::subscribe`]; network access goes through the
//! injected [`SessionBackend`] and the token lives in the injected
//! [`TokenStore`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::domain::AuthUser;
use crate::error::ClientResult;
use crate::events::{AuthEvent, AuthEvents};
use crate::token_store::TokenStore;

/// Server calls the session state needs.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// The user owning the stored token.
    async fn fetch_session(&self) -> ClientResult<AuthUser>;

    /// Invalidate the stored token on the server.
    async fn sign_out(&self) -> ClientResult<()>;
}

struct Inner {
    backend: Arc<dyn SessionBackend>,
    tokens: Arc<dyn TokenStore>,
    user: watch::Sender<Option<AuthUser>>,
    loading: watch::Sender<bool>,
}

impl Inner {
    fn clear_local(&self) {
        self.tokens.delete();
        self.user.send_replace(None);
    }
}

/// Current user plus the loading flag shown while the stored token is checked.
///
/// Must be created inside a tokio runtime: construction spawns the task
/// that reacts to [`AuthEvent::Unauthorized`]. The task ends when this value
/// is dropped.
pub struct SessionState {
    inner: Arc<Inner>,
    listener: JoinHandle<()>,
}

impl SessionState {
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        tokens: Arc<dyn TokenStore>,
        events: &AuthEvents,
    ) -> Self {
        let (user, _) = watch::channel(None);
        let (loading, _) = watch::channel(true);
        let inner = Arc::new(Inner {
            backend,
            tokens,
            user,
            loading,
        });

        let listener = tokio::spawn(listen_for_unauthorized(
            Arc::clone(&inner),
            events.subscribe(),
        ));

        Self { inner, listener }
    }

    /// Watch the signed-in user.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.inner.user.subscribe()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.inner.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.user.borrow().is_some()
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.loading.borrow()
    }

    /// Watch the loading flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.inner.loading.subscribe()
    }

    /// Restore the session from the stored token, if there is one.
    ///
    /// Any failure signs the user out locally.
    pub async fn check_session(&self) {
        if self.inner.tokens.get_token().is_none() {
            self.inner.user.send_replace(None);
            self.inner.loading.send_replace(false);
            return;
        }

        match self.inner.backend.fetch_session().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Session restored");
                self.inner.user.send_replace(Some(user));
            }
            Err(e) => {
                tracing::info!(error = %e, "Stored session rejected");
                self.logout().await;
            }
        }
        self.inner.loading.send_replace(false);
    }

    /// Record a user obtained from a completed sign-in.
    pub fn login(&self, user: AuthUser) {
        tracing::debug!(user_id = %user.id, "Signed in");
        self.inner.user.send_replace(Some(user));
        self.inner.loading.send_replace(false);
    }

    /// Sign out on the server if possible, then drop local credentials.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.backend.sign_out().await {
            tracing::warn!(error = %e, "Server sign-out failed");
        }
        self.inner.clear_local();
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn listen_for_unauthorized(inner: Arc<Inner>, mut events: broadcast::Receiver<AuthEvent>) {
    loop {
        match events.recv().await {
            Ok(AuthEvent::Unauthorized) => {
                tracing::info!("Token rejected by server, clearing session");
                inner.clear_local();
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Auth events lagged, clearing session");
                inner.clear_local();
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
