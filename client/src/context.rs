//! Client auth context: the single-writer session state machine.
//!
//! DESIGN
//! ======
//! All transitions funnel through one cell guarded by a mutex and stamped
//! with a monotonic generation. An async resolution captures the generation
//! when it starts and applies its outcome only if no other transition won in
//! the meantime, so a logout or forced expiry always beats an in-flight
//! resolve. Every transition publishes the new state exactly once through a
//! watch channel; views subscribe instead of polling.

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

use std::sync::Arc;

use models::{AuthResponse, RegisterRequest, User};
use parking_lot::Mutex;
use session::{Credential, CredentialStore, SessionState, StoreError};
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::resolver::{Resolution, SessionResolver};

struct CellState {
    state: SessionState,
    generation: u64,
}

/// The shared transition point for session state. The API client holds a
/// reference so an observed authentication failure can force expiry.
pub(crate) struct SessionCell {
    current: Mutex<CellState>,
    tx: watch::Sender<SessionState>,
}

impl SessionCell {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Unauthenticated);
        Self {
            current: Mutex::new(CellState { state: SessionState::Unauthenticated, generation: 0 }),
            tx,
        }
    }

    fn snapshot(&self) -> SessionState {
        self.current.lock().state.clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Transition unconditionally; returns the new generation. Publishing
    /// happens under the lock so subscribers observe transitions in order.
    fn transition(&self, next: SessionState) -> u64 {
        let mut current = self.current.lock();
        current.generation += 1;
        tracing::info!(from = current.state.label(), to = next.label(), "session transition");
        current.state = next.clone();
        self.tx.send_replace(next);
        current.generation
    }

    /// Apply only if no other transition happened since `generation`.
    fn transition_if(&self, generation: u64, next: SessionState) -> bool {
        let mut current = self.current.lock();
        if current.generation != generation {
            return false;
        }
        current.generation += 1;
        tracing::info!(from = current.state.label(), to = next.label(), "session transition");
        current.state = next.clone();
        self.tx.send_replace(next);
        true
    }

    /// Forced expiry after an authentication failure. At most one observable
    /// transition: a session already expired or logged out stays put.
    pub(crate) fn force_expire(&self, store: &CredentialStore) {
        {
            let mut current = self.current.lock();
            if matches!(current.state, SessionState::Expired | SessionState::Unauthenticated) {
                return;
            }
            current.generation += 1;
            current.state = SessionState::Expired;
            self.tx.send_replace(SessionState::Expired);
        }
        if let Err(error) = store.clear() {
            tracing::error!(%error, "credential clear failed during forced expiry");
        }
        tracing::warn!("session expired by authentication failure");
    }
}

/// Process-wide cached identity and the operations that mutate it.
///
/// Single writer, many readers: every transition goes through the cell, and
/// the current state is observable via [`AuthContext::state`] or a
/// [`AuthContext::subscribe`] watch receiver.
pub struct AuthContext {
    config: ClientConfig,
    store: CredentialStore,
    api: ApiClient,
    resolver: SessionResolver,
    cell: Arc<SessionCell>,
}

impl AuthContext {
    /// Context over an in-memory credential store.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_store(config, CredentialStore::in_memory())
    }

    /// Context over a caller-supplied store (e.g. one hydrated from a
    /// persisted cookie).
    #[must_use]
    pub fn with_store(config: ClientConfig, store: CredentialStore) -> Self {
        let cell = Arc::new(SessionCell::new());
        let api = ApiClient::new(&config, store.clone()).with_session(Arc::clone(&cell));
        let resolver = SessionResolver::new(api.clone(), store.clone(), config.resolve_timeout);
        Self { config, store, api, resolver, cell }
    }

    /// The API client wired to this context's store and expiry hook.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.cell.snapshot()
    }

    /// Subscribe to state transitions. Each transition is published once.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.cell.subscribe()
    }

    /// Mount-time synchronization with server truth: no credential means
    /// `Unauthenticated` without any network call; otherwise resolve.
    pub async fn initialize(&self) -> SessionState {
        if !self.store.is_present() {
            self.cell.transition(SessionState::Unauthenticated);
            return self.state();
        }
        self.run_resolution().await
    }

    /// Re-resolve the session; the retry affordance when the state is
    /// [`SessionState::Error`].
    pub async fn refresh_session(&self) -> SessionState {
        self.run_resolution().await
    }

    async fn run_resolution(&self) -> SessionState {
        let generation = self.cell.transition(SessionState::Resolving);
        let next = match self.resolver.resolve().await {
            Ok(Resolution::Identity(user)) => SessionState::Authenticated(user),
            Ok(Resolution::NoSession) => SessionState::Unauthenticated,
            Err(error) => SessionState::Error(error.to_string()),
        };
        if !self.cell.transition_if(generation, next) {
            tracing::debug!("stale resolution result discarded");
        }
        self.state()
    }

    /// Log in. On success the identity comes straight from the response
    /// payload, with no extra resolve round trip, and the credential is stored
    /// with the configured TTL.
    ///
    /// # Errors
    ///
    /// Login rejections and store write failures are returned to the caller;
    /// context state is left untouched so the form can render the error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let auth = self.api.login(email, password).await?;
        self.adopt(auth)
    }

    /// Register a new account; same contract as [`AuthContext::login`].
    ///
    /// # Errors
    ///
    /// As [`AuthContext::login`].
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, ApiError> {
        let request = RegisterRequest::new(email, password, first_name, last_name);
        let auth = self.api.register(&request).await?;
        self.adopt(auth)
    }

    fn adopt(&self, auth: AuthResponse) -> Result<User, ApiError> {
        let credential = Credential::with_ttl(auth.token, self.config.token_ttl());
        self.store.set(credential)?;
        self.cell.transition(SessionState::Authenticated(auth.user.clone()));
        Ok(auth.user)
    }

    /// Log out. The local transition is synchronous and authoritative: the
    /// store is cleared and `Unauthenticated` published before the single
    /// best-effort server-side invalidation is spawned. A failure of that
    /// notification never rolls the local state back.
    ///
    /// # Errors
    ///
    /// A store clear failure is surfaced after the state transition has
    /// already been published.
    pub fn logout(&self) -> Result<(), StoreError> {
        let credential = self.store.get();
        let result = self.store.clear();
        self.cell.transition(SessionState::Unauthenticated);

        if let Some(credential) = credential {
            let api = self.api.clone();
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    if let Err(error) = api.logout_with(&credential).await {
                        tracing::warn!(%error, "server-side logout notification failed");
                    }
                });
            } else {
                tracing::warn!("no async runtime; server-side logout notification skipped");
            }
        }
        result
    }

    /// Invalidate the session after an observed authentication failure,
    /// transitioning to `Expired` (not `Unauthenticated`) so the UI can say
    /// "session expired" rather than "logged out".
    pub fn force_expire(&self) {
        self.cell.force_expire(&self.store);
    }
}
