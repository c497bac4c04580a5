//! Session resolver: exchange a stored credential for a verified identity.

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;

use std::time::Duration;

use models::User;
use session::CredentialStore;

use crate::api::ApiClient;
use crate::error::ApiError;

/// Outcome of a resolution that completed normally.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The credential is valid; here is who it belongs to.
    Identity(User),
    /// No usable credential. Terminal: the user is logged out.
    NoSession,
}

/// Resolves the stored credential against the identity service.
#[derive(Clone)]
pub struct SessionResolver {
    api: ApiClient,
    store: CredentialStore,
    timeout: Duration,
}

impl SessionResolver {
    #[must_use]
    pub fn new(api: ApiClient, store: CredentialStore, timeout: Duration) -> Self {
        Self { api, store, timeout }
    }

    /// Resolve the current credential.
    ///
    /// - Absent credential: `NoSession`, no network call.
    /// - 2xx: the parsed identity.
    /// - 401/403: the credential is invalid. It is cleared HERE, the single
    ///   invalidation point during resolution, and `NoSession` is returned.
    /// - Transport/5xx/timeout: an error distinct from `NoSession`; "the
    ///   identity service is down" must not read as "logged out".
    ///
    /// # Errors
    ///
    /// `Transport` for network failures, 5xx responses, and a resolution
    /// exceeding the bounded timeout; `RequestError` for other non-auth
    /// rejections; store failures surface as `CredentialStore`.
    pub async fn resolve(&self) -> Result<Resolution, ApiError> {
        if !self.store.is_present() {
            return Ok(Resolution::NoSession);
        }

        let lookup = tokio::time::timeout(self.timeout, self.api.fetch_profile_quiet()).await;
        match lookup {
            Err(_elapsed) => Err(ApiError::Transport(format!(
                "identity resolution timed out after {:?}",
                self.timeout
            ))),
            Ok(Ok(user)) => Ok(Resolution::Identity(user)),
            Ok(Err(ApiError::AuthenticationFailure { status })) => {
                tracing::info!(status, "stored credential rejected; clearing it");
                self.store.clear()?;
                Ok(Resolution::NoSession)
            }
            // The credential vanished between the presence check and the call
            // (e.g. a concurrent logout); that is a plain no-session.
            Ok(Err(ApiError::NotAuthenticated)) => Ok(Resolution::NoSession),
            Ok(Err(error)) => Err(error),
        }
    }
}
