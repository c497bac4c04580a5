//! Error taxonomy for the authenticated API boundary.
//!
//! Authentication-class failures are handled inside the auth core (forced
//! expiry + redirect); they must never leak into CRUD view code as generic
//! errors. Transport and request errors propagate to the calling view for
//! user-facing messaging.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Classified failure of an API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No credential present; the call was never sent.
    #[error("not authenticated")]
    NotAuthenticated,
    /// A credential was present but rejected (401/403).
    #[error("authentication rejected ({status})")]
    AuthenticationFailure { status: u16 },
    /// Business-level 4xx carrying the server's message. No session side
    /// effect.
    #[error("request failed ({status}): {message}")]
    RequestError { status: u16, message: String },
    /// Network failure or 5xx.
    #[error("transport error: {0}")]
    Transport(String),
    /// The credential store refused a write.
    #[error(transparent)]
    CredentialStore(#[from] session::StoreError),
}

impl ApiError {
    /// Whether a caller-level retry is reasonable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether this failure concerns the session itself rather than the
    /// request's business logic.
    #[must_use]
    pub fn is_session_fault(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::AuthenticationFailure { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
