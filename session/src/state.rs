//! The authoritative session state observed by the UI layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards redirect on credential *presence*; everything that renders a
//! user needs this finer-grained state. It is derived, not independently
//! mutable: only the auth context's operations transition it.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use models::User;

/// Current authentication status.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// No credential, or the user logged out.
    #[default]
    Unauthenticated,
    /// A stored credential is being exchanged for an identity.
    Resolving,
    /// Identity resolved. The user record is replaced wholesale on each
    /// resolution, never patched in place.
    Authenticated(User),
    /// The credential was rejected mid-session; distinct from a voluntary
    /// logout so the UI can say "session expired" instead of "please log in".
    Expired,
    /// Resolution failed for a non-auth reason (identity service down). Not
    /// the same as logged out: the UI offers a retry instead of redirecting.
    Error(String),
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The resolved user, when authenticated.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Resolving => "resolving",
            Self::Authenticated(_) => "authenticated",
            Self::Expired => "expired",
            Self::Error(_) => "error",
        }
    }
}
