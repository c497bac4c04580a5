//! Bearer credential and its cookie persistence scheme.

#[cfg(test)]
#[path = "credential_test.rs"]
mod tests;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

/// Cookie carrying the bearer token between navigations.
pub const CREDENTIAL_COOKIE: &str = "auth_token";

/// Token lifetime when the issuer does not dictate one.
pub const DEFAULT_TTL: Duration = Duration::days(7);

/// An opaque bearer value proving identity to the API.
///
/// At most one credential is stored per client context; writing a new one
/// replaces the old atomically (see [`crate::store::CredentialStore`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    token: String,
    refresh: Option<String>,
    issued_at: OffsetDateTime,
    expires_at: Option<OffsetDateTime>,
}

impl Credential {
    /// Credential issued now with the default lifetime.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_ttl(token, DEFAULT_TTL)
    }

    /// Credential issued now, expiring after `ttl`.
    #[must_use]
    pub fn with_ttl(token: impl Into<String>, ttl: Duration) -> Self {
        let now = OffsetDateTime::now_utc();
        Self { token: token.into(), refresh: None, issued_at: now, expires_at: Some(now + ttl) }
    }

    /// Credential with unknown expiry, e.g. read back from a cookie whose
    /// lifetime only the browser knows.
    #[must_use]
    pub fn opaque(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refresh: None,
            issued_at: OffsetDateTime::now_utc(),
            expires_at: None,
        }
    }

    /// Attach the issuer's secondary refresh value, when it provides one.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }

    /// The secondary refresh value, if the issuer provided one.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_deref()
    }

    /// The raw bearer value.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    #[must_use]
    pub fn issued_at(&self) -> OffsetDateTime {
        self.issued_at
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expires_at
    }

    /// Whether the known expiry has passed. An opaque credential never
    /// reports expired here; the resolver finds out from the issuer.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|at| at <= OffsetDateTime::now_utc())
    }

    /// Render as the persisted cookie. The cookie is client-readable
    /// (`http_only(false)`): the API client reads the same value it carries.
    #[must_use]
    pub fn to_cookie(&self, secure: bool) -> Cookie<'static> {
        let mut builder = Cookie::build((CREDENTIAL_COOKIE, self.token.clone()))
            .path("/")
            .http_only(false)
            .same_site(SameSite::Lax)
            .secure(secure);
        if let Some(expires_at) = self.expires_at {
            builder = builder.max_age(expires_at - self.issued_at);
        }
        builder.build()
    }

    /// Cookie that removes the credential on the next response.
    #[must_use]
    pub fn removal_cookie(secure: bool) -> Cookie<'static> {
        Cookie::build((CREDENTIAL_COOKIE, ""))
            .path("/")
            .http_only(false)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(Duration::ZERO)
            .build()
    }

    /// Read the credential from a request's cookie jar. An empty value
    /// counts as absent.
    #[must_use]
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let value = jar.get(CREDENTIAL_COOKIE).map(Cookie::value).unwrap_or_default();
        if value.is_empty() { None } else { Some(Self::opaque(value)) }
    }
}
