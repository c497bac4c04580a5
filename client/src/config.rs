//! Client configuration from the environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

/// Where the original deployment expects the API when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Settings for the auth context and API client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the external API, without a trailing slash.
    pub api_url: String,
    /// Upper bound on one identity-resolution round trip. A hung resolution
    /// must not leave the UI in `Resolving` forever.
    pub resolve_timeout: Duration,
    /// Lifetime of stored credentials, in days.
    pub token_ttl_days: i64,
    /// Refresh endpoint path, when the token issuer exposes one. `None`
    /// disables silent refresh entirely.
    pub refresh_path: Option<String>,
    /// Whether persisted cookies are marked `Secure`.
    pub cookie_secure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    /// Configuration for a given API base URL; `Secure` is inferred from the
    /// scheme unless overridden.
    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        let cookie_secure = api_url.starts_with("https://");
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            resolve_timeout: Duration::from_millis(DEFAULT_RESOLVE_TIMEOUT_MS),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            refresh_path: None,
            cookie_secure,
        }
    }

    /// Read `API_URL`, `COOKIE_SECURE`, `AUTH_RESOLVE_TIMEOUT_MS`,
    /// `AUTH_TOKEN_TTL_DAYS` and `AUTH_REFRESH_PATH` from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::with_api_url(
            std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
        );
        if let Some(secure) = env_bool("COOKIE_SECURE") {
            config.cookie_secure = secure;
        }
        if let Ok(raw) = std::env::var("AUTH_RESOLVE_TIMEOUT_MS")
            && let Ok(millis) = raw.trim().parse()
        {
            config.resolve_timeout = Duration::from_millis(millis);
        }
        if let Ok(raw) = std::env::var("AUTH_TOKEN_TTL_DAYS")
            && let Ok(days) = raw.trim().parse()
        {
            config.token_ttl_days = days;
        }
        if let Ok(path) = std::env::var("AUTH_REFRESH_PATH")
            && !path.trim().is_empty()
        {
            config.refresh_path = Some(path.trim().to_owned());
        }
        config
    }

    /// Credential lifetime as a `time::Duration` for cookie math.
    #[must_use]
    pub fn token_ttl(&self) -> time::Duration {
        time::Duration::days(self.token_ttl_days)
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}
