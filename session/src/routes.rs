//! Route classification and the guard decision table.
//!
//! DESIGN
//! ======
//! The partition of paths into Public / Protected / AuthOnly is static
//! configuration, validated once at startup. Evaluation order is fixed and
//! correctness-relevant: exempt prefixes first (asset traffic), then the
//! public list, then the auth prefix, then the protected default.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

/// Malformed route configuration. Fatal at startup, never at request time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("route path must start with '/': {0:?}")]
    RelativePath(String),
    #[error("duplicate public path: {0:?}")]
    DuplicatePublicPath(String),
    #[error("login path {login:?} must live under the auth prefix {prefix:?}")]
    LoginOutsideAuthPrefix { login: String, prefix: String },
    #[error("landing path {landing:?} must not live under the auth prefix {prefix:?}")]
    LandingInsideAuthPrefix { landing: String, prefix: String },
}

/// Static class of an addressable path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable with or without a credential.
    Public,
    /// Requires a credential to be present.
    Protected,
    /// Login/register pages; redirected away from when a credential exists.
    AuthOnly,
}

/// Outcome of one guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send to the login page, preserving the original path as a return
    /// target.
    RedirectToLogin { from: String },
    /// Already holding a credential on an auth page; send to the landing
    /// page instead.
    RedirectToLanding,
}

/// The static route partition plus redirect targets.
#[derive(Clone, Debug)]
pub struct RoutePolicy {
    public: Vec<String>,
    exempt_prefixes: Vec<String>,
    auth_prefix: String,
    login_path: String,
    landing_path: String,
}

impl RoutePolicy {
    /// Build and validate a policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when any path is relative, a public path is
    /// duplicated, the login page falls outside the auth prefix, or the
    /// landing page falls inside it (which would redirect forever).
    pub fn new(
        public: impl IntoIterator<Item = impl Into<String>>,
        auth_prefix: impl Into<String>,
        login_path: impl Into<String>,
        landing_path: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let public: Vec<String> = public.into_iter().map(Into::into).collect();
        let auth_prefix = auth_prefix.into();
        let login_path = login_path.into();
        let landing_path = landing_path.into();

        for path in public.iter().chain([&auth_prefix, &login_path, &landing_path]) {
            if !path.starts_with('/') {
                return Err(ConfigError::RelativePath(path.clone()));
            }
        }
        for (index, path) in public.iter().enumerate() {
            if public[..index].contains(path) {
                return Err(ConfigError::DuplicatePublicPath(path.clone()));
            }
        }

        let policy = Self {
            public,
            exempt_prefixes: Vec::new(),
            auth_prefix,
            login_path,
            landing_path,
        };
        if !policy.is_under_auth_prefix(&policy.login_path) {
            return Err(ConfigError::LoginOutsideAuthPrefix {
                login: policy.login_path,
                prefix: policy.auth_prefix,
            });
        }
        if policy.is_under_auth_prefix(&policy.landing_path) {
            return Err(ConfigError::LandingInsideAuthPrefix {
                landing: policy.landing_path,
                prefix: policy.auth_prefix,
            });
        }
        Ok(policy)
    }

    /// Add prefixes the guard skips entirely (static assets, health checks).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RelativePath`] for a prefix not starting with
    /// `/`.
    pub fn with_exempt_prefixes(
        mut self,
        prefixes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ConfigError> {
        for prefix in prefixes {
            let prefix = prefix.into();
            if !prefix.starts_with('/') {
                return Err(ConfigError::RelativePath(prefix));
            }
            self.exempt_prefixes.push(prefix);
        }
        Ok(self)
    }

    /// The dashboard application's partition: `/` public, `/auth/*` auth-only,
    /// everything else protected, landing on `/dashboard`.
    #[must_use]
    pub fn dashboard() -> Self {
        Self {
            public: vec!["/".into(), "/about".into()],
            exempt_prefixes: vec!["/static/".into(), "/favicon.ico".into(), "/healthz".into()],
            auth_prefix: "/auth".into(),
            login_path: "/auth/login".into(),
            landing_path: "/dashboard".into(),
        }
    }

    fn is_under_auth_prefix(&self, path: &str) -> bool {
        path == self.auth_prefix
            || path
                .strip_prefix(&self.auth_prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Whether the guard skips this path entirely.
    #[must_use]
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes.iter().any(|prefix| path.starts_with(prefix))
    }

    /// Classify a path. The public list wins over the auth prefix.
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.public.iter().any(|public| public == path) {
            return RouteClass::Public;
        }
        if self.is_under_auth_prefix(path) {
            return RouteClass::AuthOnly;
        }
        RouteClass::Protected
    }

    /// The guard decision table, evaluated in fixed order; first match wins.
    #[must_use]
    pub fn decide(&self, path: &str, has_credential: bool) -> GuardDecision {
        if self.is_exempt(path) {
            return GuardDecision::Allow;
        }
        match (self.classify(path), has_credential) {
            (RouteClass::Public, _) => GuardDecision::Allow,
            (RouteClass::Protected, false) => GuardDecision::RedirectToLogin { from: path.to_owned() },
            (RouteClass::AuthOnly, true) => GuardDecision::RedirectToLanding,
            _ => GuardDecision::Allow,
        }
    }

    /// Login URL carrying the original path, e.g.
    /// `/auth/login?from=%2Fdashboard`.
    #[must_use]
    pub fn login_redirect_target(&self, from: &str) -> String {
        format!("{}?from={}", self.login_path, urlencoding::encode(from))
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }
}
