//! Navigation guard middleware.
//!
//! TRADE-OFFS
//! ==========
//! The guard checks credential PRESENCE only (no resolution, no I/O), so it
//! runs synchronously on every navigation without backpressure concerns. An
//! expired-but-present credential gets past the guard; the session resolver
//! and the API client catch it downstream.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::credential::Credential;
use crate::routes::{GuardDecision, RoutePolicy};

/// Shared guard state: the static route partition.
///
/// Mount on a host router with
/// `router.layer(axum::middleware::from_fn_with_state(guard, route_guard))`.
#[derive(Clone)]
pub struct Guard {
    policy: Arc<RoutePolicy>,
}

impl Guard {
    #[must_use]
    pub fn new(policy: RoutePolicy) -> Self {
        Self { policy: Arc::new(policy) }
    }

    #[must_use]
    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }
}

/// Middleware entry point; runs once per incoming request, before any page
/// logic.
pub async fn route_guard(
    State(guard): State<Guard>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let has_credential = Credential::from_jar(&jar).is_some();

    match guard.policy.decide(&path, has_credential) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::RedirectToLogin { from } => {
            let target = guard.policy.login_redirect_target(&from);
            tracing::debug!(%path, %target, "unauthenticated navigation, redirecting to login");
            Redirect::temporary(&target).into_response()
        }
        GuardDecision::RedirectToLanding => {
            tracing::debug!(%path, "credentialed visit to auth page, redirecting to landing");
            Redirect::temporary(guard.policy.landing_path()).into_response()
        }
    }
}
