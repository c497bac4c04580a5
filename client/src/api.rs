//! Authenticated API client.
//!
//! DESIGN
//! ======
//! Every authenticated call reads the credential store first and fails fast
//! with `NotAuthenticated` when it is empty; no request leaves the process
//! that a backend might still accept. Responses are classified into the
//! error taxonomy at this boundary; an authentication failure notifies the
//! session cell exactly once per failed call, after the optional single
//! refresh-and-retry has been exhausted.

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use std::sync::Arc;

use models::{ApiErrorBody, AuthResponse, LoginRequest, RegisterRequest, User};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use session::{Credential, CredentialStore};

use crate::config::ClientConfig;
use crate::context::SessionCell;
use crate::error::ApiError;

pub(crate) const LOGIN_PATH: &str = "/api/auth/login/";
pub(crate) const REGISTER_PATH: &str = "/api/auth/register/";
pub(crate) const LOGOUT_PATH: &str = "/api/auth/logout/";
pub(crate) const PROFILE_PATH: &str = "/api/users/profile/";

pub(crate) fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// HTTP client that injects the stored bearer credential into every call.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    store: CredentialStore,
    refresh_path: Option<String>,
    token_ttl: time::Duration,
    session: Option<Arc<SessionCell>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: &ClientConfig, store: CredentialStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.api_url.clone(),
            store,
            refresh_path: config.refresh_path.clone(),
            token_ttl: config.token_ttl(),
            session: None,
        }
    }

    /// Wire the session cell so authentication failures force expiry.
    pub(crate) fn with_session(mut self, session: Arc<SessionCell>) -> Self {
        self.session = Some(session);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn authed(&self, method: Method, path: &str, credential: &Credential) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(AUTHORIZATION, credential.bearer())
    }

    // =========================================================================
    // GENERIC AUTHENTICATED VERBS
    // =========================================================================

    /// `GET` an authenticated JSON resource.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the classification contract.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_authed(Method::GET, path, None::<&()>).await?;
        Self::decode(response).await
    }

    /// `POST` a JSON body and decode the created resource.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send_authed(Method::POST, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// `PATCH` a partial JSON body and decode the updated resource.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send_authed(Method::PATCH, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// `POST` with no body, ignoring any response payload.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send_authed(Method::POST, path, None::<&()>).await?;
        Ok(())
    }

    /// `DELETE` a resource; 2xx (including 204) is success.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_authed(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// Core authenticated send path. Returns only successful responses;
    /// everything else is classified into [`ApiError`].
    async fn send_authed<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        // Fail fast: zero network I/O without a credential.
        let Some(credential) = self.store.get() else {
            return Err(ApiError::NotAuthenticated);
        };

        let mut builder = self.authed(method.clone(), path, &credential);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if !is_auth_failure(status) {
            return Err(Self::classify_error(response).await);
        }

        // At most one silent refresh-and-retry, and only when the issuer
        // exposes a refresh endpoint.
        if let Some(fresh) = self.try_refresh(&credential).await {
            let mut retry = self.authed(method, path, &fresh);
            if let Some(body) = body {
                retry = retry.json(body);
            }
            let response = retry.send().await?;
            let retry_status = response.status();
            if retry_status.is_success() {
                return Ok(response);
            }
            if !is_auth_failure(retry_status) {
                return Err(Self::classify_error(response).await);
            }
            self.notify_auth_failure();
            return Err(ApiError::AuthenticationFailure { status: retry_status.as_u16() });
        }

        self.notify_auth_failure();
        Err(ApiError::AuthenticationFailure { status: status.as_u16() })
    }

    /// One silent refresh attempt against the configured endpoint. Returns
    /// the fresh credential only once it is stored.
    async fn try_refresh(&self, stale: &Credential) -> Option<Credential> {
        let path = self.refresh_path.as_deref()?;
        let mut builder = self.http.post(self.url(path)).header(AUTHORIZATION, stale.bearer());
        if let Some(refresh) = stale.refresh_token() {
            builder = builder.json(&serde_json::json!({ "refresh": refresh }));
        }
        let response = builder.send().await.ok()?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "token refresh rejected");
            return None;
        }

        #[derive(serde::Deserialize)]
        struct RefreshResponse {
            token: String,
            #[serde(default)]
            refresh: Option<String>,
        }
        let body: RefreshResponse = response.json().await.ok()?;
        let mut credential = Credential::with_ttl(body.token, self.token_ttl);
        if let Some(refresh) = body.refresh {
            credential = credential.with_refresh_token(refresh);
        }
        match self.store.set(credential.clone()) {
            Ok(()) => Some(credential),
            Err(error) => {
                tracing::error!(%error, "refreshed credential could not be stored");
                None
            }
        }
    }

    fn notify_auth_failure(&self) {
        if let Some(session) = &self.session {
            session.force_expire(&self.store);
        }
    }

    // =========================================================================
    // TOKEN ISSUER ENDPOINTS
    // =========================================================================

    /// `POST /api/auth/login/`, sent without a credential. Auth-class statuses
    /// here are business errors (bad credentials), not session faults, so
    /// the login form can render them without touching session state.
    ///
    /// # Errors
    ///
    /// `RequestError` with the server's message on rejection, `Transport` on
    /// network/5xx failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        self.post_public(LOGIN_PATH, &request).await
    }

    /// `POST /api/auth/register/`: same contract as login, additionally
    /// creating the account.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::login`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_public(REGISTER_PATH, request).await
    }

    /// `POST /api/auth/logout/` with an explicit credential; used by the
    /// context after it has already cleared the store.
    ///
    /// # Errors
    ///
    /// Classification as usual; callers treat any error as best-effort.
    pub async fn logout_with(&self, credential: &Credential) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(LOGOUT_PATH))
            .header(AUTHORIZATION, credential.bearer())
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::classify_error(response).await)
        }
    }

    /// `GET /api/users/profile/` through the normal authenticated path.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get(PROFILE_PATH).await
    }

    /// Identity lookup for the session resolver: no refresh, no forced-expiry
    /// notification. Credential invalidation on 401/403 during resolution is
    /// the resolver's job alone, so it is not duplicated here.
    pub(crate) async fn fetch_profile_quiet(&self) -> Result<User, ApiError> {
        let Some(credential) = self.store.get() else {
            return Err(ApiError::NotAuthenticated);
        };
        let response = self.authed(Method::GET, PROFILE_PATH, &credential).send().await?;
        let status = response.status();
        if status.is_success() {
            return Self::decode(response).await;
        }
        if is_auth_failure(status) {
            return Err(ApiError::AuthenticationFailure { status: status.as_u16() });
        }
        Err(Self::classify_error(response).await)
    }

    async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        if response.status().is_success() {
            Self::decode(response).await
        } else {
            Err(Self::classify_error(response).await)
        }
    }

    // =========================================================================
    // CLASSIFICATION
    // =========================================================================

    /// Decode a successful response. A malformed body is an error; resources
    /// and identities are never built from partial payloads.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|error| ApiError::RequestError {
            status: status.as_u16(),
            message: format!("malformed response body: {error}"),
        })
    }

    /// Classify a non-success response into transport or request error. The
    /// public endpoints route auth-class statuses here deliberately: a 401
    /// from login is a bad password, not a session fault.
    async fn classify_error(response: Response) -> ApiError {
        let status = response.status();
        if status.is_server_error() {
            return ApiError::Transport(format!("server error {status}"));
        }
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        ApiError::RequestError {
            status: status.as_u16(),
            message: body.message_or("request failed"),
        }
    }
}
