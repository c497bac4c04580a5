use super::*;
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use crate::api::PROFILE_PATH;
use crate::config::ClientConfig;
use crate::testing::{Hits, serve, user_json};
use session::Credential;

fn resolver_for(base: &str, store: &CredentialStore, timeout_ms: u64) -> SessionResolver {
    let api = ApiClient::new(&ClientConfig::with_api_url(base), store.clone());
    SessionResolver::new(api, store.clone(), Duration::from_millis(timeout_ms))
}

fn stored(token: &str) -> CredentialStore {
    let store = CredentialStore::in_memory();
    store.set(Credential::new(token)).unwrap();
    store
}

#[tokio::test]
async fn absent_credential_is_no_session_without_network() {
    let hits = Hits::new();
    let handler_hits = hits.clone();
    let router = Router::new().route(
        PROFILE_PATH,
        get(move || {
            let hits = handler_hits.clone();
            async move {
                hits.bump();
                Json(user_json("ada@example.com"))
            }
        }),
    );
    let base = serve(router).await;

    let store = CredentialStore::in_memory();
    let resolution = resolver_for(&base, &store, 1_000).resolve().await.unwrap();
    assert_eq!(resolution, Resolution::NoSession);
    assert_eq!(hits.count(), 0);
}

#[tokio::test]
async fn valid_credential_resolves_the_identity() {
    let router = Router::new().route(
        PROFILE_PATH,
        get(|| async { Json(user_json("ada@example.com")) }),
    );
    let base = serve(router).await;

    let store = stored("tok");
    let resolution = resolver_for(&base, &store, 1_000).resolve().await.unwrap();
    match resolution {
        Resolution::Identity(user) => assert_eq!(user.email, "ada@example.com"),
        Resolution::NoSession => panic!("expected an identity"),
    }
    assert!(store.is_present(), "a valid credential stays stored");
}

#[tokio::test]
async fn rejected_credential_is_cleared_and_reads_as_no_session() {
    let router =
        Router::new().route(PROFILE_PATH, get(|| async { StatusCode::UNAUTHORIZED }));
    let base = serve(router).await;

    let store = stored("expired-tok");
    let resolution = resolver_for(&base, &store, 1_000).resolve().await.unwrap();
    assert_eq!(resolution, Resolution::NoSession);
    assert!(!store.is_present(), "invalid credential must be cleared here");
}

#[tokio::test]
async fn forbidden_clears_the_credential_too() {
    let router = Router::new().route(PROFILE_PATH, get(|| async { StatusCode::FORBIDDEN }));
    let base = serve(router).await;

    let store = stored("tok");
    let resolution = resolver_for(&base, &store, 1_000).resolve().await.unwrap();
    assert_eq!(resolution, Resolution::NoSession);
    assert!(!store.is_present());
}

#[tokio::test]
async fn transport_failure_is_distinct_from_no_session() {
    let router = Router::new().route(
        PROFILE_PATH,
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(router).await;

    let store = stored("tok");
    let error = resolver_for(&base, &store, 1_000).resolve().await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
    assert!(store.is_present(), "a service outage must not log the user out");
}

#[tokio::test]
async fn hung_resolution_hits_the_bounded_timeout() {
    let router = Router::new().route(
        PROFILE_PATH,
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(user_json("ada@example.com"))
        }),
    );
    let base = serve(router).await;

    let store = stored("tok");
    let error = resolver_for(&base, &store, 50).resolve().await.unwrap_err();
    match error {
        ApiError::Transport(message) => assert!(message.contains("timed out"), "{message}"),
        other => panic!("expected Transport, got {other:?}"),
    }
    assert!(store.is_present(), "a timeout is not credential invalidation");
}
