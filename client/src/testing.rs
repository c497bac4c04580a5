//! In-process stubs of the external API for tests.
//!
//! Each test assembles its own axum router with canned behavior and serves
//! it on an ephemeral port; hit counters make "zero network calls" and
//! "exactly one retry" assertions observable.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;

/// Shared hit counter for stub handlers.
#[derive(Clone, Debug, Default)]
pub(crate) struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Serve a stub router on an ephemeral port, returning its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub(crate) fn user_json(email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "email": email,
        "first_name": "Ada",
        "last_name": "Lovelace"
    })
}

pub(crate) fn auth_json(token: &str, email: &str) -> serde_json::Value {
    serde_json::json!({ "token": token, "user": user_json(email) })
}
