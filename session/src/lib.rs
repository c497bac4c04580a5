//! Session domain for the dashboard: credential storage, session state,
//! route classification, and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! This crate owns everything the client auth context and the host router
//! share: where the credential lives, what "logged in" means, and which
//! paths require it. The guard mounts into a host axum router; the store and
//! state types are consumed by the `client` crate's context and API client.
//!
//! The credential scheme is deliberately single: a client-readable
//! `auth_token` cookie carrying the bearer value that API calls replay in an
//! `Authorization` header. Guard presence checks and header injection read
//! the same value, never two different ones.

pub mod credential;
pub mod guard;
pub mod routes;
pub mod state;
pub mod store;

pub use credential::{CREDENTIAL_COOKIE, Credential, DEFAULT_TTL};
pub use guard::{Guard, route_guard};
pub use routes::{ConfigError, GuardDecision, RouteClass, RoutePolicy};
pub use state::SessionState;
pub use store::{CredentialMedium, CredentialStore, MemoryMedium, StoreError};
