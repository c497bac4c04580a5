//! Process-wide credential store with pluggable persistence.
//!
//! DESIGN
//! ======
//! One slot, many readers: the guard, the resolver, and the API client all
//! read the same handle, so replacing a credential is done under the write
//! lock and no reader ever observes a torn update. Persistence happens
//! write-through behind a trait so the host decides the medium (browser
//! cookie bridge, keychain, nothing at all in tests).

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::credential::Credential;

/// Errors from the persistence medium.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The medium failed to persist or remove the credential. A dropped
    /// write would leave the user believing they are logged in while the
    /// guard believes otherwise, so this is always surfaced to the caller.
    #[error("credential persistence failed: {0}")]
    Persist(String),
}

/// Persistence medium behind the in-memory slot.
pub trait CredentialMedium: Send + Sync {
    /// Read the persisted credential, if any. Called once at store creation.
    fn load(&self) -> Result<Option<Credential>, StoreError>;
    /// Write the credential to the medium.
    fn persist(&self, credential: &Credential) -> Result<(), StoreError>;
    /// Remove the persisted credential. Must be idempotent.
    fn remove(&self) -> Result<(), StoreError>;
}

/// Medium that keeps nothing beyond the in-memory slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryMedium;

impl CredentialMedium for MemoryMedium {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(None)
    }

    fn persist(&self, _credential: &Credential) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Cloneable handle to the single credential slot.
#[derive(Clone)]
pub struct CredentialStore {
    inner: Arc<Inner>,
}

struct Inner {
    slot: RwLock<Option<Credential>>,
    medium: Box<dyn CredentialMedium>,
}

impl CredentialStore {
    /// Store backed only by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_medium(MemoryMedium)
    }

    /// Store over the given medium, hydrated from it. A medium that fails to
    /// load starts the store empty; the failure is logged, not fatal.
    #[must_use]
    pub fn with_medium(medium: impl CredentialMedium + 'static) -> Self {
        let initial = medium.load().unwrap_or_else(|error| {
            tracing::error!(%error, "credential hydration failed; starting without a session");
            None
        });
        Self {
            inner: Arc::new(Inner { slot: RwLock::new(initial), medium: Box::new(medium) }),
        }
    }

    /// Store a credential, replacing any prior value. On persistence failure
    /// the slot is left untouched and the error is returned.
    pub fn set(&self, credential: Credential) -> Result<(), StoreError> {
        let mut slot = self.inner.slot.write();
        self.inner.medium.persist(&credential)?;
        *slot = Some(credential);
        Ok(())
    }

    /// Current credential, if any. Non-blocking; performs no I/O.
    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        self.inner.slot.read().clone()
    }

    /// Whether a credential is present. The guard's O(1) presence check.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.inner.slot.read().is_some()
    }

    /// Remove the credential. Idempotent; a second clear is a no-op.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.inner.slot.write();
        self.inner.medium.remove()?;
        *slot = None;
        Ok(())
    }
}
