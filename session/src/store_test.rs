use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Medium whose persist/remove calls can be made to fail mid-test.
struct FlakyMedium {
    fail: Arc<AtomicBool>,
    preloaded: Option<Credential>,
}

impl FlakyMedium {
    fn healthy() -> (Self, Arc<AtomicBool>) {
        let fail = Arc::new(AtomicBool::new(false));
        (Self { fail: Arc::clone(&fail), preloaded: None }, fail)
    }

    fn failing() -> Self {
        Self { fail: Arc::new(AtomicBool::new(true)), preloaded: None }
    }

    fn preloaded(credential: Credential) -> Self {
        Self { fail: Arc::new(AtomicBool::new(false)), preloaded: Some(credential) }
    }
}

impl CredentialMedium for FlakyMedium {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self.preloaded.clone())
    }

    fn persist(&self, _credential: &Credential) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Persist("disk full".into()))
        } else {
            Ok(())
        }
    }

    fn remove(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Persist("disk full".into()))
        } else {
            Ok(())
        }
    }
}

#[test]
fn set_then_get_returns_the_same_credential() {
    let store = CredentialStore::in_memory();
    let credential = Credential::new("tok-1");
    store.set(credential.clone()).unwrap();
    assert_eq!(store.get(), Some(credential));
}

#[test]
fn set_overwrites_the_prior_credential() {
    let store = CredentialStore::in_memory();
    store.set(Credential::new("old")).unwrap();
    store.set(Credential::new("new")).unwrap();
    assert_eq!(store.get().unwrap().token(), "new");
}

#[test]
fn get_on_empty_store_is_none() {
    let store = CredentialStore::in_memory();
    assert!(store.get().is_none());
    assert!(!store.is_present());
}

#[test]
fn clear_is_idempotent() {
    let store = CredentialStore::in_memory();
    store.set(Credential::new("tok")).unwrap();
    store.clear().unwrap();
    store.clear().unwrap();
    assert!(store.get().is_none());
}

#[test]
fn clones_share_the_same_slot() {
    let store = CredentialStore::in_memory();
    let other = store.clone();
    store.set(Credential::new("shared")).unwrap();
    assert_eq!(other.get().unwrap().token(), "shared");
    other.clear().unwrap();
    assert!(!store.is_present());
}

#[test]
fn persist_failure_is_surfaced_and_slot_untouched() {
    let store = CredentialStore::with_medium(FlakyMedium::failing());
    let result = store.set(Credential::new("tok"));
    assert!(matches!(result, Err(StoreError::Persist(_))));
    assert!(store.get().is_none(), "failed write must not appear readable");
}

#[test]
fn remove_failure_is_surfaced_and_keeps_the_credential() {
    let (medium, fail) = FlakyMedium::healthy();
    let store = CredentialStore::with_medium(medium);
    store.set(Credential::new("tok")).unwrap();

    fail.store(true, Ordering::SeqCst);
    let result = store.clear();
    assert!(matches!(result, Err(StoreError::Persist(_))));
    assert!(store.is_present(), "slot and medium must stay consistent");
}

#[test]
fn store_hydrates_from_the_medium() {
    let store = CredentialStore::with_medium(FlakyMedium::preloaded(Credential::new("persisted")));
    assert_eq!(store.get().unwrap().token(), "persisted");
}
