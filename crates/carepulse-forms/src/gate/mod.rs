//! Admin access gate
//!
//! A modal guarding the admin area. It is open (asking for the passkey)
//! until the expected passkey is entered or a previously stored credential
//! decodes to it; then it closes and the host is sent to `/admin`.

pub mod codec;
pub mod store;

pub use store::{CredentialStore, FileCredentialStore, InMemoryCredentialStore, StoreError};

use serde::Serialize;
use std::sync::Arc;

use crate::config::AdminPasskey;
use crate::error::Result;
use crate::navigation::{Navigator, Route};

/// Storage key of the encoded credential
pub const ACCESS_KEY: &str = "accessKey";
pub const PASSKEY_LENGTH: usize = 6;
pub const INVALID_PASSKEY: &str = "Invalid passkey. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    Open,
    Closed,
}

pub struct AccessGate {
    passkey: AdminPasskey,
    store: Arc<dyn CredentialStore>,
    state: GateState,
    input: String,
    error: Option<String>,
}

impl AccessGate {
    pub fn new(passkey: AdminPasskey, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            passkey,
            store,
            state: GateState::Open,
            input: String::new(),
            error: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == GateState::Open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Inline message under the passkey input
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check the stored credential. A readable credential decoding to the
    /// expected passkey closes the gate; anything else leaves it open.
    pub fn mount(&mut self, navigator: &dyn Navigator) -> GateState {
        let stored = match self.store.get(ACCESS_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored credential");
                None
            }
        };

        let valid = stored
            .as_deref()
            .and_then(codec::decode)
            .is_some_and(|decoded| self.passkey.matches(&decoded));

        if valid {
            tracing::debug!("stored credential accepted");
            self.state = GateState::Closed;
            navigator.push(Route::Admin);
        } else {
            self.state = GateState::Open;
        }
        self.state
    }

    /// Replace the passkey input; only the first six characters are kept
    pub fn set_input(&mut self, raw: &str) {
        self.input = raw.chars().take(PASSKEY_LENGTH).collect();
    }

    /// Check the input. An exact match is stored encoded and closes the
    /// gate; any other value sets the inline error and stores nothing.
    pub fn submit(&mut self, navigator: &dyn Navigator) -> Result<bool> {
        if !self.passkey.matches(&self.input) {
            tracing::info!("admin passkey rejected");
            self.error = Some(INVALID_PASSKEY.to_string());
            return Ok(false);
        }

        self.store.set(ACCESS_KEY, &codec::encode(&self.input))?;
        tracing::info!("admin passkey accepted");

        self.error = None;
        self.state = GateState::Closed;
        navigator.push(Route::Admin);
        Ok(true)
    }

    /// Dismiss without a valid passkey
    pub fn close(&mut self, navigator: &dyn Navigator) {
        self.state = GateState::Closed;
        self.input.clear();
        navigator.push(Route::Home);
    }

    /// Forget the stored credential and reopen
    pub fn sign_out(&mut self) -> Result<()> {
        self.store.clear(ACCESS_KEY)?;
        self.state = GateState::Open;
        self.input.clear();
        self.error = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;

    fn gate(store: Arc<InMemoryCredentialStore>) -> AccessGate {
        AccessGate::new(AdminPasskey::new("123456").unwrap(), store)
    }

    #[test]
    fn test_correct_passkey_persists_and_closes() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let navigator = RecordingNavigator::new();
        let mut gate = gate(store.clone());

        assert_eq!(gate.mount(&navigator), GateState::Open);
        gate.set_input("123456");
        assert!(gate.submit(&navigator).unwrap());

        let stored = store.get(ACCESS_KEY).unwrap().unwrap();
        assert_ne!(stored, "123456");
        assert_eq!(codec::decode(&stored).as_deref(), Some("123456"));
        assert_eq!(gate.state(), GateState::Closed);
        assert_eq!(navigator.history(), vec![Route::Admin]);
    }

    #[test]
    fn test_wrong_passkey_stays_open() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let navigator = RecordingNavigator::new();
        let mut gate = gate(store.clone());
        gate.mount(&navigator);

        gate.set_input("654321");
        assert!(!gate.submit(&navigator).unwrap());

        assert!(gate.is_open());
        assert_eq!(gate.error(), Some(INVALID_PASSKEY));
        assert_eq!(store.get(ACCESS_KEY).unwrap(), None);
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_input_is_capped() {
        let mut gate = gate(Arc::new(InMemoryCredentialStore::new()));
        gate.set_input("1234567890");
        assert_eq!(gate.input(), "123456");
    }

    #[test]
    fn test_mount_with_stored_credential_closes() {
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set(ACCESS_KEY, &codec::encode("123456")).unwrap();
        let navigator = RecordingNavigator::new();

        let mut gate = gate(store);
        assert_eq!(gate.mount(&navigator), GateState::Closed);
        assert_eq!(navigator.last(), Some(Route::Admin));
    }

    #[test]
    fn test_mount_with_stale_or_garbage_credential_opens() {
        let navigator = RecordingNavigator::new();
        for stored in [codec::encode("000000"), "%%%".to_string()] {
            let store = Arc::new(InMemoryCredentialStore::new());
            store.set(ACCESS_KEY, &stored).unwrap();
            assert_eq!(gate(store).mount(&navigator), GateState::Open);
        }
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_close_goes_home() {
        let navigator = RecordingNavigator::new();
        let mut gate = gate(Arc::new(InMemoryCredentialStore::new()));
        gate.mount(&navigator);
        gate.close(&navigator);
        assert_eq!(gate.state(), GateState::Closed);
        assert_eq!(navigator.last().map(|r| r.path()), Some("/".to_string()));
    }

    #[test]
    fn test_sign_out_clears_credential() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let navigator = RecordingNavigator::new();
        let mut gate = gate(store.clone());
        gate.set_input("123456");
        gate.submit(&navigator).unwrap();

        gate.sign_out().unwrap();
        assert!(gate.is_open());
        assert_eq!(store.get(ACCESS_KEY).unwrap(), None);
        assert_eq!(gate.mount(&navigator), GateState::Open);
    }
}
